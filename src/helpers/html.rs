//! HTML helper functions

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Escape plain text and turn each newline into a `<br>`
///
/// Paragraph breaks are kept exactly as written; no re-flowing.
pub fn text_with_breaks(s: &str) -> String {
    s.split('\n')
        .map(html_escape)
        .collect::<Vec<_>>()
        .join("<br>")
}

/// Generate an image tag
///
/// # Examples
/// ```ignore
/// image_tag("img/a.jpg", "Post Content", "carousel-image") // -> <img src="img/a.jpg" alt="Post Content" class="carousel-image">
/// ```
pub fn image_tag(src: &str, alt: &str, class: &str) -> String {
    format!(
        r#"<img src="{}" alt="{}" class="{}">"#,
        html_escape(src),
        html_escape(alt),
        class
    )
}

/// Generate an in-page anchor link
///
/// # Examples
/// ```ignore
/// anchor_link("post-1", "Hello") // -> <a href="#post-1" data-anchor="post-1">Hello</a>
/// ```
pub fn anchor_link(anchor: &str, text: &str) -> String {
    format!(
        r##"<a href="#{0}" data-anchor="{0}">{1}</a>"##,
        html_escape(anchor),
        html_escape(text)
    )
}

/// Generate a button
pub fn button(class: &str, label: &str) -> String {
    format!(r#"<button class="{}">{}</button>"#, class, label)
}

/// Generate meta generator tag
pub fn meta_generator() -> String {
    format!(
        r#"<meta name="generator" content="postdeck {}">"#,
        env!("CARGO_PKG_VERSION")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_text_with_breaks() {
        assert_eq!(text_with_breaks("a\nb\n\nc"), "a<br>b<br><br>c");
        assert_eq!(text_with_breaks("1 < 2"), "1 &lt; 2");
        assert_eq!(text_with_breaks(""), "");
    }

    #[test]
    fn test_image_tag() {
        let tag = image_tag("img/a b.jpg", "Post", "carousel-image");
        assert_eq!(
            tag,
            r#"<img src="img/a b.jpg" alt="Post" class="carousel-image">"#
        );
    }

    #[test]
    fn test_anchor_link() {
        assert_eq!(
            anchor_link("post-3", "A & B"),
            r##"<a href="#post-3" data-anchor="post-3">A &amp; B</a>"##
        );
    }
}
