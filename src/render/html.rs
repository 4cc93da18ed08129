//! Markup for the post list and the index

use super::{CardView, CarouselView, ListView};
use crate::helpers::{anchor_link, button, html_escape, image_tag, text_with_breaks};
use crate::ui::IndexEntry;

/// Render the post list region
pub fn render_list_html(view: &ListView) -> String {
    match view {
        ListView::Cards(cards) => cards.iter().map(card_html).collect::<Vec<_>>().join("\n"),
        ListView::Placeholder(message) => message_card(message, "placeholder"),
        ListView::Error(message) => message_card(message, "error"),
    }
}

fn message_card(message: &str, kind: &str) -> String {
    format!(
        r#"<div class="post-card {}"><p>{}</p></div>"#,
        kind,
        html_escape(message)
    )
}

fn card_html(card: &CardView) -> String {
    let carousel = card.carousel.as_ref().map(carousel_html).unwrap_or_default();

    format!(
        r#"<div class="post-card" id="{anchor}">
    <h2>{title}</h2>
    <span class="read-time">{reading_time}</span>
    <p>{body}</p>
    {carousel}
</div>"#,
        anchor = html_escape(&card.anchor),
        title = html_escape(&card.title),
        reading_time = card.reading_time,
        body = text_with_breaks(&card.body),
        carousel = carousel,
    )
}

fn carousel_html(carousel: &CarouselView) -> String {
    let images = serde_json::to_string(&carousel.images).unwrap_or_else(|_| "[]".to_string());

    let mut parts = vec![
        image_tag(&carousel.current, "Background", "carousel-background-image"),
        image_tag(&carousel.current, "Post Content", "carousel-image"),
    ];
    if carousel.controls {
        parts.push(button("carousel-button prev", "&lt;"));
        parts.push(button("carousel-button next", "&gt;"));
    }

    format!(
        r#"<div class="carousel" data-post-id="{}" data-images="{}">{}</div>"#,
        carousel.post_id,
        html_escape(&images),
        parts.join("")
    )
}

/// Render the navigation list items
pub fn index_html(entries: &[IndexEntry]) -> String {
    entries
        .iter()
        .map(|entry| format!("<li>{}</li>", anchor_link(&entry.anchor, &entry.title)))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::PostRecord;
    use crate::render::Renderer;
    use crate::ui::build_index;

    fn html_for(images: &[&str]) -> String {
        let post = PostRecord::new(9, "Title", "first\nsecond").with_images(images.to_vec());
        Renderer::default().render_list(&[post], "").to_html()
    }

    #[test]
    fn test_card_without_images_has_no_carousel() {
        let html = html_for(&[]);
        assert!(html.contains(r#"id="post-9""#));
        assert!(html.contains("<h2>Title</h2>"));
        assert!(html.contains("first<br>second"));
        assert!(html.contains("1 MIN READ"));
        assert!(!html.contains("carousel"));
    }

    #[test]
    fn test_single_image_has_no_buttons() {
        let html = html_for(&["a.jpg"]);
        assert!(html.contains(r#"class="carousel""#));
        assert!(html.contains(r#"<img src="a.jpg" alt="Background" class="carousel-background-image">"#));
        assert!(html.contains(r#"<img src="a.jpg" alt="Post Content" class="carousel-image">"#));
        assert!(!html.contains("carousel-button"));
    }

    #[test]
    fn test_multiple_images_have_buttons() {
        let html = html_for(&["a.jpg", "b.jpg"]);
        assert!(html.contains("carousel-button prev"));
        assert!(html.contains("carousel-button next"));
        assert!(html.contains(r#"data-images="[&quot;a.jpg&quot;,&quot;b.jpg&quot;]""#));
    }

    #[test]
    fn test_title_and_body_are_escaped() {
        let post = PostRecord::new(1, "<script>", "a & b");
        let html = Renderer::default().render_list(&[post], "").to_html();
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("a &amp; b"));
    }

    #[test]
    fn test_message_cards() {
        assert_eq!(
            ListView::Placeholder("Nothing".to_string()).to_html(),
            r#"<div class="post-card placeholder"><p>Nothing</p></div>"#
        );
        assert!(ListView::Error("Broken".to_string())
            .to_html()
            .contains("post-card error"));
    }

    #[test]
    fn test_index_html() {
        let posts = vec![PostRecord::new(1, "One", ""), PostRecord::new(2, "Two", "")];
        let html = index_html(&build_index(&posts));
        assert_eq!(
            html,
            "<li><a href=\"#post-1\" data-anchor=\"post-1\">One</a></li>\n<li><a href=\"#post-2\" data-anchor=\"post-2\">Two</a></li>"
        );
    }
}
