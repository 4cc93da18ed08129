//! List site content

use anyhow::Result;

use crate::render::reading_time_label;
use crate::ui::build_index;
use crate::Site;

/// List the loaded posts, or the navigation index
pub async fn run(site: &Site, content_type: &str) -> Result<()> {
    let posts = site.load_posts().await?;

    match content_type {
        "post" | "posts" => {
            println!("Posts ({}):", posts.len());
            for post in &posts {
                println!(
                    "  #{} {} [{}, {} images]",
                    post.id,
                    post.title,
                    reading_time_label(&post.content, site.config.words_per_minute),
                    post.images.len()
                );
            }
        }
        "index" => {
            let index = build_index(&posts);
            println!("Index ({}):", index.len());
            for entry in index {
                println!("  #{} -> {}", entry.anchor, entry.title);
            }
        }
        "image" | "images" => {
            let images: Vec<_> = posts.iter().flat_map(|p| p.images.iter()).collect();
            println!("Images ({}):", images.len());
            for image in images {
                println!("  {}", image);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, index, image",
                content_type
            );
        }
    }

    Ok(())
}
