//! Search posts from the command line

use anyhow::Result;

use crate::ui::filter_posts;
use crate::Site;

/// Print the posts matching `query`
pub async fn run(site: &Site, query: &str) -> Result<()> {
    let posts = site.load_posts().await?;
    let matching = filter_posts(&posts, query);

    if matching.is_empty() {
        println!("{}", site.config.no_results_message);
        return Ok(());
    }

    println!("Matches ({}):", matching.len());
    for post in matching {
        println!("  #{} {}", post.id, post.title);
    }

    Ok(())
}
