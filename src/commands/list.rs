//! List site content

use anyhow::Result;

use crate::content::PostStore;
use crate::Blogd;

/// List site content by type
pub fn run(blog: &Blogd, content_type: &str) -> Result<()> {
    let store = PostStore::new(blog);

    match content_type {
        "post" | "posts" => {
            let posts = store.last_n(usize::MAX)?;
            println!("Posts ({}):", posts.len());
            for post in posts {
                println!("  {} - {} [{}]", post.date_display, post.title, post.slug);
            }
        }
        "tag" | "tags" => {
            let posts = store.list()?;
            let mut tags: std::collections::HashMap<String, usize> =
                std::collections::HashMap::new();
            for post in &posts {
                for tag in &post.tags {
                    *tags.entry(tag.clone()).or_insert(0) += 1;
                }
            }
            println!("Tags ({}):", tags.len());
            let mut tags: Vec<_> = tags.into_iter().collect();
            tags.sort_by(|a, b| b.1.cmp(&a.1));
            for (tag, count) in tags {
                println!("  {} ({})", tag, count);
            }
        }
        _ => {
            anyhow::bail!("Unknown type: {}. Available: post, tag", content_type);
        }
    }

    Ok(())
}
