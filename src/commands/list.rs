//! List site content

use anyhow::Result;
use std::collections::BTreeMap;

use crate::content::loader::ContentLoader;
use crate::Folio;

/// List posts or tags
pub fn run(folio: &Folio, content_type: &str) -> Result<()> {
    let loader = ContentLoader::new(folio);

    match content_type {
        "post" | "posts" => {
            let content = loader.load_posts(true)?;
            let mut posts = content.posts;
            posts.sort_by(|a, b| b.post.date.cmp(&a.post.date));
            println!("Posts ({}):", posts.len());
            for loaded in posts {
                let draft = if loaded.source.front_matter.draft {
                    " (draft)"
                } else {
                    ""
                };
                println!(
                    "  {} - {}{} [{}]",
                    loaded.post.date.format("%Y-%m-%d"),
                    loaded.post.title,
                    draft,
                    loaded.source.path.display()
                );
            }
        }
        "tag" | "tags" => {
            let content = loader.load_posts(false)?;
            let counts = tag_counts(content.posts.iter().flat_map(|l| l.post.tags.iter()));
            println!("Tags ({}):", counts.len());
            for (tag, count) in counts {
                println!("  {} ({})", tag, count);
            }
        }
        _ => {
            anyhow::bail!("Unknown type: {}. Available: post, tag", content_type);
        }
    }

    Ok(())
}

/// Case-folded tag counts, most used first, then alphabetical
fn tag_counts<'a>(tags: impl Iterator<Item = &'a String>) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for tag in tags {
        *counts.entry(tag.to_lowercase()).or_insert(0) += 1;
    }
    let mut counts: Vec<_> = counts.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_counts() {
        let tags: Vec<String> = ["Rust", "css", "rust", "Async", "RUST", "CSS"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(
            tag_counts(tags.iter()),
            vec![
                ("rust".to_string(), 3),
                ("css".to_string(), 2),
                ("async".to_string(), 1)
            ]
        );
    }
}
