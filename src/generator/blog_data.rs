//! The posts data module loaded by the home page script

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::content::Post;

/// A post as the browser sees it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    pub id: String,
    pub title: String,
    pub date: String,
    pub excerpt: String,
    pub tags: Vec<String>,
    pub url: String,
    pub read_time: u32,
}

impl PostRecord {
    pub fn from_post(post: &Post, blog_dir: &str) -> Self {
        Self {
            id: post.slug.clone(),
            title: post.title.clone(),
            date: post.date.format("%Y-%m-%d").to_string(),
            excerpt: post.excerpt.clone(),
            tags: post.tags.clone(),
            url: post.url(blog_dir),
            read_time: post.read_time,
        }
    }

    /// Whether any tag equals `tag` ignoring case
    pub fn has_tag(&self, tag: &str) -> bool {
        let tag = tag.to_lowercase();
        self.tags.iter().any(|t| t.to_lowercase() == tag)
    }

    /// Case-insensitive substring match against title or excerpt
    pub fn matches_query(&self, query: &str) -> bool {
        let q = query.to_lowercase();
        self.title.to_lowercase().contains(&q) || self.excerpt.to_lowercase().contains(&q)
    }
}

/// Sort posts newest first, keeping file order for equal dates
pub fn sort_newest_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Render `export const blogPosts = [...];` for the given posts, newest first
pub fn render(posts: &[Post], blog_dir: &str) -> Result<String> {
    let mut sorted = posts.to_vec();
    sort_newest_first(&mut sorted);

    let records: Vec<PostRecord> = sorted
        .iter()
        .map(|p| PostRecord::from_post(p, blog_dir))
        .collect();

    let json = serde_json::to_string_pretty(&records)?;
    Ok(format!("export const blogPosts = {};\n", json))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn post(slug: &str, title: &str, date: (i32, u32, u32)) -> Post {
        Post {
            slug: slug.to_string(),
            title: title.to_string(),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            excerpt: "Excerpt".to_string(),
            tags: vec!["rust".to_string()],
            read_time: 2,
        }
    }

    #[test]
    fn test_render_sorted_newest_first() {
        let posts = vec![
            post("old", "Old", (2024, 3, 1)),
            post("new", "New", (2025, 1, 15)),
            post("mid", "Mid", (2024, 12, 1)),
        ];
        let js = render(&posts, "blog").unwrap();

        assert!(js.starts_with("export const blogPosts = ["));
        assert!(js.ends_with("];\n"));
        let new = js.find("\"new\"").unwrap();
        let mid = js.find("\"mid\"").unwrap();
        let old = js.find("\"old\"").unwrap();
        assert!(new < mid && mid < old);
        assert!(js.contains(r#""url": "blog/new.html""#));
        assert!(js.contains(r#""readTime": 2"#));
    }

    #[test]
    fn test_render_escapes_values() {
        let posts = vec![post("q", "Say \"hi\" \\ </script>", (2025, 1, 1))];
        let js = render(&posts, "blog").unwrap();
        assert!(js.contains(r#""title": "Say \"hi\" \\ </script>""#));

        let body = js
            .trim_start_matches("export const blogPosts = ")
            .trim_end_matches(";\n");
        let parsed: serde_json::Value = serde_json::from_str(body).unwrap();
        assert_eq!(parsed[0]["title"], "Say \"hi\" \\ </script>");
        assert_eq!(parsed[0]["id"], "q");
    }

    #[test]
    fn test_record_matching() {
        let mut p = post("a", "Intro to Rust", (2025, 1, 1));
        p.tags = vec!["Rust".to_string(), "WebDev".to_string()];
        p.excerpt = "Ownership and the Web".to_string();
        let record = PostRecord::from_post(&p, "blog");

        assert!(record.has_tag("rust"));
        assert!(record.has_tag("WEBDEV"));
        assert!(!record.has_tag("go"));
        assert!(record.matches_query("INTRO"));
        assert!(record.matches_query("the web"));
        assert!(!record.matches_query("python"));
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render(&[], "blog").unwrap(), "export const blogPosts = [];\n");
    }
}
