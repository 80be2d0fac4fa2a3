//! RSS 2.0 feed

use chrono::{DateTime, Utc};
use rss::extension::atom::{AtomExtensionBuilder, Link};
use rss::{ChannelBuilder, GuidBuilder, Item, ItemBuilder};

use crate::config::SiteConfig;
use crate::content::Post;
use crate::helpers::{date_rfc2822, full_url};

/// Render the feed channel with one item per post, newest first
pub fn render(config: &SiteConfig, posts: &[Post], now: DateTime<Utc>) -> String {
    let origin = config.origin();

    let mut sorted = posts.to_vec();
    super::blog_data::sort_newest_first(&mut sorted);

    let items: Vec<Item> = sorted
        .iter()
        .map(|post| post_to_item(post, &origin, &config.paths.blog_dir))
        .collect();

    let mut self_link = Link::default();
    self_link.set_href(full_url(&origin, &config.paths.feed));
    self_link.set_rel("self");
    self_link.set_mime_type(Some("application/rss+xml".to_string()));

    let atom = AtomExtensionBuilder::default()
        .links(vec![self_link])
        .build();

    let channel = ChannelBuilder::default()
        .title(config.name.clone())
        .link(full_url(&origin, ""))
        .description(config.description.clone())
        .language(Some(config.language.clone()))
        .last_build_date(Some(now.to_rfc2822()))
        .atom_ext(Some(atom))
        .items(items)
        .build();

    channel.to_string()
}

fn post_to_item(post: &Post, origin: &str, blog_dir: &str) -> Item {
    let link = full_url(origin, &post.url(blog_dir));

    ItemBuilder::default()
        .title(Some(post.title.clone()))
        .link(Some(link.clone()))
        .description(Some(post.excerpt.clone()))
        .pub_date(Some(date_rfc2822(post.date)))
        .guid(Some(GuidBuilder::default().permalink(true).value(link).build()))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn post(slug: &str, title: &str, day: u32) -> Post {
        Post {
            slug: slug.to_string(),
            title: title.to_string(),
            date: NaiveDate::from_ymd_opt(2025, 1, day).unwrap(),
            excerpt: format!("About {}", slug),
            tags: vec![],
            read_time: 1,
        }
    }

    #[test]
    fn test_render() {
        let mut config = SiteConfig::default();
        config.name = "My Blog".to_string();
        config.description = "Notes".to_string();
        config.domain = "example.com".to_string();

        let now = Utc.with_ymd_and_hms(2025, 2, 15, 12, 0, 0).unwrap();
        let posts = vec![post("first", "First & <Best>", 10), post("second", "Second", 20)];
        let xml = render(&config, &posts, now);

        assert!(xml.contains("<title>My Blog</title>"));
        assert!(xml.contains("<link>https://example.com/</link>"));
        assert!(xml.contains("<language>en-us</language>"));
        assert!(xml.contains("<lastBuildDate>Sat, 15 Feb 2025 12:00:00 +0000</lastBuildDate>"));
        assert!(xml.contains("https://example.com/feed.xml"));
        assert!(xml.contains("rel=\"self\""));
        assert!(xml.contains("First &amp; &lt;Best&gt;"));
        assert!(xml.contains("<pubDate>Fri, 10 Jan 2025 00:00:00 +0000</pubDate>"));
        assert!(xml.contains("https://example.com/blog/second.html</guid>"));

        let second = xml.find("blog/second.html").unwrap();
        let first = xml.find("blog/first.html").unwrap();
        assert!(second < first);
    }
}
