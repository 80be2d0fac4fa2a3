//! sitemap.xml

use chrono::NaiveDate;

use super::escape_xml;
use crate::content::Post;
use crate::helpers::full_url;

/// Pages that are not posts, with their priorities
const STATIC_PAGES: [(&str, &str); 2] = [("", "1.0"), ("about.html", "0.8")];

/// Render a sitemap 0.9 document.
///
/// Static pages are stamped with `today`; posts with their own date.
pub fn render(origin: &str, blog_dir: &str, posts: &[Post], today: NaiveDate) -> String {
    let today = today.format("%Y-%m-%d").to_string();

    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">",
    );

    for (path, priority) in STATIC_PAGES {
        push_url(&mut xml, &full_url(origin, path), &today, priority);
    }

    for post in posts {
        let lastmod = post.date.format("%Y-%m-%d").to_string();
        push_url(&mut xml, &full_url(origin, &post.url(blog_dir)), &lastmod, "0.7");
    }

    xml.push_str("\n</urlset>\n");
    xml
}

fn push_url(xml: &mut String, loc: &str, lastmod: &str, priority: &str) {
    xml.push_str(&format!(
        "\n  <url>\n    <loc>{}</loc>\n    <lastmod>{}</lastmod>\n    <priority>{}</priority>\n  </url>",
        escape_xml(loc),
        lastmod,
        priority
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render() {
        let post = Post {
            slug: "hello".to_string(),
            title: "Hello".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            excerpt: String::new(),
            tags: vec![],
            read_time: 1,
        };
        let today = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        let xml = render("https://example.com", "blog", &[post], today);

        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<loc>https://example.com/</loc>\n    <lastmod>2025-02-01</lastmod>\n    <priority>1.0</priority>"));
        assert!(xml.contains("<loc>https://example.com/about.html</loc>\n    <lastmod>2025-02-01</lastmod>\n    <priority>0.8</priority>"));
        assert!(xml.contains("<loc>https://example.com/blog/hello.html</loc>\n    <lastmod>2025-01-15</lastmod>\n    <priority>0.7</priority>"));
        assert_eq!(xml.matches("<url>").count(), 3);
        assert!(xml.trim_end().ends_with("</urlset>"));
    }
}
