//! Share buttons

use crate::helpers::encode_component;

/// Share target named by a button's `data-share` attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SharePlatform {
    Twitter,
    /// Copy the page link to the clipboard
    Copy,
}

impl SharePlatform {
    pub fn from_attr(value: &str) -> Option<Self> {
        match value {
            "twitter" => Some(SharePlatform::Twitter),
            "copy" => Some(SharePlatform::Copy),
            _ => None,
        }
    }
}

/// URL to open for sharing, or None when the platform copies instead
pub fn share_url(platform: SharePlatform, url: &str, title: &str) -> Option<String> {
    match platform {
        SharePlatform::Twitter => Some(format!(
            "https://twitter.com/intent/tweet?url={}&text={}",
            encode_component(url),
            encode_component(title)
        )),
        SharePlatform::Copy => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_twitter_url() {
        let url = share_url(
            SharePlatform::Twitter,
            "https://example.com/blog/a.html",
            "Rust & You",
        );
        assert_eq!(
            url.as_deref(),
            Some("https://twitter.com/intent/tweet?url=https%3A%2F%2Fexample.com%2Fblog%2Fa.html&text=Rust%20%26%20You")
        );
    }

    #[test]
    fn test_copy_has_no_url() {
        assert_eq!(share_url(SharePlatform::Copy, "https://example.com", "x"), None);
        assert_eq!(SharePlatform::from_attr("copy"), Some(SharePlatform::Copy));
        assert_eq!(SharePlatform::from_attr("mastodon"), None);
    }
}
