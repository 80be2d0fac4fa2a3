//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left alone by JavaScript's `encodeURIComponent`
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Join the site origin and a root-relative path
///
/// # Examples
/// ```ignore
/// full_url("https://example.com", "blog/a.html") // -> "https://example.com/blog/a.html"
/// ```
pub fn full_url(origin: &str, path: &str) -> String {
    let origin = origin.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", origin)
    } else {
        format!("{}/{}", origin, path)
    }
}

/// Percent-encode a query component
pub fn encode_component(s: &str) -> String {
    utf8_percent_encode(s, COMPONENT).to_string()
}

/// Whether a URL is absolute http(s)
pub fn is_absolute_http(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_url() {
        assert_eq!(full_url("https://example.com", ""), "https://example.com/");
        assert_eq!(
            full_url("https://example.com/", "/blog/a.html"),
            "https://example.com/blog/a.html"
        );
        assert_eq!(full_url("", "about.html"), "/about.html");
    }

    #[test]
    fn test_encode_component() {
        assert_eq!(encode_component("Hello World & more"), "Hello%20World%20%26%20more");
        assert_eq!(
            encode_component("https://a.com/x?y=1"),
            "https%3A%2F%2Fa.com%2Fx%3Fy%3D1"
        );
        assert_eq!(encode_component("it's (ok)"), "it's%20(ok)");
    }
}
