//! Read-time estimation

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref FENCED_CODE_RE: Regex = Regex::new(r"```[\s\S]*?```").unwrap();
    static ref INLINE_CODE_RE: Regex = Regex::new(r"`[^`]+`").unwrap();
    static ref LINK_RE: Regex = Regex::new(r"\[([^\]]+)\]\([^)]+\)").unwrap();
    static ref MARKUP_RE: Regex = Regex::new(r"[#*_~>]").unwrap();
}

/// Estimated minutes to read a markdown body, never less than one.
///
/// Code (fenced and inline) is not counted, links count as their text,
/// and heading/emphasis/quote markers are dropped before splitting on
/// whitespace.
pub fn calculate_read_time(markdown: &str, words_per_minute: usize) -> u32 {
    let text = FENCED_CODE_RE.replace_all(markdown, "");
    let text = INLINE_CODE_RE.replace_all(&text, "");
    let text = LINK_RE.replace_all(&text, "$1");
    let text = MARKUP_RE.replace_all(&text, "");

    let words = text.split_whitespace().count();
    let wpm = words_per_minute.max(1);

    words.div_ceil(wpm).max(1) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimum_one_minute() {
        assert_eq!(calculate_read_time("", 200), 1);
        assert_eq!(calculate_read_time("Short", 200), 1);
    }

    #[test]
    fn test_word_count() {
        let words = vec!["word"; 400].join(" ");
        assert_eq!(calculate_read_time(&words, 200), 2);

        let words = vec!["word"; 401].join(" ");
        assert_eq!(calculate_read_time(&words, 200), 3);
    }

    #[test]
    fn test_excludes_code_blocks() {
        let content = "Hello ```code block with many words here``` world";
        assert_eq!(calculate_read_time(content, 200), 1);

        let code = vec!["token"; 1000].join(" ");
        let content = format!("Intro\n\n```rust\n{}\n```\n\nOutro", code);
        assert_eq!(calculate_read_time(&content, 200), 1);
    }

    #[test]
    fn test_links_count_as_text() {
        let link_words = vec!["[a](https://example.com/very/long/url)"; 300].join(" ");
        assert_eq!(calculate_read_time(&link_words, 200), 2);
    }

    #[test]
    fn test_markup_only_tokens_are_not_words() {
        let content = vec!["# ** > ~~"; 300].join("\n");
        assert_eq!(calculate_read_time(&content, 200), 1);
    }
}
