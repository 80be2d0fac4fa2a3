//! CSS minifier

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref COMMENT_RE: Regex = Regex::new(r"/\*[\s\S]*?\*/").unwrap();
    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").unwrap();
    static ref PUNCT_RE: Regex = Regex::new(r"\s*([{}:;,>~])\s*").unwrap();
    static ref IMPORTANT_RE: Regex = Regex::new(r"\s*!important").unwrap();
}

/// Strip comments and redundant whitespace from a stylesheet
pub fn minify(css: &str) -> String {
    let css = COMMENT_RE.replace_all(css, "");
    let css = WHITESPACE_RE.replace_all(&css, " ");
    let css = PUNCT_RE.replace_all(&css, "$1");
    let css = css.replace(";}", "}");
    let css = IMPORTANT_RE.replace_all(&css, "!important");
    css.trim().to_string()
}

/// Size reduction in whole percent
pub fn savings_percent(original: &str, minified: &str) -> i64 {
    if original.is_empty() {
        return 0;
    }
    ((1.0 - minified.len() as f64 / original.len() as f64) * 100.0).round() as i64
}
