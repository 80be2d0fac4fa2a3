//! Front-matter parsing
//!
//! Posts open with a `---` fenced block of `key: value` lines. Only a small
//! YAML subset is understood: quoted and bare strings, booleans, numbers and
//! single-line bracketed lists.

use chrono::NaiveDate;
use indexmap::IndexMap;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::fmt;

use super::ContentError;

lazy_static! {
    static ref FRONT_MATTER_RE: Regex =
        Regex::new(r"^---\r?\n([\s\S]*?)\r?\n---\r?\n([\s\S]*)$").unwrap();
    static ref ISO_DATE_RE: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
}

/// A single front-matter value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Number(f64),
    List(Vec<String>),
    String(String),
}

impl Value {
    /// Parse the raw text after the colon
    fn parse(raw: &str) -> Self {
        classify(unquote(raw))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Positive whole number, if this value is one
    pub fn as_minutes(&self) -> Option<u32> {
        match self {
            Value::Number(n) if *n >= 1.0 && n.fract() == 0.0 && *n <= u32::MAX as f64 => {
                Some(*n as u32)
            }
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::List(items) => write!(f, "[{}]", items.join(", ")),
            Value::String(s) => f.write_str(s),
        }
    }
}

fn classify(value: String) -> Value {
    match value.as_str() {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }

    if value.starts_with('[') && value.ends_with(']') {
        let items = value[1..value.len() - 1]
            .split(',')
            .map(|item| {
                let item = item.trim();
                let item = item.strip_prefix(['"', '\'']).unwrap_or(item);
                let item = item.strip_suffix(['"', '\'']).unwrap_or(item);
                item.to_string()
            })
            .filter(|item| !item.trim().is_empty())
            .collect();
        return Value::List(items);
    }

    if !value.is_empty() {
        if let Ok(n) = value.parse::<f64>() {
            if n.is_finite() {
                return Value::Number(n);
            }
        }
    }

    Value::String(value)
}

/// Trimmed text with one pair of matching outer quotes removed
fn unquote(raw: &str) -> String {
    let raw = raw.trim();
    if raw.len() < 2 {
        return raw.to_string();
    }
    let double = raw.starts_with('"') && raw.ends_with('"');
    let single = raw.starts_with('\'') && raw.ends_with('\'');
    if double || single {
        raw[1..raw.len() - 1]
            .replace("\\\"", "\"")
            .replace("\\'", "'")
    } else {
        raw.to_string()
    }
}

/// Front-matter data from a post
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<String>,
    pub excerpt: Option<String>,
    pub tags: Vec<String>,
    pub draft: bool,
    pub read_time: Option<u32>,

    /// Additional fields, in source order
    pub extra: IndexMap<String, Value>,
}

/// Validated metadata of a publishable post
#[derive(Debug, Clone, PartialEq)]
pub struct PostMeta {
    pub title: String,
    pub date: NaiveDate,
    pub excerpt: String,
    pub tags: Vec<String>,
    pub read_time: Option<u32>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, body)
    pub fn parse(content: &str) -> Result<(Self, &str), ContentError> {
        let caps = FRONT_MATTER_RE
            .captures(content)
            .ok_or(ContentError::MalformedFrontMatter)?;

        let block = caps.get(1).map_or("", |m| m.as_str());
        let body = caps.get(2).map_or("", |m| m.as_str());

        let mut fm = FrontMatter::default();

        for line in block.lines() {
            let Some((key, raw)) = line.split_once(':') else {
                continue;
            };
            let key = key.trim();
            if key.is_empty() {
                continue;
            }
            fm.set(key, raw);
        }

        Ok((fm, body))
    }

    fn set(&mut self, key: &str, raw: &str) {
        // Text fields keep their literal spelling, so `title: 1.50` stays "1.50".
        match key {
            "title" => self.title = Some(unquote(raw)),
            "date" => self.date = Some(unquote(raw)),
            "excerpt" => self.excerpt = Some(unquote(raw)),
            _ => self.set_value(key, Value::parse(raw)),
        }
    }

    fn set_value(&mut self, key: &str, value: Value) {
        match key {
            "tags" => {
                self.tags = match value {
                    Value::List(items) => items,
                    _ => Vec::new(),
                }
            }
            "draft" => self.draft = value.as_bool().unwrap_or(false),
            "readTime" => self.read_time = value.as_minutes(),
            _ => {
                self.extra.insert(key.to_string(), value);
            }
        }
    }

    /// Check the required fields of a publishable post
    pub fn validate(&self) -> Result<PostMeta, ContentError> {
        let title = required(&self.title, "title")?;
        let date = required(&self.date, "date")?;
        let excerpt = required(&self.excerpt, "excerpt")?;

        let date = parse_iso_date(date).ok_or_else(|| ContentError::InvalidDate(date.to_string()))?;

        Ok(PostMeta {
            title: title.to_string(),
            date,
            excerpt: excerpt.to_string(),
            tags: self
                .tags
                .iter()
                .filter(|t| !t.trim().is_empty())
                .cloned()
                .collect(),
            read_time: self.read_time,
        })
    }
}

fn required<'a>(field: &'a Option<String>, name: &'static str) -> Result<&'a str, ContentError> {
    match field.as_deref() {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ContentError::MissingField(name)),
    }
}

/// Strict `YYYY-MM-DD` that names a real calendar day
pub fn is_valid_date(s: &str) -> bool {
    parse_iso_date(s).is_some()
}

fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    if !ISO_DATE_RE.is_match(s) {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}
