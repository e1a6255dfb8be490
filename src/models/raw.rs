use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

/// A field that either has the expected shape or is kept aside as malformed.
///
/// Lets a whole row deserialize even when individual fields carry the wrong
/// JSON type; the normalizer decides what a malformed value degrades to.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Loose<T> {
    Valid(T),
    Malformed(Value),
}

impl<T> Loose<T> {
    pub fn valid(self) -> Option<T> {
        match self {
            Loose::Valid(value) => Some(value),
            Loose::Malformed(_) => None,
        }
    }
}

/// Row identifier: the store uses UUID strings, fixtures sometimes use integers
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RawId {
    Text(String),
    Int(i64),
}

impl std::fmt::Display for RawId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RawId::Text(s) => f.write_str(s),
            RawId::Int(n) => write!(f, "{}", n),
        }
    }
}

/// Numeric field as it arrives: form inputs are often sent as strings
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RawNumber {
    Int(i64),
    Float(f64),
    Text(String),
}

impl RawNumber {
    /// Integer value with `parseInt` semantics for text: optional sign and the
    /// leading digit run, so "900 sq ft" gives 900 and "abc" gives nothing.
    pub fn to_integer(&self) -> Option<i64> {
        match self {
            RawNumber::Int(n) => Some(*n),
            RawNumber::Float(f) if f.is_finite() => Some(f.trunc() as i64),
            RawNumber::Float(_) => None,
            RawNumber::Text(s) => leading_integer(s),
        }
    }

    pub fn to_f64(&self) -> Option<f64> {
        match self {
            RawNumber::Int(n) => Some(*n as f64),
            RawNumber::Float(f) => Some(*f),
            RawNumber::Text(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        }
    }
}

fn leading_integer(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let digits: &str = &rest[..rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len())];
    if digits.is_empty() {
        return None;
    }
    let value = digits.parse::<i64>().ok()?;
    Some(if negative { -value } else { value })
}

/// One entry of `bedroom_types` as stored
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct RawBedroomType {
    #[serde(rename = "type", default)]
    pub kind: Option<Loose<String>>,
    #[serde(default)]
    pub sqft: Option<Loose<RawNumber>>,
}

impl RawBedroomType {
    /// Only JSON objects count as bedroom entries; anything else is rejected.
    pub fn from_entry(entry: Value) -> Option<Self> {
        match entry {
            Value::Object(_) => serde_json::from_value(entry).ok(),
            _ => None,
        }
    }
}

/// Property row as returned by the store, before normalization
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct RawPropertyRecord {
    #[serde(default)]
    pub id: Option<Loose<RawId>>,
    #[serde(default)]
    pub title: Option<Loose<String>>,
    #[serde(default)]
    pub location: Option<Loose<String>>,
    #[serde(default)]
    pub description: Option<Loose<String>>,
    #[serde(default)]
    pub price: Option<Loose<RawNumber>>,
    #[serde(default)]
    pub price_text: Option<Loose<String>>,
    #[serde(default)]
    pub bedroom_types: Option<Loose<Vec<Value>>>,
    #[serde(default)]
    pub amenities: Option<Loose<Vec<Loose<String>>>>,
    #[serde(default)]
    pub image_urls: Option<Loose<Vec<Loose<String>>>>,
    #[serde(default)]
    pub brochure_urls: Option<Loose<Vec<Loose<String>>>>,
    #[serde(default)]
    pub whatsapp_number: Option<Loose<String>>,
    #[serde(default)]
    pub google_maps_link: Option<Loose<String>>,
    #[serde(default)]
    pub youtube_video_url: Option<Loose<String>>,
    #[serde(default)]
    pub created_at: Option<Loose<DateTime<Utc>>>,
    #[serde(default)]
    pub updated_at: Option<Loose<DateTime<Utc>>>,
}

/// Parse a JSON array of rows. Elements that are not objects are skipped.
pub fn raw_rows_from_json(json: &str) -> Result<Vec<RawPropertyRecord>> {
    let value: Value = serde_json::from_str(json).context("Rows are not valid JSON")?;
    let Value::Array(items) = value else {
        anyhow::bail!("Expected a JSON array of property rows");
    };

    let mut rows = Vec::with_capacity(items.len());
    for (idx, item) in items.into_iter().enumerate() {
        if !item.is_object() {
            warn!("Skipping row {}: not a JSON object", idx);
            continue;
        }
        match serde_json::from_value::<RawPropertyRecord>(item) {
            Ok(row) => rows.push(row),
            Err(e) => warn!("Skipping row {}: {}", idx, e),
        }
    }
    Ok(rows)
}
