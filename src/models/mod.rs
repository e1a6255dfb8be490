pub mod raw;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use raw::{raw_rows_from_json, Loose, RawBedroomType, RawId, RawNumber, RawPropertyRecord};

/// Category of a listing
///
/// The store has no column for this yet, so every listing gets the same value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum PropertyType {
    #[default]
    Residential,
}

impl std::fmt::Display for PropertyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PropertyType::Residential => f.write_str("Residential"),
        }
    }
}

/// A unit configuration offered by a listing, e.g. "2 BHK" at 900 sq ft
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BedroomType {
    #[serde(rename = "type")]
    pub kind: String,
    pub sqft: u32,
}

/// Validated listing as consumed by search and presentation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalProperty {
    pub id: String,
    pub title: String,
    pub location: String,
    pub description: String,
    pub property_type: PropertyType,
    pub bedroom_types: Vec<BedroomType>,
    pub amenities: Vec<String>,
    /// Never empty: holds a placeholder when the listing has no images
    pub images: Vec<String>,
    /// Advisory only; `price_text` wins for display
    pub price: f64,
    pub price_text: Option<String>,
    pub whatsapp_number: String,
    pub google_maps_link: Option<String>,
    pub youtube_video_url: Option<String>,
    pub brochure_urls: Vec<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl CanonicalProperty {
    /// Bedroom type labels joined by a single space, in listing order
    pub fn bedroom_labels(&self) -> String {
        self.bedroom_types
            .iter()
            .map(|b| b.kind.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Lower-cased haystack used by free-text search:
    /// title, location, description and bedroom labels, space-joined.
    pub fn search_text(&self) -> String {
        format!(
            "{} {} {} {}",
            self.title,
            self.location,
            self.description,
            self.bedroom_labels()
        )
        .to_lowercase()
    }
}
