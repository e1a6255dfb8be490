use crate::models::{
    BedroomType, CanonicalProperty, Loose, PropertyType, RawBedroomType, RawPropertyRecord,
};
use serde_json::Value;
use tracing::debug;

pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

/// Knobs for normalization
#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    /// Image used when a listing has none
    pub placeholder_image: String,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_string(),
        }
    }
}

/// Normalize a raw row with default options. Never fails.
pub fn normalize(raw: RawPropertyRecord) -> CanonicalProperty {
    normalize_with(raw, &NormalizeOptions::default())
}

/// Normalize a batch, keeping the store's order
pub fn normalize_all(rows: Vec<RawPropertyRecord>, options: &NormalizeOptions) -> Vec<CanonicalProperty> {
    let total = rows.len();
    let properties: Vec<_> = rows
        .into_iter()
        .map(|raw| normalize_with(raw, options))
        .collect();
    debug!("Normalized {} property rows", total);
    properties
}

pub fn normalize_with(raw: RawPropertyRecord, options: &NormalizeOptions) -> CanonicalProperty {
    let id = raw
        .id
        .and_then(Loose::valid)
        .map(|id| id.to_string())
        .unwrap_or_default();

    let bedroom_types = normalize_bedroom_types(&id, raw.bedroom_types);
    let amenities: Vec<String> = string_list(raw.amenities)
        .into_iter()
        .filter(|a| !a.trim().is_empty())
        .collect();

    let mut images = string_list(raw.image_urls);
    if images.is_empty() {
        images.push(options.placeholder_image.clone());
    }

    CanonicalProperty {
        title: text(raw.title),
        location: text(raw.location),
        description: text(raw.description),
        property_type: PropertyType::default(),
        bedroom_types,
        amenities,
        images,
        price: raw
            .price
            .and_then(Loose::valid)
            .and_then(|p| p.to_f64())
            .unwrap_or(0.0),
        price_text: optional_text(raw.price_text),
        whatsapp_number: text(raw.whatsapp_number),
        google_maps_link: optional_text(raw.google_maps_link),
        youtube_video_url: optional_text(raw.youtube_video_url),
        brochure_urls: string_list(raw.brochure_urls),
        created_at: raw.created_at.and_then(Loose::valid),
        updated_at: raw.updated_at.and_then(Loose::valid),
        id,
    }
}

fn normalize_bedroom_types(id: &str, field: Option<Loose<Vec<Value>>>) -> Vec<BedroomType> {
    let entries = field.and_then(Loose::valid).unwrap_or_default();
    let total = entries.len();

    let kept: Vec<BedroomType> = entries
        .into_iter()
        .filter_map(RawBedroomType::from_entry)
        .filter_map(bedroom_type)
        .collect();

    if kept.len() < total {
        debug!(
            "Dropped {} malformed bedroom type(s) from property '{}'",
            total - kept.len(),
            id
        );
    }
    kept
}

fn bedroom_type(raw: RawBedroomType) -> Option<BedroomType> {
    let kind = raw.kind.and_then(Loose::valid)?;
    if kind.trim().is_empty() {
        return None;
    }
    let sqft = raw.sqft.and_then(Loose::valid)?.to_integer()?;
    if sqft <= 0 {
        return None;
    }
    // areas beyond u32 saturate
    let sqft = u32::try_from(sqft).unwrap_or(u32::MAX);
    Some(BedroomType { kind, sqft })
}

fn text(field: Option<Loose<String>>) -> String {
    field.and_then(Loose::valid).unwrap_or_default()
}

/// Blank strings count as absent
fn optional_text(field: Option<Loose<String>>) -> Option<String> {
    field.and_then(Loose::valid).filter(|s| !s.trim().is_empty())
}

/// A list field: keeps string entries in order, drops everything else
fn string_list(field: Option<Loose<Vec<Loose<String>>>>) -> Vec<String> {
    field
        .and_then(Loose::valid)
        .unwrap_or_default()
        .into_iter()
        .filter_map(Loose::valid)
        .collect()
}
