use serde::{Deserialize, Serialize};

/// Why an admin draft cannot be saved
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum DraftError {
    #[error("Missing required field: {0}")]
    Missing(&'static str),

    #[error("Invalid price: {0:?}")]
    InvalidPrice(String),

    #[error("Invalid square footage {sqft:?} for bedroom type {kind:?}")]
    InvalidSqft { kind: String, sqft: String },

    #[error("Bedroom type row {0} has square footage but no type")]
    UnnamedBedroomType(usize),
}

/// A bedroom type row of the admin form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DraftBedroomType {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub sqft: String,
}

/// Listing as typed into the admin form; every input is text
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingDraft {
    pub title: String,
    pub price: String,
    pub price_text: String,
    pub location: String,
    pub description: String,
    pub whatsapp_number: String,
    /// Comma separated
    pub image_urls: String,
    pub bedroom_types: Vec<DraftBedroomType>,
    pub amenities: Vec<String>,
    pub google_maps_link: String,
    pub youtube_video_url: String,
    pub brochure_urls: Vec<String>,
}

/// Row written to the store on create or update
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewListing {
    pub title: String,
    pub price: f64,
    /// Sent as `null` when blank so an update clears the stored label
    pub price_text: Option<String>,
    pub location: String,
    pub description: String,
    pub whatsapp_number: String,
    pub image_urls: Vec<String>,
    pub bedroom_types: Vec<StoredBedroomType>,
    pub amenities: Vec<String>,
    pub google_maps_link: Option<String>,
    pub youtube_video_url: Option<String>,
    pub brochure_urls: Vec<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StoredBedroomType {
    #[serde(rename = "type")]
    pub kind: String,
    pub sqft: u32,
}

impl ListingDraft {
    pub fn validate(&self) -> Result<NewListing, DraftError> {
        let title = required("title", &self.title)?;
        let location = required("location", &self.location)?;
        let whatsapp_number = required("whatsapp_number", &self.whatsapp_number)?;

        let price = match self.price.trim() {
            "" => 0.0,
            text => text
                .parse::<f64>()
                .ok()
                .filter(|p| p.is_finite() && *p >= 0.0)
                .ok_or_else(|| DraftError::InvalidPrice(self.price.clone()))?,
        };

        let mut bedroom_types = Vec::new();
        for (idx, row) in self.bedroom_types.iter().enumerate() {
            let kind = row.kind.trim();
            let sqft = row.sqft.trim();
            match (kind.is_empty(), sqft.is_empty()) {
                (true, true) => continue,
                (true, false) => return Err(DraftError::UnnamedBedroomType(idx)),
                _ => {}
            }
            let parsed = sqft
                .parse::<u32>()
                .ok()
                .filter(|s| *s > 0)
                .ok_or_else(|| DraftError::InvalidSqft {
                    kind: kind.to_string(),
                    sqft: row.sqft.clone(),
                })?;
            bedroom_types.push(StoredBedroomType {
                kind: kind.to_string(),
                sqft: parsed,
            });
        }

        Ok(NewListing {
            title,
            price,
            price_text: optional(&self.price_text),
            location,
            description: self.description.trim().to_string(),
            whatsapp_number,
            image_urls: self
                .image_urls
                .split(',')
                .map(str::trim)
                .filter(|url| !url.is_empty())
                .map(String::from)
                .collect(),
            bedroom_types,
            amenities: non_blank(&self.amenities),
            google_maps_link: optional(&self.google_maps_link),
            youtube_video_url: optional(&self.youtube_video_url),
            brochure_urls: non_blank(&self.brochure_urls),
        })
    }
}

fn required(field: &'static str, value: &str) -> Result<String, DraftError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DraftError::Missing(field));
    }
    Ok(value.to_string())
}

fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn non_blank(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::raw_rows_from_json;
    use crate::normalizer::normalize;

    fn draft() -> ListingDraft {
        ListingDraft {
            title: " Spacious 3BHK Family Home ".to_string(),
            price: "8500000".to_string(),
            location: "Koregaon Park, Pune".to_string(),
            whatsapp_number: "919876543210".to_string(),
            image_urls: "https://img/1.jpg, ,https://img/2.jpg,".to_string(),
            bedroom_types: vec![
                DraftBedroomType { kind: "3 BHK".to_string(), sqft: "1800".to_string() },
                DraftBedroomType::default(),
            ],
            amenities: vec!["Gym".to_string(), "  ".to_string(), "Garden Area".to_string()],
            ..ListingDraft::default()
        }
    }

    #[test]
    fn test_valid_draft() {
        let listing = draft().validate().unwrap();
        assert_eq!(listing.title, "Spacious 3BHK Family Home");
        assert_eq!(listing.price, 8_500_000.0);
        assert_eq!(listing.image_urls, vec!["https://img/1.jpg", "https://img/2.jpg"]);
        assert_eq!(
            listing.bedroom_types,
            vec![StoredBedroomType { kind: "3 BHK".to_string(), sqft: 1800 }]
        );
        assert_eq!(listing.amenities, vec!["Gym", "Garden Area"]);
        assert_eq!(listing.google_maps_link, None);
        assert_eq!(listing.price_text, None);
    }

    #[test]
    fn test_blank_optionals_serialize_as_null() {
        let mut d = draft();
        d.price_text = "  ".to_string();
        let body = serde_json::to_value(d.validate().unwrap()).unwrap();

        assert_eq!(body["price_text"], serde_json::Value::Null);
        assert_eq!(body["google_maps_link"], serde_json::Value::Null);
        assert_eq!(body["youtube_video_url"], serde_json::Value::Null);

        d.price_text = "85 L onwards".to_string();
        let body = serde_json::to_value(d.validate().unwrap()).unwrap();
        assert_eq!(body["price_text"], "85 L onwards");
    }

    #[test]
    fn test_required_fields() {
        let mut d = draft();
        d.location = "   ".to_string();
        assert_eq!(d.validate(), Err(DraftError::Missing("location")));

        let mut d = draft();
        d.whatsapp_number.clear();
        assert_eq!(d.validate(), Err(DraftError::Missing("whatsapp_number")));
    }

    #[test]
    fn test_price_rules() {
        let mut d = draft();
        d.price = String::new();
        assert_eq!(d.validate().unwrap().price, 0.0);

        d.price = "-1".to_string();
        assert_eq!(d.validate(), Err(DraftError::InvalidPrice("-1".to_string())));

        d.price = "85 lakh".to_string();
        assert!(matches!(d.validate(), Err(DraftError::InvalidPrice(_))));
    }

    #[test]
    fn test_bedroom_rows() {
        let mut d = draft();
        d.bedroom_types.push(DraftBedroomType { kind: "Studio".to_string(), sqft: "0".to_string() });
        assert_eq!(
            d.validate(),
            Err(DraftError::InvalidSqft { kind: "Studio".to_string(), sqft: "0".to_string() })
        );

        let mut d = draft();
        d.bedroom_types.push(DraftBedroomType { kind: String::new(), sqft: "500".to_string() });
        assert_eq!(d.validate(), Err(DraftError::UnnamedBedroomType(2)));
    }

    #[test]
    fn test_saved_row_normalizes_back() {
        let listing = draft().validate().unwrap();
        let json = serde_json::to_string(&vec![&listing]).unwrap();
        let rows = raw_rows_from_json(&json).unwrap();
        let property = normalize(rows.into_iter().next().unwrap());

        assert_eq!(property.title, listing.title);
        assert_eq!(property.bedroom_types[0].kind, "3 BHK");
        assert_eq!(property.bedroom_types[0].sqft, 1800);
        assert_eq!(property.images, listing.image_urls);
        assert_eq!(property.amenities, listing.amenities);
    }

    #[test]
    fn test_draft_from_json_defaults_missing_fields() {
        let d: ListingDraft = serde_json::from_str(r#"{"title": "Plot"}"#).unwrap();
        assert_eq!(d.title, "Plot");
        assert!(d.bedroom_types.is_empty());
        assert_eq!(d.validate(), Err(DraftError::Missing("location")));
    }
}
