use crate::models::CanonicalProperty;
use serde::{Deserialize, Serialize};

/// Location value meaning "no location filter"
pub const ANY_LOCATION: &str = "All";

/// Everything the browse page can narrow listings by
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchFilters {
    /// Free-text query, see [`super::filter`]
    #[serde(default)]
    pub query: String,
    /// Substring of the location field (case-sensitive)
    pub location: Option<String>,
    /// Minimum advisory price
    pub min_price: Option<f64>,
    /// Maximum advisory price
    pub max_price: Option<f64>,
}

impl SearchFilters {
    pub fn query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    fn accepts(&self, property: &CanonicalProperty) -> bool {
        if let Some(location) = self.location.as_deref() {
            if !location.is_empty()
                && location != ANY_LOCATION
                && !property.location.contains(location)
            {
                return false;
            }
        }
        if self.min_price.is_some_and(|min| property.price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| property.price > max) {
            return false;
        }
        true
    }
}

/// Free-text query first, then location and price bounds. Order is preserved.
pub fn apply_filters<'a>(
    records: &'a [CanonicalProperty],
    filters: &SearchFilters,
) -> Vec<&'a CanonicalProperty> {
    super::filter_refs(records, &filters.query)
        .into_iter()
        .filter(|p| filters.accepts(p))
        .collect()
}
