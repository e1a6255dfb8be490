pub mod filters;
pub mod query;

pub use filters::{apply_filters, SearchFilters};
pub use query::{ParsedQuery, Term};

use crate::models::CanonicalProperty;
use tracing::debug;

/// Listings matching a free-text query, in their original order.
///
/// A blank query returns every listing. The input is never reordered or
/// modified.
pub fn filter(records: &[CanonicalProperty], query: &str) -> Vec<CanonicalProperty> {
    filter_refs(records, query).into_iter().cloned().collect()
}

/// Borrowing variant of [`filter`]
pub fn filter_refs<'a>(records: &'a [CanonicalProperty], query: &str) -> Vec<&'a CanonicalProperty> {
    let parsed = ParsedQuery::parse(query);
    if parsed == ParsedQuery::Empty {
        return records.iter().collect();
    }

    let matches: Vec<_> = records.iter().filter(|r| parsed.matches(r)).collect();
    debug!(
        "Query {:?} parsed as {:?}: {} of {} listings match",
        query,
        parsed,
        matches.len(),
        records.len()
    );
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BedroomType, PropertyType};

    fn listing(id: &str, title: &str, location: &str, description: &str, beds: &[&str]) -> CanonicalProperty {
        CanonicalProperty {
            id: id.to_string(),
            title: title.to_string(),
            location: location.to_string(),
            description: description.to_string(),
            property_type: PropertyType::Residential,
            bedroom_types: beds
                .iter()
                .map(|b| BedroomType { kind: b.to_string(), sqft: 900 })
                .collect(),
            amenities: vec![],
            images: vec!["/placeholder.svg".to_string()],
            price: 0.0,
            price_text: None,
            whatsapp_number: "919876543210".to_string(),
            google_maps_link: None,
            youtube_video_url: None,
            brochure_urls: vec![],
            created_at: None,
            updated_at: None,
        }
    }

    fn ids(found: &[CanonicalProperty]) -> Vec<&str> {
        found.iter().map(|p| p.id.as_str()).collect()
    }

    fn catalogue() -> Vec<CanonicalProperty> {
        vec![
            listing("1", "Luxury Apartment in Bandra West", "Bandra West, Mumbai", "Open plan living", &["2 BHK", "3 BHK"]),
            listing("2", "Stunning Villa with Pool", "Gurgaon, Delhi NCR", "Private pool", &["4 Bed"]),
            listing("3", "Cozy Flat Near IT Hub", "Whitefield, Bangalore", "Close to Whitefield tech parks", &["1 BHK"]),
            listing("4", "Spacious Family Home", "Koregaon Park, Pune", "Near schools", &["2 BHK"]),
            listing("5", "Premium Sea View", "Marine Drive, Mumbai", "Panoramic views", &["2BHK"]),
        ]
    }

    #[test]
    fn test_blank_query_is_identity() {
        let all = catalogue();
        assert_eq!(filter(&all, ""), all);
        assert_eq!(filter(&all, "   "), all);
    }

    #[test]
    fn test_plain_text_is_case_insensitive_substring() {
        let all = catalogue();
        assert_eq!(ids(&filter(&all, "WHITEFIELD")), vec!["3"]);
        assert_eq!(ids(&filter(&all, "mumbai")), vec!["1", "5"]);
        assert!(filter(&all, "penthouse").is_empty());
    }

    #[test]
    fn test_compound_query_requires_location() {
        let all = catalogue();
        assert_eq!(ids(&filter(&all, "2bhk in pune")), vec!["4"]);
        assert_eq!(ids(&filter(&all, "2bhk in mumbai")), vec!["1", "5"]);
        assert!(filter(&all, "4 bed in mumbai").is_empty());
        assert_eq!(ids(&filter(&all, "pool near delhi")), vec!["2"]);
    }

    #[test]
    fn test_compound_location_matches_location_field_only() {
        let all = catalogue();
        // "tech" only appears in a description
        assert!(filter(&all, "flat in tech").is_empty());
    }

    #[test]
    fn test_bedroom_shorthand_forms() {
        let all = catalogue();
        assert_eq!(ids(&filter(&all, "2bhk")), vec!["1", "4", "5"]);
        assert_eq!(ids(&filter(&all, "2 bhk")), vec!["1", "4", "5"]);
        assert_eq!(ids(&filter(&all, "4 bed")), vec!["2"]);
        // the "bed" and "bhk" spellings are interchangeable
        assert_eq!(ids(&filter(&all, "4bhk")), vec!["2"]);
        assert!(filter(&all, "5 bhk").is_empty());
    }

    #[test]
    fn test_bed_shorthand_is_exact_substring() {
        let homes = vec![
            listing("a", "Row house", "Goa", "", &["3 Bedroom"]),
            listing("b", "Row house", "Goa", "", &["3-Bedroom"]),
            listing("c", "Row house", "Goa", "", &["Three Bed"]),
        ];
        assert_eq!(ids(&filter(&homes, "3 bed")), vec!["a"]);
    }

    #[test]
    fn test_bedroom_fallback_matches_literal_text() {
        let homes = vec![listing("a", "Two 3bedder cottages", "Ooty", "", &[])];
        assert_eq!(ids(&filter(&homes, "3bedder")), vec!["a"]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let all = catalogue();
        for query in ["2bhk", "mumbai", "2bhk in mumbai", "pool", "x"] {
            let once = filter(&all, query);
            assert_eq!(filter(&once, query), once, "query {:?}", query);
        }
    }

    #[test]
    fn test_filter_refs_borrows_input() {
        let all = catalogue();
        let found = filter_refs(&all, "bangalore");
        assert_eq!(found.len(), 1);
        assert!(std::ptr::eq(found[0], &all[2]));
    }
}
