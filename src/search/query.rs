use crate::models::CanonicalProperty;

/// Words that split "feature <sep> location" queries
const SEPARATORS: [&str; 3] = ["in", "at", "near"];

/// A single search term
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    /// "2bhk", "3 bed", "2 bhk flat": `count` is the leading digit run,
    /// `raw` the whole term for the literal fallback
    Bedrooms { count: String, raw: String },
    /// Plain substring
    Text(String),
}

/// How a free-text query is evaluated against a listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedQuery {
    /// Blank query, everything matches
    Empty,
    /// "2bhk in pune": feature term plus a location phrase
    Compound { feature: Term, location: String },
    Simple(Term),
}

impl ParsedQuery {
    pub fn parse(query: &str) -> Self {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return ParsedQuery::Empty;
        }

        if let Some((feature, location)) = split_compound(&query) {
            return ParsedQuery::Compound {
                feature: Term::parse(feature),
                location: location.to_string(),
            };
        }

        ParsedQuery::Simple(Term::parse(&query))
    }

    pub fn matches(&self, property: &CanonicalProperty) -> bool {
        match self {
            ParsedQuery::Empty => true,
            ParsedQuery::Compound { feature, location } => {
                feature.matches(property) && property.location.to_lowercase().contains(location)
            }
            ParsedQuery::Simple(term) => term.matches(property),
        }
    }
}

impl Term {
    /// `text` must already be trimmed and lower-cased.
    fn parse(text: &str) -> Self {
        match bedroom_count(text) {
            Some(count) => Term::Bedrooms {
                count: count.to_string(),
                raw: text.to_string(),
            },
            None => Term::Text(text.to_string()),
        }
    }

    fn matches(&self, property: &CanonicalProperty) -> bool {
        match self {
            Term::Bedrooms { count, raw } => {
                let labels = property.bedroom_labels().to_lowercase();
                [
                    format!("{} bed", count),
                    format!("{}bhk", count),
                    format!("{} bhk", count),
                ]
                .iter()
                .any(|form| labels.contains(form.as_str()))
                    || property.search_text().contains(raw.as_str())
            }
            Term::Text(text) => property.search_text().contains(text.as_str()),
        }
    }
}

/// Leading digit run of "2bhk", "2 bed", "3  bhk ..." style terms
fn bedroom_count(text: &str) -> Option<&str> {
    let digits_end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    if digits_end == 0 {
        return None;
    }
    let rest = text[digits_end..].trim_start();
    if rest.starts_with("bhk") || rest.starts_with("bed") {
        Some(&text[..digits_end])
    } else {
        None
    }
}

/// Byte range of the first separator word with whitespace on both sides
fn find_separator(text: &str) -> Option<(usize, usize)> {
    SEPARATORS
        .iter()
        .flat_map(|&sep| {
            text.match_indices(sep).filter_map(move |(start, _)| {
                let end = start + sep.len();
                let before = text[..start].chars().next_back()?;
                let after = text[end..].chars().next()?;
                (before.is_whitespace() && after.is_whitespace()).then_some((start, end))
            })
        })
        .min_by_key(|(start, _)| *start)
}

/// Split on the first separator. Anything after a second separator is
/// dropped, so "2bhk in bandra in mumbai" searches for "bandra".
fn split_compound(query: &str) -> Option<(&str, &str)> {
    let (start, end) = find_separator(query)?;
    let feature = query[..start].trim();
    let rest = &query[end..];
    let location = match find_separator(rest) {
        Some((next, _)) => rest[..next].trim(),
        None => rest.trim(),
    };

    if feature.is_empty() || location.is_empty() {
        return None;
    }
    Some((feature, location))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_blank() {
        assert_eq!(ParsedQuery::parse(""), ParsedQuery::Empty);
        assert_eq!(ParsedQuery::parse(" \t\n "), ParsedQuery::Empty);
    }

    #[test]
    fn test_parse_compound() {
        assert_eq!(
            ParsedQuery::parse("  2BHK in Mumbai "),
            ParsedQuery::Compound {
                feature: Term::Bedrooms { count: "2".into(), raw: "2bhk".into() },
                location: "mumbai".into(),
            }
        );
        assert_eq!(
            ParsedQuery::parse("villa near lonavala"),
            ParsedQuery::Compound {
                feature: Term::Text("villa".into()),
                location: "lonavala".into(),
            }
        );
    }

    #[test]
    fn test_parse_compound_uses_first_separator_only() {
        assert_eq!(
            ParsedQuery::parse("flat at bandra in mumbai"),
            ParsedQuery::Compound {
                feature: Term::Text("flat".into()),
                location: "bandra".into(),
            }
        );
    }

    #[test]
    fn test_separator_needs_surrounding_whitespace() {
        assert_eq!(
            ParsedQuery::parse("flat marina"),
            ParsedQuery::Simple(Term::Text("flat marina".into()))
        );
        assert_eq!(
            ParsedQuery::parse("in mumbai"),
            ParsedQuery::Simple(Term::Text("in mumbai".into()))
        );
        assert_eq!(
            ParsedQuery::parse("2bhk in"),
            ParsedQuery::Simple(Term::Bedrooms { count: "2".into(), raw: "2bhk in".into() })
        );
    }

    #[test]
    fn test_empty_location_falls_through() {
        assert_eq!(
            ParsedQuery::parse("villa in in goa"),
            ParsedQuery::Simple(Term::Text("villa in in goa".into()))
        );
    }

    #[test]
    fn test_parse_bedroom_shorthand() {
        assert_eq!(
            ParsedQuery::parse("3 Bed"),
            ParsedQuery::Simple(Term::Bedrooms { count: "3".into(), raw: "3 bed".into() })
        );
        assert_eq!(bedroom_count("12bhk"), Some("12"));
        assert_eq!(bedroom_count("2 bedroom"), Some("2"));
        assert_eq!(bedroom_count("bhk"), None);
        assert_eq!(bedroom_count("2 bath"), None);
        assert_eq!(bedroom_count("a 2bhk"), None);
    }
}
