use crate::models::CanonicalProperty;
use anyhow::{anyhow, Context, Result};
use reqwest::Url;

const WHATSAPP_BASE: &str = "https://wa.me/";
const CRORE: f64 = 10_000_000.0;
const LAKH: f64 = 100_000.0;

/// Indian-style price label: "₹1.2 Crore", "₹45.0 Lakh", "₹95,000"
pub fn format_price(price: f64) -> String {
    if price >= CRORE {
        format!("₹{:.1} Crore", price / CRORE)
    } else if price >= LAKH {
        format!("₹{:.1} Lakh", price / LAKH)
    } else {
        format!("₹{}", group_thousands(price))
    }
}

/// "1234.5" -> "1,234.5": comma groups, at most three decimals
fn group_thousands(value: f64) -> String {
    let fixed = format!("{:.3}", value.abs());
    let (digits, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let mut grouped = String::with_capacity(fixed.len() + digits.len() / 3 + 1);
    if value < 0.0 && fixed.chars().any(|c| c != '0' && c != '.') {
        grouped.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if !fraction.is_empty() {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}

/// Price as shown to users; the listing's own price text wins when set
pub fn display_price(property: &CanonicalProperty) -> String {
    match property.price_text.as_deref() {
        Some(text) if !text.trim().is_empty() => text.to_string(),
        _ => format_price(property.price),
    }
}

/// Pre-filled enquiry sent over WhatsApp
pub fn contact_message(property: &CanonicalProperty) -> String {
    format!(
        "Hi! I'm interested in this property: {} located in {}. Price: {}. Could you please provide more details?",
        property.title,
        property.location,
        display_price(property)
    )
}

/// `https://wa.me/<number>?text=<message>` deep link for a listing.
/// The number is used as stored.
pub fn whatsapp_link(property: &CanonicalProperty) -> Result<Url> {
    let mut url = Url::parse(WHATSAPP_BASE).context("Invalid WhatsApp base URL")?;
    url.path_segments_mut()
        .map_err(|_| anyhow!("WhatsApp base URL cannot take a path"))?
        .clear()
        .push(&property.whatsapp_number);
    url.query_pairs_mut()
        .append_pair("text", &contact_message(property));
    Ok(url)
}
