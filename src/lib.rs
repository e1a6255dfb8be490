//! Property listing browser: normalizes raw listing rows from a store and
//! filters them with free-text queries such as "2bhk in pune".

pub mod admin;
pub mod config;
pub mod contact;
pub mod models;
pub mod normalizer;
pub mod search;
pub mod sources;

pub use models::{CanonicalProperty, RawPropertyRecord};
pub use normalizer::normalize;
pub use search::filter;
