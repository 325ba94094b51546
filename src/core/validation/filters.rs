//! Reusable field filters
//!
//! These filters normalize submitted text before validation

/// Filter: trim whitespace from text
pub fn trim() -> impl Fn(Option<&str>) -> Option<String> + Send + Sync + Clone {
    |value: Option<&str>| value.map(|s| s.trim().to_string())
}

/// Filter: convert text to lowercase
pub fn lowercase() -> impl Fn(Option<&str>) -> Option<String> + Send + Sync + Clone {
    |value: Option<&str>| value.map(|s| s.to_lowercase())
}
