//! Reusable field validators
//!
//! Each factory returns a check carrying the user-facing message it reports.

/// Validator: field must be present and not blank
pub fn required(
    message: &'static str,
) -> impl Fn(Option<&str>) -> Result<(), String> + Send + Sync + Clone {
    move |value: Option<&str>| match value {
        Some(v) if !v.trim().is_empty() => Ok(()),
        _ => Err(message.to_string()),
    }
}

/// Validator: whole number must be strictly greater than zero
pub fn positive(message: &'static str) -> impl Fn(i64) -> Result<(), String> + Send + Sync + Clone {
    move |num: i64| {
        if num > 0 {
            Ok(())
        } else {
            Err(message.to_string())
        }
    }
}

/// Validator: value must be in allowed list
pub fn in_list(
    allowed: &'static [&'static str],
    message: &'static str,
) -> impl Fn(Option<&str>) -> Result<(), String> + Send + Sync + Clone {
    move |value: Option<&str>| match value {
        Some(v) if allowed.contains(&v) => Ok(()),
        _ => Err(message.to_string()),
    }
}

/// Coerce text to a finite number
///
/// Blank text coerces to zero, like a numeric input left empty.
pub fn coerce_number(value: Option<&str>) -> Option<f64> {
    let text = value.unwrap_or("").trim();
    if text.is_empty() {
        return Some(0.0);
    }
    text.parse::<f64>().ok().filter(|n| n.is_finite())
}
