//! Client-side validation of user input.
//!
//! Anything rejected here never reaches the network layer.

use thiserror::Error;

/// Input rejected before any request is issued.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a URL.")]
    EmptyUrl,

    #[error("URL must start with http:// or https://")]
    MissingScheme,

    #[error("Enter a URL before running traceroute.")]
    MissingTracerouteTarget,
}

/// Validate a URL typed by the user and return it trimmed.
///
/// Accepts anything of the form `http://…` or `https://…` (scheme is
/// case-insensitive) with at least one character after the `//`.
///
/// ```
/// use sitescope::input::{validate_url, ValidationError};
///
/// assert_eq!(validate_url("  https://example.com ").unwrap(), "https://example.com");
/// assert_eq!(validate_url("example.com"), Err(ValidationError::MissingScheme));
/// ```
pub fn validate_url(input: &str) -> Result<String, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyUrl);
    }

    let lower = trimmed.to_ascii_lowercase();
    let rest = lower
        .strip_prefix("https://")
        .or_else(|| lower.strip_prefix("http://"));

    match rest {
        Some(rest) if !rest.is_empty() => Ok(trimmed.to_string()),
        _ => Err(ValidationError::MissingScheme),
    }
}
