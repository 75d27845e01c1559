use thiserror::Error;

/// Raised for input that is empty once surrounding whitespace is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("empty input")]
pub struct ValidationError;

/// Trim a pasted link and reject it if nothing is left.
///
/// No URL-shape checks happen here; the backend decides what it can extract.
pub fn validate_query(raw: &str) -> Result<&str, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError);
    }
    Ok(trimmed)
}
