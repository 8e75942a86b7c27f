//! Request checks shared by the HTTP handlers. Every failure is an
//! `AppError::Validation` raised before any work starts, so callers never see a
//! partial result.

use crate::errors::AppError;

pub fn require_text(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// At least one non-blank keyword.
pub fn require_keywords(field: &str, keywords: &[String]) -> Result<(), AppError> {
    if keywords.iter().all(|k| k.trim().is_empty()) {
        return Err(AppError::Validation(format!(
            "{field} must contain at least one non-empty keyword"
        )));
    }
    Ok(())
}

/// Resolves an optional client-supplied count: absent means `default`, negative or
/// above `max` is rejected.
pub fn bounded_count(
    field: &str,
    requested: Option<i64>,
    default: usize,
    max: usize,
) -> Result<usize, AppError> {
    let Some(requested) = requested else {
        return Ok(default.min(max));
    };
    if requested < 0 {
        return Err(AppError::Validation(format!("{field} must be >= 0")));
    }
    match usize::try_from(requested) {
        Ok(n) if n <= max => Ok(n),
        _ => Err(AppError::Validation(format!("{field} must be <= {max}"))),
    }
}
