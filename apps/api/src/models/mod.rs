pub mod account;
pub mod contact;
pub mod interaction;
pub mod status;
pub mod tag;

use crate::errors::AppError;

/// Trims an optional free-text field, collapsing blank input to `None`.
pub fn normalize_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Rejects a required text field that is empty after trimming.
pub fn require_text(field: &str, value: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{field} cannot be empty")));
    }
    Ok(trimmed.to_string())
}
