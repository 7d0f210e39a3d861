//! Field validation for user-supplied task fields.
//!
//! The character whitelist allows Spanish accents and basic punctuation;
//! anything else (angle brackets, braces, control characters) is rejected
//! before a value reaches a store.

use regex::Regex;
use thiserror::Error;

/// Title length bounds (inclusive).
const TITLE_MIN: usize = 3;
const TITLE_MAX: usize = 100;

/// Maximum description length; descriptions are optional.
const DESCRIPTION_MAX: usize = 500;

/// Validation failures, with user-facing Spanish messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Este campo no puede estar vacío")]
    Empty,

    #[error("Solo se permiten caracteres alfanuméricos y signos de puntuación básicos")]
    InvalidCharacters,

    #[error("El título debe tener al menos 3 caracteres")]
    TitleTooShort,

    #[error("El título no puede exceder los 100 caracteres")]
    TitleTooLong,

    #[error("La descripción no puede exceder los 500 caracteres")]
    DescriptionTooLong,
}

fn alphanumeric_pattern() -> Regex {
    // Alphanumeric plus Spanish accents and basic punctuation.
    Regex::new(r"^[a-zA-Z0-9áéíóúÁÉÍÓÚñÑüÜ\s.,!?()-]+$").expect("valid pattern")
}

fn validate_alphanumeric(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Empty);
    }

    if !alphanumeric_pattern().is_match(value) {
        return Err(ValidationError::InvalidCharacters);
    }

    Ok(())
}

/// Validate a task title: non-empty, whitelisted characters, 3..=100 chars.
pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    validate_alphanumeric(title)?;

    let len = title.chars().count();
    if len < TITLE_MIN {
        return Err(ValidationError::TitleTooShort);
    }
    if len > TITLE_MAX {
        return Err(ValidationError::TitleTooLong);
    }

    Ok(())
}

/// Validate a task description. Empty descriptions are valid.
pub fn validate_description(description: &str) -> Result<(), ValidationError> {
    if description.trim().is_empty() {
        return Ok(());
    }

    validate_alphanumeric(description)?;

    if description.chars().count() > DESCRIPTION_MAX {
        return Err(ValidationError::DescriptionTooLong);
    }

    Ok(())
}
