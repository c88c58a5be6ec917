//! Field constraints for quote input.
//!
//! Lengths are counted in Unicode code points after trimming surrounding
//! whitespace. Fields are checked in the order text, author, category and the
//! first failure is returned.

use crate::error::{Field, ValidationError, ValidationErrorKind};

pub const TEXT_MIN_LENGTH: usize = 10;
pub const TEXT_MAX_LENGTH: usize = 1000;
pub const AUTHOR_MAX_LENGTH: usize = 100;
pub const CATEGORY_MAX_LENGTH: usize = 50;

type Result = std::result::Result<(), ValidationError>;

/// Validates a complete quote.
pub fn validate_quote(text: &str, author: &str, category: &str) -> Result {
    validate_text(text)?;
    validate_author(author)?;
    validate_category(category)
}

pub fn validate_text(text: &str) -> Result {
    let length = non_empty_length(Field::Text, text)?;
    if length < TEXT_MIN_LENGTH {
        return Err(ValidationError::new(
            Field::Text,
            ValidationErrorKind::TooShort {
                min: TEXT_MIN_LENGTH,
                actual: length,
            },
        ));
    }
    max_length(Field::Text, length, TEXT_MAX_LENGTH)
}

pub fn validate_author(author: &str) -> Result {
    let length = non_empty_length(Field::Author, author)?;
    max_length(Field::Author, length, AUTHOR_MAX_LENGTH)
}

pub fn validate_category(category: &str) -> Result {
    let length = non_empty_length(Field::Category, category)?;
    max_length(Field::Category, length, CATEGORY_MAX_LENGTH)?;

    if !category
        .trim()
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == ' ' || c == '-')
    {
        return Err(ValidationError::new(
            Field::Category,
            ValidationErrorKind::InvalidCharacters,
        ));
    }

    Ok(())
}

/// Returns the code point count of the trimmed value, rejecting blanks.
fn non_empty_length(field: Field, value: &str) -> std::result::Result<usize, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(field, ValidationErrorKind::EmptyField));
    }
    Ok(trimmed.chars().count())
}

fn max_length(field: Field, actual: usize, max: usize) -> Result {
    if actual > max {
        return Err(ValidationError::new(
            field,
            ValidationErrorKind::TooLong { max, actual },
        ));
    }
    Ok(())
}
