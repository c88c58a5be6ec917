use crate::error::ValidationError;
use crate::validator;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Surrogate key assigned by storage on creation.
pub type QuoteId = i64;

/// A stored quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub id: QuoteId,
    pub text: String,
    pub author: String,
    pub category: String,
    pub created_at: Timestamp,
    /// Equal to `created_at`; quotes are never updated.
    pub updated_at: Timestamp,
}

/// Validated input for creating a quote.
///
/// The only way to obtain a `NewQuote` is through [`NewQuote::new`], so a
/// repository receiving one can rely on every field being trimmed and within
/// bounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuote {
    text: String,
    author: String,
    category: String,
}

impl NewQuote {
    /// Validates the raw fields and keeps their trimmed form.
    pub fn new(
        text: impl AsRef<str>,
        author: impl AsRef<str>,
        category: impl AsRef<str>,
    ) -> Result<Self, ValidationError> {
        let (text, author, category) = (
            text.as_ref().trim(),
            author.as_ref().trim(),
            category.as_ref().trim(),
        );
        validator::validate_quote(text, author, category)?;

        Ok(Self {
            text: text.to_owned(),
            author: author.to_owned(),
            category: category.to_owned(),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// Builds the stored record once storage has assigned an id and timestamp.
    pub fn into_quote(self, id: QuoteId, created_at: Timestamp) -> Quote {
        Quote {
            id,
            text: self.text,
            author: self.author,
            category: self.category,
            created_at,
            updated_at: created_at,
        }
    }
}
