use crate::error::StorageError;
use crate::quote::{NewQuote, Quote, QuoteId};
use async_trait::async_trait;

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// A read-only view of a quote repository.
///
/// Listings are ordered most-recent-first by `created_at`, ties broken by
/// `id` descending. Category filters are exact, case-sensitive matches.
#[async_trait]
pub trait ReadRepository: Send + Sync + 'static {
    /// Retrieves a quote by id. Returns `Err(NotFound)` if it does not exist.
    async fn get_by_id(&self, id: QuoteId) -> Result<Quote>;

    /// Picks a quote at random, optionally restricted to one category.
    ///
    /// Every matching quote has a non-zero chance of being picked. Returns
    /// `Err(NotFound)` when nothing matches.
    async fn get_random(&self, category: Option<&str>) -> Result<Quote>;

    /// Lists one window of quotes, optionally restricted to one category.
    async fn get_all(&self, category: Option<&str>, limit: u32, offset: u64)
        -> Result<Vec<Quote>>;

    /// Counts the quotes matching the category filter, ignoring any window.
    async fn get_count(&self, category: Option<&str>) -> Result<u64>;

    /// Returns the distinct non-empty categories in byte order.
    async fn get_categories(&self) -> Result<Vec<String>>;

    /// Case-insensitive substring search over text, author and category.
    ///
    /// The term is matched literally. A blank term matches every quote.
    async fn search(&self, term: &str, limit: u32, offset: u64) -> Result<Vec<Quote>>;

    /// Counts the quotes [`search`](Self::search) would match without a window.
    async fn search_count(&self, term: &str) -> Result<u64>;

    /// Checks that the backing store is reachable.
    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

#[async_trait]
pub trait Repository: ReadRepository {
    /// Stores a validated quote in a single atomic insert and returns it with
    /// the assigned id and timestamps.
    async fn create(&self, quote: NewQuote) -> Result<Quote>;
}

/// Lowercased, trimmed search needle, or `None` when the term is blank.
pub fn normalize_search_term(term: &str) -> Option<String> {
    let term = term.trim();
    (!term.is_empty()).then(|| term.to_lowercase())
}

/// Separates the fields of a [`search_key`] so a needle cannot match across
/// a field boundary.
pub const SEARCH_KEY_SEPARATOR: char = '\u{1f}';

/// The haystack every backend matches a normalized search term against.
///
/// Each field is lowercased with Unicode case mapping on its own, so SQL
/// backends can store this value and compare it with a plain `LIKE` instead
/// of relying on the database's own, often ASCII-only, case folding.
pub fn search_key(text: &str, author: &str, category: &str) -> String {
    let mut key = String::with_capacity(text.len() + author.len() + category.len() + 2);
    for (i, field) in [text, author, category].into_iter().enumerate() {
        if i > 0 {
            key.push(SEARCH_KEY_SEPARATOR);
        }
        key.push_str(&field.to_lowercase());
    }
    key
}
