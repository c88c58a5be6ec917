use crate::error::QuoteError;
use crate::pagination::{Page, PageRequest};
use crate::quote::{Quote, QuoteId};
use async_trait::async_trait;

type Result<T> = std::result::Result<T, QuoteError>;

/// Business operations over the quote collection.
///
/// A blank category (empty or whitespace only) means "no filter".
#[async_trait]
pub trait QuoteVault: Send + Sync + 'static {
    /// Validates and stores a new quote, returning it with its assigned id
    /// and timestamps. Invalid input never reaches storage.
    async fn create_quote(&self, text: &str, author: &str, category: &str) -> Result<Quote>;

    /// Fetches a single quote by id.
    async fn get_quote(&self, id: QuoteId) -> Result<Quote>;

    /// Picks a random quote, optionally from one category.
    async fn random_quote(&self, category: Option<&str>) -> Result<Quote>;

    /// Lists quotes newest first, optionally from one category.
    async fn list_quotes(&self, page: PageRequest, category: Option<&str>) -> Result<Page<Quote>>;

    /// Searches text, author and category. A blank term lists everything.
    async fn search_quotes(&self, term: &str, page: PageRequest) -> Result<Page<Quote>>;

    /// Returns the distinct categories in sorted order.
    async fn categories(&self) -> Result<Vec<String>>;

    /// Reports whether the underlying storage is reachable.
    async fn health(&self) -> Result<()>;
}
