use async_trait::async_trait;
use quotevault_core::{
    NewQuote, Page, PageRequest, Quote, QuoteError, QuoteId, QuoteVault, Repository,
};
use std::sync::Arc;
use tracing::{debug, trace};

type Result<T> = std::result::Result<T, QuoteError>;

/// A concrete implementation of the [`QuoteVault`] trait.
///
/// This service wraps a [`Repository`] and owns the business rules:
/// - input validation before anything reaches storage
/// - pagination clamping and offset arithmetic
/// - blank category and blank search term handling
/// - translation of storage errors into [`QuoteError`]
///
/// Repository failures are surfaced immediately; nothing is retried.
#[derive(Debug)]
pub struct QuoteService<R> {
    repository: Arc<R>,
}

impl<R> Clone for QuoteService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: Repository> QuoteService<R> {
    /// Creates a new `QuoteService` over the given repository.
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Returns a reference to the underlying repository.
    pub fn repository(&self) -> &R {
        &self.repository
    }
}

/// Treats an empty or whitespace-only category as "no filter".
fn category_filter(category: Option<&str>) -> Option<&str> {
    category.map(str::trim).filter(|c| !c.is_empty())
}

#[async_trait]
impl<R: Repository> QuoteVault for QuoteService<R> {
    async fn create_quote(&self, text: &str, author: &str, category: &str) -> Result<Quote> {
        let quote = NewQuote::new(text, author, category)?;

        let quote = self.repository.create(quote).await?;
        debug!(id = quote.id, category = %quote.category, "created quote");
        Ok(quote)
    }

    async fn get_quote(&self, id: QuoteId) -> Result<Quote> {
        trace!(id, "fetching quote");
        Ok(self.repository.get_by_id(id).await?)
    }

    async fn random_quote(&self, category: Option<&str>) -> Result<Quote> {
        let category = category_filter(category);
        trace!(category = ?category, "picking random quote");

        self.repository
            .get_random(category)
            .await
            .map_err(|err| match QuoteError::from(err) {
                QuoteError::NotFound(_) => QuoteError::NotFound(match category {
                    Some(category) => format!("no quotes found in category '{category}'"),
                    None => "no quotes found".to_string(),
                }),
                other => other,
            })
    }

    async fn list_quotes(&self, page: PageRequest, category: Option<&str>) -> Result<Page<Quote>> {
        let category = category_filter(category);
        trace!(
            page = page.page(),
            limit = page.limit(),
            category = ?category,
            "listing quotes"
        );

        let quotes = self
            .repository
            .get_all(category, page.limit(), page.offset())
            .await?;
        let total = self.repository.get_count(category).await?;

        Ok(Page::new(quotes, total, page))
    }

    async fn search_quotes(&self, term: &str, page: PageRequest) -> Result<Page<Quote>> {
        let term = term.trim();
        if term.is_empty() {
            return self.list_quotes(page, None).await;
        }
        trace!(term, page = page.page(), limit = page.limit(), "searching quotes");

        let quotes = self
            .repository
            .search(term, page.limit(), page.offset())
            .await?;
        let total = self.repository.search_count(term).await?;

        Ok(Page::new(quotes, total, page))
    }

    async fn categories(&self) -> Result<Vec<String>> {
        Ok(self.repository.get_categories().await?)
    }

    async fn health(&self) -> Result<()> {
        Ok(self.repository.ping().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::Timestamp;
    use quotevault_core::repository::{ReadRepository, Result as StorageResult};
    use quotevault_core::{Field, StorageError, ValidationErrorKind};
    use quotevault_storage::InMemoryRepository;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const TEXT: &str = "Whatever you are, be a good one.";

    fn test_service() -> QuoteService<InMemoryRepository> {
        QuoteService::new(InMemoryRepository::new())
    }

    async fn seed(service: &QuoteService<InMemoryRepository>, category: &str, n: usize) {
        for i in 0..n {
            service
                .create_quote(&format!("Seeded quote number {i}"), "Seeder", category)
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn create_quote_assigns_id_and_timestamp() {
        let service = test_service();
        let before = Timestamp::now();

        let quote = service
            .create_quote(TEXT, "Abraham Lincoln", "motivation")
            .await
            .unwrap();

        assert!(quote.id > 0);
        assert!(quote.created_at >= before);
        assert_eq!(quote.text, TEXT);
        assert_eq!(quote.author, "Abraham Lincoln");
        assert_eq!(quote.category, "motivation");
    }

    #[tokio::test]
    async fn create_quote_stores_trimmed_values() {
        let service = test_service();

        let quote = service
            .create_quote(&format!("  {TEXT}  "), " Lincoln ", " motivation ")
            .await
            .unwrap();

        let stored = service.get_quote(quote.id).await.unwrap();
        assert_eq!(stored.text, TEXT);
        assert_eq!(stored.author, "Lincoln");
        assert_eq!(stored.category, "motivation");
    }

    #[tokio::test]
    async fn invalid_text_is_rejected_without_persisting() {
        let service = test_service();

        for text in ["too short", &"x".repeat(1001)] {
            let err = service
                .create_quote(text, "Someone", "general")
                .await
                .unwrap_err();
            assert!(
                matches!(err, QuoteError::Validation(ref e) if e.field == Field::Text),
                "{err:?}"
            );
        }

        let page = service
            .list_quotes(PageRequest::default(), None)
            .await
            .unwrap();
        assert_eq!(page.total, 0);
    }

    #[tokio::test]
    async fn invalid_category_is_rejected() {
        let service = test_service();

        for category in ["", "   ", "no_underscores", "emoji🙂", &"c".repeat(51)] {
            let err = service
                .create_quote(TEXT, "Someone", category)
                .await
                .unwrap_err();
            assert!(
                matches!(err, QuoteError::Validation(ref e) if e.field == Field::Category),
                "{category:?}: {err:?}"
            );
        }
    }

    #[tokio::test]
    async fn empty_author_is_rejected() {
        let service = test_service();

        let err = service.create_quote(TEXT, "  ", "general").await.unwrap_err();
        match err {
            QuoteError::Validation(e) => {
                assert_eq!(e.field, Field::Author);
                assert_eq!(e.kind, ValidationErrorKind::EmptyField);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn get_quote_round_trips() {
        let service = test_service();
        let created = service
            .create_quote(TEXT, "Abraham Lincoln", "motivation")
            .await
            .unwrap();

        let fetched = service.get_quote(created.id).await.unwrap();
        assert_eq!(fetched.text, created.text);
        assert_eq!(fetched.author, created.author);
        assert_eq!(fetched.category, created.category);
    }

    #[tokio::test]
    async fn get_missing_quote_is_not_found() {
        let service = test_service();
        let err = service.get_quote(7).await.unwrap_err();
        assert!(matches!(err, QuoteError::NotFound(_)));
    }

    #[tokio::test]
    async fn random_quote_from_unknown_category_is_not_found() {
        let service = test_service();
        seed(&service, "humor", 2).await;

        let err = service
            .random_quote(Some("nonexistent-category"))
            .await
            .unwrap_err();
        assert!(matches!(err, QuoteError::NotFound(ref m) if m.contains("nonexistent-category")));
    }

    #[tokio::test]
    async fn random_quote_samples_within_category() {
        let service = test_service();
        seed(&service, "humor", 3).await;
        seed(&service, "wisdom", 3).await;

        let mut seen = HashSet::new();
        for _ in 0..200 {
            let quote = service.random_quote(Some("wisdom")).await.unwrap();
            assert_eq!(quote.category, "wisdom");
            seen.insert(quote.id);
        }
        assert!(seen.len() > 1);
    }

    #[tokio::test]
    async fn blank_category_means_no_filter() {
        let service = test_service();
        seed(&service, "humor", 1).await;

        assert!(service.random_quote(Some("  ")).await.is_ok());
        let page = service
            .list_quotes(PageRequest::default(), Some(""))
            .await
            .unwrap();
        assert_eq!(page.total, 1);
    }

    #[tokio::test]
    async fn list_quotes_clamps_page_and_limit() {
        let service = test_service();
        seed(&service, "test", 12).await;

        let clamped = service
            .list_quotes(PageRequest::new(0, 0), None)
            .await
            .unwrap();
        let explicit = service
            .list_quotes(PageRequest::new(1, 10), None)
            .await
            .unwrap();
        assert_eq!(clamped, explicit);
        assert_eq!(clamped.items.len(), 10);
    }

    #[tokio::test]
    async fn fifteen_quotes_span_two_pages() {
        let service = test_service();
        seed(&service, "test", 15).await;

        let first = service
            .list_quotes(PageRequest::new(1, 10), None)
            .await
            .unwrap();
        assert_eq!(first.items.len(), 10);
        assert_eq!(first.total, 15);
        assert!(first.meta().has_next);

        let second = service
            .list_quotes(PageRequest::new(2, 10), None)
            .await
            .unwrap();
        assert_eq!(second.items.len(), 5);
        assert_eq!(second.total, 15);
        assert!(!second.meta().has_next);
        assert!(second.meta().has_prev);
    }

    #[tokio::test]
    async fn pages_cover_every_quote_exactly_once() {
        let service = test_service();
        let n = 37;
        seed(&service, "test", n).await;

        let first = service
            .list_quotes(PageRequest::new(1, 10), None)
            .await
            .unwrap();
        let total_pages = first.meta().total_pages;
        assert_eq!(total_pages, n.div_ceil(10) as u64);

        let mut ids = Vec::new();
        for page in 1..=total_pages {
            let page = service
                .list_quotes(PageRequest::new(page as i64, 10), None)
                .await
                .unwrap();
            ids.extend(page.items.iter().map(|q| q.id));
        }

        let distinct: HashSet<QuoteId> = ids.iter().copied().collect();
        assert_eq!(ids.len(), n);
        assert_eq!(distinct.len(), n);
    }

    #[tokio::test]
    async fn list_quotes_filters_by_category() {
        let service = test_service();
        seed(&service, "humor", 3).await;
        seed(&service, "wisdom", 2).await;

        let page = service
            .list_quotes(PageRequest::default(), Some("wisdom"))
            .await
            .unwrap();
        assert_eq!(page.total, 2);
        assert!(page.items.iter().all(|q| q.category == "wisdom"));
    }

    #[tokio::test]
    async fn search_quotes_paginates_matches() {
        let service = test_service();
        seed(&service, "test", 5).await;
        service
            .create_quote("Knowledge speaks, but wisdom listens.", "Jimi Hendrix", "wisdom")
            .await
            .unwrap();

        let page = service
            .search_quotes("SEEDED", PageRequest::new(1, 2))
            .await
            .unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total, 5);
        assert_eq!(page.meta().total_pages, 3);

        let page = service
            .search_quotes("hendrix", PageRequest::default())
            .await
            .unwrap();
        assert_eq!(page.total, 1);
    }

    #[tokio::test]
    async fn blank_search_lists_everything() {
        let service = test_service();
        seed(&service, "test", 4).await;

        let searched = service
            .search_quotes("   ", PageRequest::default())
            .await
            .unwrap();
        let listed = service
            .list_quotes(PageRequest::default(), None)
            .await
            .unwrap();
        assert_eq!(searched, listed);
    }

    #[tokio::test]
    async fn categories_are_sorted_and_distinct() {
        let service = test_service();
        seed(&service, "motivation", 2).await;
        seed(&service, "humor", 1).await;

        let categories = service.categories().await.unwrap();
        assert_eq!(categories, vec!["humor", "motivation"]);
    }

    /// A repository whose every operation fails, counting the calls it sees.
    #[derive(Default)]
    struct BrokenRepository {
        calls: AtomicUsize,
    }

    impl BrokenRepository {
        fn fail<T>(&self) -> StorageResult<T> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(StorageError::Unavailable("pool closed".to_string()))
        }
    }

    #[async_trait]
    impl ReadRepository for BrokenRepository {
        async fn get_by_id(&self, _id: QuoteId) -> StorageResult<Quote> {
            self.fail()
        }

        async fn get_random(&self, _category: Option<&str>) -> StorageResult<Quote> {
            self.fail()
        }

        async fn get_all(
            &self,
            _category: Option<&str>,
            _limit: u32,
            _offset: u64,
        ) -> StorageResult<Vec<Quote>> {
            self.fail()
        }

        async fn get_count(&self, _category: Option<&str>) -> StorageResult<u64> {
            self.fail()
        }

        async fn get_categories(&self) -> StorageResult<Vec<String>> {
            self.fail()
        }

        async fn search(&self, _term: &str, _limit: u32, _offset: u64) -> StorageResult<Vec<Quote>> {
            self.fail()
        }

        async fn search_count(&self, _term: &str) -> StorageResult<u64> {
            self.fail()
        }

        async fn ping(&self) -> StorageResult<()> {
            self.fail()
        }
    }

    #[async_trait]
    impl Repository for BrokenRepository {
        async fn create(&self, _quote: NewQuote) -> StorageResult<Quote> {
            self.fail()
        }
    }

    #[tokio::test]
    async fn storage_failures_surface_as_database_errors_without_retry() {
        let service = QuoteService::new(BrokenRepository::default());

        let err = service
            .create_quote(TEXT, "Someone", "general")
            .await
            .unwrap_err();
        assert!(matches!(err, QuoteError::Database(_)));
        assert_eq!(service.repository().calls.load(Ordering::SeqCst), 1);

        let err = service
            .list_quotes(PageRequest::default(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, QuoteError::Database(_)));
        assert_eq!(service.repository().calls.load(Ordering::SeqCst), 2);

        assert!(matches!(
            service.random_quote(None).await.unwrap_err(),
            QuoteError::Database(_)
        ));
        assert!(service.health().await.is_err());
    }

    #[tokio::test]
    async fn validation_happens_before_storage() {
        let service = QuoteService::new(BrokenRepository::default());

        let err = service
            .create_quote("short", "Someone", "general")
            .await
            .unwrap_err();
        assert!(matches!(err, QuoteError::Validation(_)));
        assert_eq!(service.repository().calls.load(Ordering::SeqCst), 0);
    }
}
