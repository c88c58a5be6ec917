use async_trait::async_trait;
use jiff::Timestamp;
use parking_lot::Mutex;
use quotevault_core::repository::{
    normalize_search_term, search_key, ReadRepository, Repository, Result,
};
use quotevault_core::{NewQuote, Quote, QuoteId, StorageError};
use rand::seq::SliceRandom;
use std::cmp::Reverse;
use std::collections::BTreeSet;
use std::sync::Arc;

#[derive(Debug, Default)]
struct State {
    quotes: Vec<Quote>,
    next_id: QuoteId,
}

impl State {
    /// Quotes passing `keep`, newest first with ties broken by id descending.
    fn newest_first(&self, keep: impl Fn(&Quote) -> bool) -> Vec<&Quote> {
        let mut matching: Vec<&Quote> = self.quotes.iter().filter(|q| keep(q)).collect();
        matching.sort_by_key(|q| Reverse((q.created_at, q.id)));
        matching
    }
}

/// In-memory implementation of the repository traits.
///
/// A single mutex guards the append-only quote list and the id counter. It
/// is held only while appending or scanning and never across an await point.
/// Clones share the same underlying storage.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    state: Arc<Mutex<State>>,
}

impl InMemoryRepository {
    /// Creates a new, empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new in-memory repository with room for `capacity` quotes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            state: Arc::new(Mutex::new(State {
                quotes: Vec::with_capacity(capacity),
                next_id: 0,
            })),
        }
    }
}

fn in_category(quote: &Quote, category: Option<&str>) -> bool {
    category.map_or(true, |c| quote.category == c)
}

fn matches_needle(quote: &Quote, needle: &str) -> bool {
    search_key(&quote.text, &quote.author, &quote.category).contains(needle)
}

fn window(quotes: Vec<&Quote>, limit: u32, offset: u64) -> Vec<Quote> {
    let offset = usize::try_from(offset).unwrap_or(usize::MAX);
    quotes
        .into_iter()
        .skip(offset)
        .take(limit as usize)
        .cloned()
        .collect()
}

#[async_trait]
impl ReadRepository for InMemoryRepository {
    async fn get_by_id(&self, id: QuoteId) -> Result<Quote> {
        let state = self.state.lock();
        state
            .quotes
            .iter()
            .find(|q| q.id == id)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(format!("quote {id} not found")))
    }

    async fn get_random(&self, category: Option<&str>) -> Result<Quote> {
        let state = self.state.lock();
        let matching: Vec<&Quote> = state
            .quotes
            .iter()
            .filter(|q| in_category(q, category))
            .collect();

        matching
            .choose(&mut rand::thread_rng())
            .map(|q| (*q).clone())
            .ok_or_else(|| StorageError::NotFound("no quotes found".to_string()))
    }

    async fn get_all(
        &self,
        category: Option<&str>,
        limit: u32,
        offset: u64,
    ) -> Result<Vec<Quote>> {
        let state = self.state.lock();
        Ok(window(
            state.newest_first(|q| in_category(q, category)),
            limit,
            offset,
        ))
    }

    async fn get_count(&self, category: Option<&str>) -> Result<u64> {
        let state = self.state.lock();
        let count = state
            .quotes
            .iter()
            .filter(|q| in_category(q, category))
            .count();
        Ok(count as u64)
    }

    async fn get_categories(&self) -> Result<Vec<String>> {
        let state = self.state.lock();
        let categories: BTreeSet<&str> = state
            .quotes
            .iter()
            .map(|q| q.category.as_str())
            .filter(|c| !c.is_empty())
            .collect();
        Ok(categories.into_iter().map(str::to_owned).collect())
    }

    async fn search(&self, term: &str, limit: u32, offset: u64) -> Result<Vec<Quote>> {
        let Some(needle) = normalize_search_term(term) else {
            return self.get_all(None, limit, offset).await;
        };

        let state = self.state.lock();
        Ok(window(
            state.newest_first(|q| matches_needle(q, &needle)),
            limit,
            offset,
        ))
    }

    async fn search_count(&self, term: &str) -> Result<u64> {
        let Some(needle) = normalize_search_term(term) else {
            return self.get_count(None).await;
        };

        let state = self.state.lock();
        let count = state
            .quotes
            .iter()
            .filter(|q| matches_needle(q, &needle))
            .count();
        Ok(count as u64)
    }
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn create(&self, quote: NewQuote) -> Result<Quote> {
        let mut state = self.state.lock();
        state.next_id += 1;
        let quote = quote.into_quote(state.next_id, Timestamp::now());
        state.quotes.push(quote.clone());
        Ok(quote)
    }
}
