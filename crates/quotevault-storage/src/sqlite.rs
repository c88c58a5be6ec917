use crate::error::context;
use crate::row::{count_to_u64, into_quotes, like_pattern, now_micros, window, QuoteRow};
use async_trait::async_trait;
use quotevault_core::repository::{
    normalize_search_term, search_key, ReadRepository, Repository, Result,
};
use quotevault_core::{NewQuote, Quote, QuoteId, StorageError};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::debug;

const SCHEMA: &str = include_str!("../ddl/sqlite/quotes.sql");

/// SQLite implementation of the repository contract.
///
/// Timestamps are stored as integer microseconds since the Unix epoch.
#[derive(Debug, Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    /// Creates a repository from an existing SQLite connection pool.
    ///
    /// The caller is responsible for the schema; see [`ensure_schema`](Self::ensure_schema).
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool, creating the database file if needed, and
    /// ensures the schema exists.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(context("parse sqlite url"))?
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(context("connect to sqlite"))?;

        let repository = Self::new(pool);
        repository.ensure_schema().await?;
        Ok(repository)
    }

    /// Opens a private in-memory database.
    ///
    /// Every SQLite connection to `:memory:` sees its own database, so the
    /// pool holds exactly one connection that is never recycled.
    pub async fn in_memory() -> Result<Self> {
        let options =
            SqliteConnectOptions::from_str("sqlite::memory:").map_err(context("parse sqlite url"))?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(context("open in-memory sqlite"))?;

        let repository = Self::new(pool);
        repository.ensure_schema().await?;
        Ok(repository)
    }

    /// Creates the `quotes` table and its indexes if they do not exist.
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::raw_sql(SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(context("create sqlite schema"))?;
        debug!("sqlite schema ready");
        Ok(())
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl ReadRepository for SqliteRepository {
    async fn get_by_id(&self, id: QuoteId) -> Result<Quote> {
        let row = sqlx::query_as::<_, QuoteRow>(
            r#"
            SELECT id, text, author, category, created_at, updated_at
            FROM quotes
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(context("get quote"))?;

        row.ok_or_else(|| StorageError::NotFound(format!("quote {id} not found")))?
            .try_into()
    }

    async fn get_random(&self, category: Option<&str>) -> Result<Quote> {
        let row = sqlx::query_as::<_, QuoteRow>(
            r#"
            SELECT id, text, author, category, created_at, updated_at
            FROM quotes
            WHERE (?1 IS NULL OR category = ?1)
            ORDER BY RANDOM()
            LIMIT 1
            "#,
        )
        .bind(category)
        .fetch_optional(&self.pool)
        .await
        .map_err(context("get random quote"))?;

        row.ok_or_else(|| StorageError::NotFound("no quotes found".to_string()))?
            .try_into()
    }

    async fn get_all(
        &self,
        category: Option<&str>,
        limit: u32,
        offset: u64,
    ) -> Result<Vec<Quote>> {
        let (limit, offset) = window(limit, offset)?;

        let rows = sqlx::query_as::<_, QuoteRow>(
            r#"
            SELECT id, text, author, category, created_at, updated_at
            FROM quotes
            WHERE (?1 IS NULL OR category = ?1)
            ORDER BY created_at DESC, id DESC
            LIMIT ?2 OFFSET ?3
            "#,
        )
        .bind(category)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(context("list quotes"))?;

        into_quotes(rows)
    }

    async fn get_count(&self, category: Option<&str>) -> Result<u64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM quotes
            WHERE (?1 IS NULL OR category = ?1)
            "#,
        )
        .bind(category)
        .fetch_one(&self.pool)
        .await
        .map_err(context("count quotes"))?;

        count_to_u64(count)
    }

    async fn get_categories(&self) -> Result<Vec<String>> {
        sqlx::query_scalar(
            r#"
            SELECT category
            FROM quotes
            WHERE category <> ''
            GROUP BY category
            ORDER BY category
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(context("list categories"))
    }

    async fn search(&self, term: &str, limit: u32, offset: u64) -> Result<Vec<Quote>> {
        let Some(needle) = normalize_search_term(term) else {
            return self.get_all(None, limit, offset).await;
        };
        let (limit, offset) = window(limit, offset)?;

        let rows = sqlx::query_as::<_, QuoteRow>(
            r#"
            SELECT id, text, author, category, created_at, updated_at
            FROM quotes
            WHERE search_key LIKE ?1 ESCAPE '\'
            ORDER BY created_at DESC, id DESC
            LIMIT ?2 OFFSET ?3
            "#,
        )
        .bind(like_pattern(&needle))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(context("search quotes"))?;

        into_quotes(rows)
    }

    async fn search_count(&self, term: &str) -> Result<u64> {
        let Some(needle) = normalize_search_term(term) else {
            return self.get_count(None).await;
        };

        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM quotes
            WHERE search_key LIKE ?1 ESCAPE '\'
            "#,
        )
        .bind(like_pattern(&needle))
        .fetch_one(&self.pool)
        .await
        .map_err(context("count search results"))?;

        count_to_u64(count)
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(context("ping sqlite"))?;
        Ok(())
    }
}

#[async_trait]
impl Repository for SqliteRepository {
    async fn create(&self, quote: NewQuote) -> Result<Quote> {
        let created_at = now_micros()?;
        let micros = created_at.as_microsecond();

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO quotes (text, author, category, search_key, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(quote.text())
        .bind(quote.author())
        .bind(quote.category())
        .bind(search_key(quote.text(), quote.author(), quote.category()))
        .bind(micros)
        .bind(micros)
        .fetch_one(&self.pool)
        .await
        .map_err(context("create quote"))?;

        Ok(quote.into_quote(id, created_at))
    }
}
