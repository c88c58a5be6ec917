//! Row mapping shared by the SQL backends.

use jiff::Timestamp;
use quotevault_core::repository::Result;
use quotevault_core::{Quote, StorageError};

/// A `quotes` row as stored. Timestamps are microseconds since the Unix epoch.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct QuoteRow {
    id: i64,
    text: String,
    author: String,
    category: String,
    created_at: i64,
    updated_at: i64,
}

impl TryFrom<QuoteRow> for Quote {
    type Error = StorageError;

    fn try_from(row: QuoteRow) -> Result<Self> {
        Ok(Quote {
            id: row.id,
            text: row.text,
            author: row.author,
            category: row.category,
            created_at: parse_timestamp("created_at", row.created_at)?,
            updated_at: parse_timestamp("updated_at", row.updated_at)?,
        })
    }
}

pub(crate) fn into_quotes(rows: Vec<QuoteRow>) -> Result<Vec<Quote>> {
    rows.into_iter().map(Quote::try_from).collect()
}

fn parse_timestamp(column: &str, micros: i64) -> Result<Timestamp> {
    Timestamp::from_microsecond(micros).map_err(|e| {
        StorageError::InvalidData(format!("invalid {column} timestamp '{micros}': {e}"))
    })
}

/// Current time truncated to what the SQL backends can store, so the value
/// returned from an insert equals the value read back later.
pub(crate) fn now_micros() -> Result<Timestamp> {
    parse_timestamp("created_at", Timestamp::now().as_microsecond())
}

pub(crate) fn count_to_u64(count: i64) -> Result<u64> {
    u64::try_from(count)
        .map_err(|_| StorageError::InvalidData(format!("negative row count: {count}")))
}

/// Converts a window into bind values; SQL backends only take signed integers.
pub(crate) fn window(limit: u32, offset: u64) -> Result<(i64, i64)> {
    let offset = i64::try_from(offset)
        .map_err(|_| StorageError::Query(format!("offset out of range: {offset}")))?;
    Ok((i64::from(limit), offset))
}

/// Builds a `LIKE` pattern that matches `needle` literally anywhere, using `\`
/// as the escape character.
pub(crate) fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
