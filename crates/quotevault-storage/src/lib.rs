//! Storage backends for the quote repository traits.
//!
//! - [`InMemoryRepository`]: mutex-guarded vector, for prototyping and tests.
//! - [`SqliteRepository`]: embedded SQLite via sqlx.
//! - [`PostgresRepository`]: Postgres via sqlx.

mod error;
pub mod memory;
pub mod postgres;
mod row;
pub mod sqlite;

pub use memory::InMemoryRepository;
pub use postgres::PostgresRepository;
pub use quotevault_core::repository::{ReadRepository, Repository};
pub use quotevault_core::StorageError;
pub use sqlite::SqliteRepository;
