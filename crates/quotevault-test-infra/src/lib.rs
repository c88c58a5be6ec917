//! Disposable infrastructure for integration tests.

pub mod error;
pub mod postgres;
pub mod retry;

pub use error::{Result, TestInfraError};
pub use retry::retry;
