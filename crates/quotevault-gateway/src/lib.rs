//! HTTP surface of Quote Vault.
//!
//! [`App::router`] wires the JSON routes under `/api/v1` plus `/health` onto
//! any [`QuoteVault`](quotevault_core::QuoteVault) implementation.

pub mod app;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;

pub use app::{cors_layer, App};
pub use error::AppError;
pub use state::AppState;
