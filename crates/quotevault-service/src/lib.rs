//! Quote service implementation.
//!
//! [`QuoteService`] implements the [`QuoteVault`](quotevault_core::QuoteVault)
//! business operations over any [`Repository`](quotevault_core::Repository).

pub mod service;

pub use service::QuoteService;
