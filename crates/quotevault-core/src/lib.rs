//! Core types and traits for the Quote Vault service.
//!
//! This crate holds the quote model, input validation, pagination
//! arithmetic and the repository and service traits shared by the storage
//! backends, the service implementation and the HTTP gateway.

pub mod error;
pub mod pagination;
pub mod quote;
pub mod repository;
pub mod validator;
pub mod vault;

pub use error::{Field, QuoteError, StorageError, ValidationError, ValidationErrorKind};
pub use pagination::{Page, PageMeta, PageRequest};
pub use quote::{NewQuote, Quote, QuoteId};
pub use repository::{ReadRepository, Repository};
pub use vault::QuoteVault;
