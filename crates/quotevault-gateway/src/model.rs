mod health;
mod quote;

pub use health::HealthResponse;
pub use quote::{
    CategoriesResponse, CreateQuoteRequest, ListQuery, PaginatedQuotesResponse, RandomQuery,
    SearchQuery,
};

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
    pub message: String,
}
