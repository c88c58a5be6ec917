use quotevault_core::{Page, PageMeta, Quote};
use serde::{Deserialize, Serialize};

/// Missing fields deserialize as empty strings so they surface as
/// field-level validation errors rather than JSON errors.
#[derive(Debug, Deserialize)]
pub struct CreateQuoteRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub category: String,
}

/// A page of quotes with its pagination fields inlined next to `quotes`.
#[derive(Debug, Serialize, Deserialize)]
pub struct PaginatedQuotesResponse {
    pub quotes: Vec<Quote>,
    #[serde(flatten)]
    pub meta: PageMeta,
}

impl From<Page<Quote>> for PaginatedQuotesResponse {
    fn from(page: Page<Quote>) -> Self {
        let meta = page.meta();
        Self {
            quotes: page.items,
            meta,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CategoriesResponse {
    pub categories: Vec<String>,
}

/// Query parameters are kept as raw strings; malformed numbers fall back to
/// the pagination defaults instead of failing the request.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RandomQuery {
    pub category: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}
