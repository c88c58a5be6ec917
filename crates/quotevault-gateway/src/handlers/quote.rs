use crate::error::{AppError, Result};
use crate::model::{
    CategoriesResponse, CreateQuoteRequest, ListQuery, PaginatedQuotesResponse, RandomQuery,
    SearchQuery,
};
use crate::state::AppState;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use quotevault_core::{PageRequest, Quote, QuoteId};

fn parse_id(raw: &str) -> Result<QuoteId> {
    raw.parse::<QuoteId>()
        .map_err(|_| AppError::BadRequest(format!("invalid quote id '{raw}'")))
}

pub async fn create_quote_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateQuoteRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Quote>)> {
    let Json(request) = payload?;

    let quote = state
        .vault()
        .create_quote(&request.text, &request.author, &request.category)
        .await?;

    Ok((StatusCode::CREATED, Json(quote)))
}

pub async fn get_quote_handler(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Quote>> {
    let id = parse_id(&id)?;
    let quote = state.vault().get_quote(id).await?;
    Ok(Json(quote))
}

pub async fn random_quote_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<RandomQuery>, QueryRejection>,
) -> Result<Json<Quote>> {
    let Query(query) = query?;
    let quote = state
        .vault()
        .random_quote(query.category.as_deref())
        .await?;
    Ok(Json(quote))
}

pub async fn list_quotes_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<ListQuery>, QueryRejection>,
) -> Result<Json<PaginatedQuotesResponse>> {
    let Query(query) = query?;
    let page = PageRequest::from_query(query.page.as_deref(), query.limit.as_deref());

    let quotes = state
        .vault()
        .list_quotes(page, query.category.as_deref())
        .await?;
    Ok(Json(quotes.into()))
}

pub async fn search_quotes_handler(
    State(state): State<AppState>,
    query: std::result::Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<PaginatedQuotesResponse>> {
    let Query(query) = query?;
    let page = PageRequest::from_query(query.page.as_deref(), query.limit.as_deref());

    let quotes = state
        .vault()
        .search_quotes(query.q.as_deref().unwrap_or_default(), page)
        .await?;
    Ok(Json(quotes.into()))
}

pub async fn list_categories_handler(
    State(state): State<AppState>,
) -> Result<Json<CategoriesResponse>> {
    let categories = state.vault().categories().await?;
    Ok(Json(CategoriesResponse { categories }))
}
