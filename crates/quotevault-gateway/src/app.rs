use axum::http::header::{self, HeaderName, HeaderValue, InvalidHeaderValue};
use axum::http::Method;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    create_quote_handler, get_quote_handler, health_handler, list_categories_handler,
    list_quotes_handler, random_quote_handler, search_quotes_handler,
};
use crate::state::AppState;

const REFERRER_POLICY: &str = "strict-origin-when-cross-origin";

/// Builds a CORS layer for a single origin, or any origin for `*`.
pub fn cors_layer(origin: &str) -> Result<CorsLayer, InvalidHeaderValue> {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")]);

    if origin == "*" {
        Ok(cors.allow_origin(Any))
    } else {
        Ok(cors.allow_origin(origin.parse::<HeaderValue>()?))
    }
}

pub struct App {}

impl App {
    pub fn router(state: AppState, cors: CorsLayer) -> Router {
        let api = Router::new()
            .route("/quotes", post(create_quote_handler).get(list_quotes_handler))
            .route("/quotes/random", get(random_quote_handler))
            .route("/quotes/search", get(search_quotes_handler))
            .route("/quotes/{id}", get(get_quote_handler))
            .route("/categories", get(list_categories_handler));

        Router::new()
            .route("/health", get(health_handler))
            .nest("/api/v1", api)
            .with_state(state)
            .layer(SetResponseHeaderLayer::overriding(
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                header::X_FRAME_OPTIONS,
                HeaderValue::from_static("DENY"),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                header::REFERRER_POLICY,
                HeaderValue::from_static(REFERRER_POLICY),
            ))
            .layer(cors)
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }
}
