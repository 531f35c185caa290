pub mod health;
pub mod products;
pub mod settings;

use anyhow::{Context, Result};
use axum::{
    http::HeaderValue,
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::middleware::request_id::{make_request_span, request_id_middleware};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health::health_handler))
        // Products API
        .route("/api/products", get(products::handle_list_products))
        .route("/api/products/:id", get(products::handle_get_product))
        .route("/api/products/analyze", post(products::handle_analyze))
        .route(
            "/api/products/analyze-all",
            post(products::handle_analyze_all),
        )
        // Settings API
        .route("/api/settings/api-key", put(settings::handle_set_api_key))
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}

/// CORS for the configured frontend origin; any method and header.
pub fn cors_layer(allowed_origin: &str) -> Result<CorsLayer> {
    let origin = HeaderValue::from_str(allowed_origin)
        .context("CORS_ALLOWED_ORIGIN must be a valid header value")?;
    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any))
}
