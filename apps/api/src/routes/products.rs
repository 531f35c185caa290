//! Axum route handlers for the Products API.

use axum::{extract::State, Extension, Json};
use serde::Deserialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::extract::{ApiJson, ApiPath};
use crate::middleware::request_id::RequestId;
use crate::models::{Analysis, Product, ProductId};
use crate::scoring::{analyze_in_batches, BATCH_SIZE};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub product_id: ProductId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeAllRequest {
    pub product_ids: Vec<ProductId>,
}

fn find_product(state: &AppState, id: ProductId) -> Result<&Product, AppError> {
    state.catalog.get(id).ok_or_else(|| {
        warn!(product_id = id, "Product not found");
        AppError::NotFound(format!("Product {id} not found"))
    })
}

/// GET /api/products
pub async fn handle_list_products(State(state): State<AppState>) -> Json<Vec<Product>> {
    info!(count = state.catalog.len(), "Retrieved all products");
    Json(state.catalog.all().to_vec())
}

/// GET /api/products/:id
pub async fn handle_get_product(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<ProductId>,
) -> Result<Json<Product>, AppError> {
    let product = find_product(&state, id)?.clone();
    info!(product_id = id, "Retrieved product");
    Ok(Json(product))
}

/// POST /api/products/analyze
///
/// Scores one product with the configured scorer. Only an unknown id is an error;
/// scorer failures come back as a degraded analysis.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    ApiJson(request): ApiJson<AnalyzeRequest>,
) -> Result<Json<Analysis>, AppError> {
    let product = find_product(&state, request.product_id)?;

    info!(
        request_id = %request_id,
        product_id = product.id,
        backend = %state.scorer.backend(),
        "Analyzing product"
    );

    let analysis = state.scorer.score(product).await;
    Ok(Json(analysis))
}

/// POST /api/products/analyze-all
///
/// Scores every known id in batches of `BATCH_SIZE`. Unknown ids are skipped.
pub async fn handle_analyze_all(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    ApiJson(request): ApiJson<AnalyzeAllRequest>,
) -> Json<Vec<Analysis>> {
    let mut products = Vec::with_capacity(request.product_ids.len());
    for &id in &request.product_ids {
        match state.catalog.get(id) {
            Some(product) => products.push(product),
            None => warn!(request_id = %request_id, product_id = id, "Skipping unknown product"),
        }
    }

    let analyses = analyze_in_batches(state.scorer.as_ref(), &products, BATCH_SIZE).await;

    info!(
        request_id = %request_id,
        requested = request.product_ids.len(),
        analyzed = analyses.len(),
        "Analyzed products"
    );

    Json(analyses)
}
