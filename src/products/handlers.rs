use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::{error, instrument};
use uuid::Uuid;

use crate::state::AppState;

use super::dto::Pagination;
use super::repo_types::Product;

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products))
        .route("/products/:id", get(get_product))
}

#[instrument(skip(state))]
pub async fn list_products(
    State(state): State<AppState>,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<Product>>, (StatusCode, String)> {
    let (limit, offset) = p.bounds();
    let products = state.products.list(limit, offset).await.map_err(internal)?;
    Ok(Json(products))
}

#[instrument(skip(state))]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Product>, (StatusCode, String)> {
    match state.products.find(id).await.map_err(internal)? {
        Some(product) => Ok(Json(product)),
        None => Err((StatusCode::NOT_FOUND, "Product not found".into())),
    }
}

fn internal(e: anyhow::Error) -> (StatusCode, String) {
    error!(error = %e, "products query failed");
    (StatusCode::INTERNAL_SERVER_ERROR, "internal error".into())
}
