use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use tracing::{error, instrument};

use crate::{auth::extractors::AuthUser, state::AppState};

use super::dto::CartView;

pub fn read_routes() -> Router<AppState> {
    Router::new().route("/cart", get(get_cart))
}

#[instrument(skip(state))]
pub async fn get_cart(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<CartView>, (StatusCode, String)> {
    let Some(cart) = state.carts.find_by_user(user_id).await.map_err(internal)? else {
        return Ok(Json(CartView::empty(user_id)));
    };
    let rows = state.carts.items(cart.id).await.map_err(internal)?;
    let view = CartView::from_rows(cart, rows).map_err(internal)?;
    Ok(Json(view))
}

fn internal(e: anyhow::Error) -> (StatusCode, String) {
    error!(error = %e, "cart query failed");
    (StatusCode::INTERNAL_SERVER_ERROR, "internal error".into())
}
