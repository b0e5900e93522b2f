use axum::{
    extract::{Json, Query, State},
    response::IntoResponse,
    routing::get,
    Router,
};
use serde::Deserialize;

use crate::errors::ServiceError;
use crate::handlers::AppState;

#[derive(Debug, Deserialize)]
struct InventoryParams {
    store_id: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct AvailabilityParams {
    store_id: i32,
    film_id: i32,
}

async fn list_inventory(
    State(state): State<AppState>,
    Query(params): Query<InventoryParams>,
) -> Result<impl IntoResponse, ServiceError> {
    let inventory = state.inventory.get_inventory(params.store_id).await?;
    Ok(Json(inventory))
}

async fn find_available(
    State(state): State<AppState>,
    Query(params): Query<AvailabilityParams>,
) -> Result<impl IntoResponse, ServiceError> {
    let unit = state
        .inventory
        .find_available(params.store_id, params.film_id)
        .await?;
    Ok(Json(unit))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_inventory))
        .route("/available", get(find_available))
}
