use axum::{
    extract::{Json, Path, State},
    response::IntoResponse,
    routing::get,
    Router,
};

use crate::errors::ServiceError;
use crate::handlers::AppState;

async fn inventory_summary(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let summary = state.stores.inventory_summary(id).await?;
    Ok(Json(summary))
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/:id/inventory/summary", get(inventory_summary))
}
