use axum::{
    extract::{Json, Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use validator::Validate;

use crate::errors::ServiceError;
use crate::handlers::{AppState, LateFilter};
use crate::models::rental::{CreateRentalRequest, CreateRentalResponse};

async fn list_rentals(
    State(state): State<AppState>,
    Query(filter): Query<LateFilter>,
) -> Result<impl IntoResponse, ServiceError> {
    let rentals = state.rentals.get_rentals(filter.late).await?;
    Ok(Json(rentals))
}

async fn create_rental(
    State(state): State<AppState>,
    Json(req): Json<CreateRentalRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    req.validate()?;
    let id = state.rentals.create_rental(req).await?;
    let location = format!("/v1/rentals/{}", id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(CreateRentalResponse { id }),
    ))
}

async fn return_rental(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    state.rentals.return_rental(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_rentals))
        .route("/", post(create_rental))
        .route("/:id/return", post(return_rental))
}
