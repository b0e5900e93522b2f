use axum::{
    extract::{Json, Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{delete, get, post},
    Router,
};
use validator::Validate;

use crate::errors::ServiceError;
use crate::handlers::{AppState, LateFilter};
use crate::models::customer::CreateCustomerRequest;

async fn list_customers(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    let customers = state.customers.list_customers().await?;
    Ok(Json(customers))
}

async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let customer = state.customers.get_customer(id).await?;
    Ok(Json(customer))
}

async fn create_customer(
    State(state): State<AppState>,
    Json(req): Json<CreateCustomerRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    req.validate()?;
    let created = state.customers.create_customer(req).await?;
    let location = format!("/v1/customers/{}", created.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(created),
    ))
}

async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    state.customers.delete_customer(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_customer_rentals(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(filter): Query<LateFilter>,
) -> Result<impl IntoResponse, ServiceError> {
    let rentals = state.customers.get_customer_rentals(id, filter.late).await?;
    Ok(Json(rentals))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_customers))
        .route("/", post(create_customer))
        .route("/:id", get(get_customer))
        .route("/:id", delete(delete_customer))
        .route("/:id/rentals", get(get_customer_rentals))
}
