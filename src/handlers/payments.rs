use axum::{
    extract::{Json, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::post,
    Router,
};
use validator::Validate;

use crate::errors::ServiceError;
use crate::handlers::AppState;
use crate::models::payment::{PaymentRequest, PaymentResponse};

async fn create_payment(
    State(state): State<AppState>,
    Json(req): Json<PaymentRequest>,
) -> Result<impl IntoResponse, ServiceError> {
    req.validate()?;
    let id = state.payments.make_payment(req).await?;
    let location = format!("/v1/payments/{}", id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(PaymentResponse { id }),
    ))
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/", post(create_payment))
}
