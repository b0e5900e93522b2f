//! API-key gate for the `/v1` routes.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::errors::ServiceError;
use crate::AppState;

pub const API_KEY_HEADER: &str = "x-api-key";

/// Rejects any request whose `X-API-Key` header does not match the
/// configured key. Installed on the `/v1` router only; health stays open.
pub async fn require_api_key(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let provided = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    match provided {
        None => {
            warn!(path = %req.uri().path(), "request without API key");
            ServiceError::Unauthorized("missing API key".to_string()).into_response()
        }
        Some(key) if key != state.config.api_key => {
            warn!(path = %req.uri().path(), "request with invalid API key");
            ServiceError::Unauthorized("invalid API key".to_string()).into_response()
        }
        Some(_) => next.run(req).await,
    }
}
