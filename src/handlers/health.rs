use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use serde_json::json;
use tracing::warn;

use crate::handlers::AppState;

/// Liveness plus a database ping. Stays outside the API-key gate so load
/// balancers can probe it without credentials.
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    match crate::db::check_connection(&state.db).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "up",
                "database": "up",
                "version": env!("CARGO_PKG_VERSION"),
            })),
        ),
        Err(e) => {
            warn!(error = %e, "health check failed to reach the database");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "database": "down",
                    "version": env!("CARGO_PKG_VERSION"),
                })),
            )
        }
    }
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
