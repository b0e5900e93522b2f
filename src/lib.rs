//! REST API over the Pagila video-rental schema: customers, films,
//! inventory, rentals, payments and store summaries, guarded by a shared
//! API key.

pub mod auth;
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod handlers;
pub mod migrator;
pub mod models;
pub mod queries;
pub mod services;

use std::sync::Arc;
use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::response::IntoResponse;
use axum::Router;
use http::HeaderValue;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{error, info};

use crate::config::{AppConfig, AppConfigError};
use crate::db::DbPool;
use crate::errors::ServiceError;
use crate::services::{
    customers::CustomerService, films::FilmService, inventory::InventoryService,
    payments::PaymentService, rentals::RentalService, stores::StoreService,
};

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DbPool>,
    pub config: Arc<AppConfig>,
    pub customers: CustomerService,
    pub rentals: RentalService,
    pub films: FilmService,
    pub inventory: InventoryService,
    pub stores: StoreService,
    pub payments: PaymentService,
}

impl AppState {
    pub fn new(db: Arc<DbPool>, config: AppConfig) -> Self {
        Self {
            customers: CustomerService::new(db.clone()),
            rentals: RentalService::new(db.clone()),
            films: FilmService::new(db.clone()),
            inventory: InventoryService::new(db.clone()),
            stores: StoreService::new(db.clone()),
            payments: PaymentService::new(db.clone()),
            config: Arc::new(config),
            db,
        }
    }
}

/// All key-gated routes, nested under `/v1`.
fn v1_routes() -> Router<AppState> {
    Router::new()
        .nest("/customers", handlers::customers::routes())
        .nest("/rentals", handlers::rentals::routes())
        .nest("/films", handlers::films::routes())
        .nest("/inventory", handlers::inventory::routes())
        .nest("/stores", handlers::stores::routes())
        .nest("/payments", handlers::payments::routes())
}

/// Builds the complete application router with middleware applied.
///
/// Fails only when the configuration demands explicit CORS origins and
/// none were provided.
pub fn app(state: AppState) -> Result<Router, AppConfigError> {
    let cors = build_cors_layer(&state.config)?;
    let timeout = Duration::from_secs(state.config.request_timeout_secs);
    let body_limit = state.config.max_request_body_bytes;

    let v1 = v1_routes().layer(axum::middleware::from_fn_with_state(
        state.clone(),
        auth::require_api_key,
    ));

    Ok(Router::new()
        .merge(handlers::health::routes())
        .nest("/v1", v1)
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TimeoutLayer::new(timeout))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .with_state(state))
}

/// CORS from config: explicit origin list when given, permissive fallback
/// in development or by override, otherwise a startup error.
fn build_cors_layer(cfg: &AppConfig) -> Result<CorsLayer, AppConfigError> {
    let configured_origins: Option<Vec<HeaderValue>> = cfg
        .cors_allowed_origins
        .as_ref()
        .map(|raw| {
            raw.split(',')
                .filter_map(|origin| {
                    let trimmed = origin.trim();
                    if trimmed.is_empty() {
                        None
                    } else {
                        HeaderValue::from_str(trimmed).ok()
                    }
                })
                .collect::<Vec<_>>()
        })
        .filter(|origins| !origins.is_empty());

    if let Some(origins) = configured_origins {
        Ok(CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any))
    } else if cfg.should_allow_permissive_cors() {
        info!(
            "Using permissive CORS because explicit origins were not configured ({})",
            if cfg.is_development() {
                "development environment"
            } else {
                "explicit override enabled"
            }
        );
        Ok(CorsLayer::permissive())
    } else {
        error!("Missing CORS configuration; set APP__CORS_ALLOWED_ORIGINS or APP__CORS_ALLOW_ANY_ORIGIN=true");
        Err(AppConfigError::Invalid(
            "missing CORS configuration: set APP__CORS_ALLOWED_ORIGINS or APP__CORS_ALLOW_ANY_ORIGIN=true".to_string(),
        ))
    }
}

/// Turns a handler panic into the structured 500 body instead of a dropped
/// connection.
fn handle_panic(err: Box<dyn std::any::Any + Send + 'static>) -> axum::response::Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    };
    error!(panic = %detail, "request handler panicked");
    ServiceError::InternalError(detail).into_response()
}
