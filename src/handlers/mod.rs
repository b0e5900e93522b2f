//! HTTP layer. Handlers stay thin: extract, validate, call a service, shape
//! the response. Status codes come from `ServiceError` alone.

pub mod customers;
pub mod films;
pub mod health;
pub mod inventory;
pub mod payments;
pub mod rentals;
pub mod stores;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

use serde::Deserialize;

/// Shared `?late=true` filter for rental listings.
#[derive(Debug, Default, Deserialize)]
pub struct LateFilter {
    #[serde(default)]
    pub late: bool,
}
