//! Data-access layer: parameterized statements against a connection.
//!
//! Every function is generic over [`sea_orm::ConnectionTrait`] so it runs
//! unchanged against the pool, an open transaction or a mock connection.
//! No business logic lives here.

pub mod customer_queries;
pub mod film_queries;
pub mod inventory_queries;
pub mod payment_queries;
pub mod rental_queries;
pub mod store_queries;
