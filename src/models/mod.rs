//! Request/response DTOs and query projection rows.

pub mod customer;
pub mod film;
pub mod inventory;
pub mod payment;
pub mod rental;
pub mod store;
