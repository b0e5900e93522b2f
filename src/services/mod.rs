//! Business workflows. Multi-step operations (customer onboarding, rental
//! creation) live here; single-query operations pass straight through to the
//! data-access layer.

pub mod customers;
pub mod films;
pub mod inventory;
pub mod payments;
pub mod rentals;
pub mod stores;
