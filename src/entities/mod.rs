//! SeaORM entities for the Pagila tables this service touches.

pub mod address;
pub mod city;
pub mod customer;
pub mod film;
pub mod inventory;
pub mod payment;
pub mod rental;
pub mod store;
