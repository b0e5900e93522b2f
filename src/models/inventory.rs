use chrono::{DateTime, Utc};
use sea_orm::FromQueryResult;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, FromQueryResult)]
pub struct InventoryRow {
    pub inventory_id: i32,
    pub last_update: DateTime<Utc>,
    pub film_id: i32,
    pub title: String,
    pub store_id: i32,
    pub address_id: i32,
    pub phone: String,
}

#[derive(Debug, Clone, Serialize, FromQueryResult)]
pub struct InventoryAvailability {
    pub inventory_id: i32,
    pub store_id: i32,
    pub film_id: i32,
    pub title: String,
    pub available: bool,
}
