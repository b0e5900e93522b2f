use chrono::{DateTime, Utc};
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// One open rental joined with customer and film information.
#[derive(Debug, Clone, Serialize, FromQueryResult)]
pub struct RentalRow {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub rental_date: DateTime<Utc>,
    pub title: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRentalRequest {
    #[validate(range(min = 1))]
    pub inventory_id: i32,
    #[validate(range(min = 1))]
    pub customer_id: i32,
    #[validate(range(min = 1))]
    pub staff_id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRentalResponse {
    pub id: i32,
}
