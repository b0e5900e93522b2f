use chrono::{DateTime, Utc};
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::entities::customer;

/// Customer shape returned by the list/get/create endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerSummary {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
}

impl From<customer::Model> for CustomerSummary {
    fn from(model: customer::Model) -> Self {
        Self {
            id: model.customer_id,
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
        }
    }
}

/// Onboarding payload. The address carries a city *name*; the workflow
/// resolves it to a city id and refuses unknown cities.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCustomerRequest {
    #[validate(length(min = 1, max = 50))]
    pub first_name: String,
    #[validate(length(min = 1, max = 50))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(range(min = 1))]
    pub store_id: i32,
    #[validate]
    pub address: AddressInput,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddressInput {
    #[validate(length(min = 1, max = 100))]
    pub address: String,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub address2: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub district: String,
    #[validate(length(min = 1, max = 50))]
    pub city_name: String,
    #[validate(length(min = 4, max = 10))]
    pub postal_code: String,
    #[validate(length(min = 5, max = 20))]
    pub phone: String,
}

/// One open rental of a customer, joined with film and due-date information.
#[derive(Debug, Clone, Serialize, FromQueryResult)]
pub struct CustomerRentalRow {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub rental_date: DateTime<Utc>,
    pub title: String,
    pub rental_due_date: DateTime<Utc>,
    pub overdue: bool,
}
