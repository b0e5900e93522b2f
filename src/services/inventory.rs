use std::sync::Arc;
use tracing::instrument;

use crate::db::DbPool;
use crate::errors::ServiceError;
use crate::models::inventory::{InventoryAvailability, InventoryRow};
use crate::queries::inventory_queries;

#[derive(Clone)]
pub struct InventoryService {
    db: Arc<DbPool>,
}

impl InventoryService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn get_inventory(
        &self,
        store_id: Option<i32>,
    ) -> Result<Vec<InventoryRow>, ServiceError> {
        let rows = match store_id {
            Some(store_id) => {
                inventory_queries::list_inventory_by_store(&*self.db, store_id).await?
            }
            None => inventory_queries::list_inventory(&*self.db).await?,
        };
        Ok(rows)
    }

    /// One available copy of the film at the store, if any.
    #[instrument(skip(self))]
    pub async fn find_available(
        &self,
        store_id: i32,
        film_id: i32,
    ) -> Result<InventoryAvailability, ServiceError> {
        inventory_queries::find_available_inventory(&*self.db, store_id, film_id)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!(
                    "no available copy of film {} at store {}",
                    film_id, store_id
                ))
            })
    }
}
