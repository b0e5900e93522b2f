use sea_orm::SqlErr;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::db::DbPool;
use crate::errors::ServiceError;
use crate::models::rental::{CreateRentalRequest, RentalRow};
use crate::queries::rental_queries;

/// Service for the rental lifecycle: creation with an availability check,
/// returns, and the open/late projections.
#[derive(Clone)]
pub struct RentalService {
    db: Arc<DbPool>,
}

impl RentalService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn get_rentals(&self, late_only: bool) -> Result<Vec<RentalRow>, ServiceError> {
        let rows = if late_only {
            rental_queries::list_late_rentals(&*self.db).await?
        } else {
            rental_queries::list_open_rentals(&*self.db).await?
        };
        Ok(rows)
    }

    /// Rents an inventory unit to a customer.
    ///
    /// The availability check here is best-effort read-then-write: two
    /// concurrent calls can both pass it. The partial unique index on open
    /// rentals (see the migrator) closes that window; a unique-constraint
    /// violation on insert is reported as the same conflict.
    #[instrument(skip(self), fields(inventory_id = req.inventory_id))]
    pub async fn create_rental(&self, req: CreateRentalRequest) -> Result<i32, ServiceError> {
        if let Some(open) =
            rental_queries::find_open_rental_by_inventory_id(&*self.db, req.inventory_id).await?
        {
            return Err(ServiceError::Conflict(format!(
                "inventory {} is already rented out (rental {})",
                req.inventory_id, open.rental_id
            )));
        }

        match rental_queries::insert_rental(&*self.db, &req).await {
            Ok(rental) => {
                info!(rental_id = rental.rental_id, "rental created");
                Ok(rental.rental_id)
            }
            Err(e) => {
                if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                    warn!(
                        inventory_id = req.inventory_id,
                        "lost rental race, open-rental index rejected insert"
                    );
                    return Err(ServiceError::Conflict(format!(
                        "inventory {} is already rented out",
                        req.inventory_id
                    )));
                }
                Err(e.into())
            }
        }
    }

    /// Marks an open rental as returned.
    ///
    /// Only open rentals match; returning a rental that does not exist or
    /// was already returned is `NotFound`. A second return therefore never
    /// rewrites the original return timestamp.
    #[instrument(skip(self))]
    pub async fn return_rental(&self, rental_id: i32) -> Result<(), ServiceError> {
        let rows = rental_queries::close_rental_by_id(&*self.db, rental_id).await?;
        if rows == 0 {
            return Err(ServiceError::NotFound(format!(
                "no open rental with id {}",
                rental_id
            )));
        }
        info!(rental_id, "rental returned");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::rental;
    use assert_matches::assert_matches;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn request() -> CreateRentalRequest {
        CreateRentalRequest {
            inventory_id: 5,
            customer_id: 1,
            staff_id: 1,
        }
    }

    fn open_rental(rental_id: i32, inventory_id: i32) -> rental::Model {
        rental::Model {
            rental_id,
            rental_date: Utc::now(),
            inventory_id,
            customer_id: 1,
            return_date: None,
            staff_id: 1,
            last_update: Utc::now(),
        }
    }

    #[tokio::test]
    async fn create_rental_conflicts_when_inventory_is_open() {
        let conn = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![open_rental(77, 5)]])
            .into_connection();

        let service = RentalService::new(Arc::new(conn));
        let err = service.create_rental(request()).await.unwrap_err();
        assert_matches!(err, ServiceError::Conflict(msg) if msg.contains("already rented"));

        // The conflict is decided before any write is attempted.
        let log = format!(
            "{:?}",
            Arc::try_unwrap(service.db).ok().unwrap().into_transaction_log()
        );
        assert!(!log.contains("INSERT"));
    }

    #[tokio::test]
    async fn create_rental_inserts_when_inventory_is_free() {
        let inserted = rental::Model {
            return_date: None,
            ..open_rental(123, 5)
        };
        let conn = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<rental::Model>::new()])
            .append_query_results([vec![inserted]])
            .into_connection();

        let service = RentalService::new(Arc::new(conn));
        let id = service.create_rental(request()).await.unwrap();
        assert_eq!(id, 123);
    }

    #[tokio::test]
    async fn sequential_rentals_of_same_inventory_stay_exclusive() {
        // First call finds no open rental and inserts; the second finds the
        // freshly created one and is refused.
        let conn = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<rental::Model>::new()])
            .append_query_results([vec![open_rental(123, 5)]])
            .append_query_results([vec![open_rental(123, 5)]])
            .into_connection();

        let service = RentalService::new(Arc::new(conn));
        assert_eq!(service.create_rental(request()).await.unwrap(), 123);
        let err = service.create_rental(request()).await.unwrap_err();
        assert_matches!(err, ServiceError::Conflict(_));
    }

    #[tokio::test]
    async fn return_rental_not_found_for_unknown_or_closed_rental() {
        let conn = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let service = RentalService::new(Arc::new(conn));
        let err = service.return_rental(42).await.unwrap_err();
        assert_matches!(err, ServiceError::NotFound(msg) if msg.contains("42"));
    }

    #[tokio::test]
    async fn return_rental_closes_an_open_rental() {
        let conn = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let service = RentalService::new(Arc::new(conn));
        assert!(service.return_rental(42).await.is_ok());
    }

    #[tokio::test]
    async fn second_return_of_same_rental_is_not_found() {
        // Documented idempotence choice: the close only matches open rows,
        // so re-returning reports NotFound instead of rewriting the date.
        let conn = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 0,
                },
            ])
            .into_connection();

        let service = RentalService::new(Arc::new(conn));
        assert!(service.return_rental(42).await.is_ok());
        let err = service.return_rental(42).await.unwrap_err();
        assert_matches!(err, ServiceError::NotFound(_));
    }
}
