use sea_orm::TransactionTrait;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::db::DbPool;
use crate::errors::ServiceError;
use crate::models::customer::{CreateCustomerRequest, CustomerRentalRow, CustomerSummary};
use crate::queries::customer_queries;

/// Service for managing customers, including the transactional onboarding
/// workflow.
#[derive(Clone)]
pub struct CustomerService {
    db: Arc<DbPool>,
}

impl CustomerService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn list_customers(&self) -> Result<Vec<CustomerSummary>, ServiceError> {
        let customers = customer_queries::list_customers(&*self.db).await?;
        Ok(customers.into_iter().map(CustomerSummary::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn get_customer(&self, id: i32) -> Result<CustomerSummary, ServiceError> {
        customer_queries::find_customer_by_id(&*self.db, id)
            .await?
            .map(CustomerSummary::from)
            .ok_or_else(|| ServiceError::NotFound(format!("no customer with id {}", id)))
    }

    /// Creates a customer together with its address in a single transaction.
    ///
    /// City resolution, address insert and customer insert either all commit
    /// or none do. Every failure branch rolls back explicitly; if the future
    /// is dropped mid-flight (panic, client disconnect, request deadline),
    /// the uncommitted transaction rolls back on drop.
    #[instrument(skip(self, req), fields(store_id = req.store_id))]
    pub async fn create_customer(
        &self,
        req: CreateCustomerRequest,
    ) -> Result<CustomerSummary, ServiceError> {
        let txn = self.db.begin().await?;

        let city_id =
            match customer_queries::find_city_id_by_name(&txn, &req.address.city_name).await {
                Ok(Some(id)) => id,
                Ok(None) => {
                    txn.rollback().await?;
                    return Err(ServiceError::InvalidInput(format!(
                        "unknown city {:?}",
                        req.address.city_name
                    )));
                }
                Err(e) => {
                    txn.rollback().await?;
                    return Err(e.into());
                }
            };

        let address = match customer_queries::insert_address(&txn, &req.address, city_id).await {
            Ok(address) => address,
            Err(e) => {
                txn.rollback().await?;
                return Err(e.into());
            }
        };

        let customer =
            match customer_queries::insert_customer(&txn, &req, address.address_id).await {
                Ok(customer) => customer,
                Err(e) => {
                    txn.rollback().await?;
                    return Err(e.into());
                }
            };

        txn.commit().await?;

        info!(
            customer_id = customer.customer_id,
            address_id = address.address_id,
            "customer created"
        );
        Ok(customer.into())
    }

    #[instrument(skip(self))]
    pub async fn delete_customer(&self, id: i32) -> Result<(), ServiceError> {
        let rows = customer_queries::delete_customer_by_id(&*self.db, id).await?;
        if rows == 0 {
            return Err(ServiceError::NotFound(format!("no customer with id {}", id)));
        }
        Ok(())
    }

    /// Open rentals for one customer; `late_only` keeps only rentals past
    /// their due date.
    #[instrument(skip(self))]
    pub async fn get_customer_rentals(
        &self,
        customer_id: i32,
        late_only: bool,
    ) -> Result<Vec<CustomerRentalRow>, ServiceError> {
        let rows = if late_only {
            customer_queries::find_late_customer_rentals(&*self.db, customer_id).await?
        } else {
            customer_queries::find_customer_rentals(&*self.db, customer_id).await?
        };
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{address, city, customer};
    use crate::models::customer::AddressInput;
    use assert_matches::assert_matches;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult};

    fn onboarding_request(city_name: &str) -> CreateCustomerRequest {
        CreateCustomerRequest {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: "jane@x.com".to_string(),
            store_id: 1,
            address: AddressInput {
                address: "47 MySakila Drive".to_string(),
                address2: None,
                district: "Alberta".to_string(),
                city_name: city_name.to_string(),
                postal_code: "T1K5X8".to_string(),
                phone: "14035551234".to_string(),
            },
        }
    }

    fn lethbridge() -> city::Model {
        city::Model {
            city_id: 300,
            city: "Lethbridge".to_string(),
            country_id: 20,
            last_update: Utc::now(),
        }
    }

    fn inserted_address() -> address::Model {
        address::Model {
            address_id: 606,
            address: "47 MySakila Drive".to_string(),
            address2: None,
            district: "Alberta".to_string(),
            city_id: 300,
            postal_code: Some("T1K5X8".to_string()),
            phone: "14035551234".to_string(),
            last_update: Utc::now(),
        }
    }

    fn inserted_customer() -> customer::Model {
        customer::Model {
            customer_id: 600,
            store_id: 1,
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: Some("jane@x.com".to_string()),
            address_id: 606,
            activebool: true,
            create_date: Utc::now().date_naive(),
            last_update: Some(Utc::now()),
            active: Some(1),
        }
    }

    #[tokio::test]
    async fn create_customer_commits_all_three_steps() {
        let conn = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![lethbridge()]])
            .append_query_results([vec![inserted_address()]])
            .append_query_results([vec![inserted_customer()]])
            .into_connection();

        let service = CustomerService::new(Arc::new(conn));
        let created = service
            .create_customer(onboarding_request("Lethbridge"))
            .await
            .expect("onboarding should succeed");

        assert_eq!(created.id, 600);
        assert_eq!(created.first_name, "Jane");
        assert_eq!(created.email.as_deref(), Some("jane@x.com"));

        let log = format!(
            "{:?}",
            Arc::try_unwrap(service.db).ok().unwrap().into_transaction_log()
        );
        assert!(log.contains("INSERT INTO \"address\""));
        // The address insert must carry the resolved Lethbridge city id.
        assert!(log.contains("Int(300)"));
        assert!(log.contains("INSERT INTO \"customer\""));
        assert!(log.contains("COMMIT"));
        assert!(!log.contains("ROLLBACK"));
    }

    #[tokio::test]
    async fn create_customer_rejects_unknown_city_without_inserting() {
        let conn = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<city::Model>::new()])
            .into_connection();

        let service = CustomerService::new(Arc::new(conn));
        let err = service
            .create_customer(onboarding_request("Atlantis"))
            .await
            .unwrap_err();
        assert_matches!(err, ServiceError::InvalidInput(msg) if msg.contains("Atlantis"));

        let log = format!(
            "{:?}",
            Arc::try_unwrap(service.db).ok().unwrap().into_transaction_log()
        );
        assert!(!log.contains("INSERT"));
        assert!(log.contains("ROLLBACK"));
        assert!(!log.contains("COMMIT"));
    }

    #[tokio::test]
    async fn create_customer_rolls_back_when_customer_insert_fails() {
        let conn = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![lethbridge()]])
            .append_query_results([vec![inserted_address()]])
            .append_query_errors([DbErr::Custom("customer insert failed".to_string())])
            .into_connection();

        let service = CustomerService::new(Arc::new(conn));
        let err = service
            .create_customer(onboarding_request("Lethbridge"))
            .await
            .unwrap_err();
        assert_matches!(err, ServiceError::DatabaseError(_));

        // The address insert happened inside the transaction but nothing
        // committed, so no orphaned address can be observed.
        let log = format!(
            "{:?}",
            Arc::try_unwrap(service.db).ok().unwrap().into_transaction_log()
        );
        assert!(log.contains("ROLLBACK"));
        assert!(!log.contains("COMMIT"));
    }

    #[tokio::test]
    async fn delete_customer_not_found_when_zero_rows_affected() {
        let conn = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();

        let service = CustomerService::new(Arc::new(conn));
        let err = service.delete_customer(9999).await.unwrap_err();
        assert_matches!(err, ServiceError::NotFound(msg) if msg.contains("9999"));
    }

    #[tokio::test]
    async fn delete_customer_succeeds_when_a_row_was_deleted() {
        let conn = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let service = CustomerService::new(Arc::new(conn));
        assert!(service.delete_customer(1).await.is_ok());
    }

    #[tokio::test]
    async fn get_customer_not_found() {
        let conn = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<customer::Model>::new()])
            .into_connection();

        let service = CustomerService::new(Arc::new(conn));
        let err = service.get_customer(42).await.unwrap_err();
        assert_matches!(err, ServiceError::NotFound(_));
    }
}
