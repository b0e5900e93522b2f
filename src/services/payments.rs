use sea_orm::SqlErr;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::db::DbPool;
use crate::errors::ServiceError;
use crate::models::payment::PaymentRequest;
use crate::queries::payment_queries;

#[derive(Clone)]
pub struct PaymentService {
    db: Arc<DbPool>,
}

impl PaymentService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    /// Records a payment against a rental.
    ///
    /// A foreign-key violation means the caller referenced a customer, staff
    /// member or rental that does not exist, which is their mistake, not
    /// ours. The payment table is range-partitioned by date in the stock
    /// schema; a payment dated outside every partition surfaces as a server
    /// error because only an operator can fix the partition set.
    #[instrument(skip(self, req), fields(rental_id = req.rental_id))]
    pub async fn make_payment(&self, req: PaymentRequest) -> Result<i32, ServiceError> {
        match payment_queries::insert_payment(&*self.db, &req).await {
            Ok(payment) => {
                info!(payment_id = payment.payment_id, "payment recorded");
                Ok(payment.payment_id)
            }
            Err(e) => {
                if matches!(e.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_))) {
                    return Err(ServiceError::InvalidInput(
                        "payment references an unknown customer, staff member or rental"
                            .to_string(),
                    ));
                }
                let detail = e.to_string();
                if detail.contains("partition") || detail.contains("23514") {
                    warn!(error = %detail, "payment date fell outside every partition");
                    return Err(ServiceError::InternalError(
                        "payment date is not covered by the payment table partitions".to_string(),
                    ));
                }
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::payment;
    use assert_matches::assert_matches;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase};

    fn request() -> PaymentRequest {
        PaymentRequest {
            customer_id: 1,
            staff_id: 1,
            rental_id: 7,
            amount: Decimal::new(499, 2),
        }
    }

    #[tokio::test]
    async fn make_payment_returns_new_id() {
        let conn = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![payment::Model {
                payment_id: 32099,
                customer_id: 1,
                staff_id: 1,
                rental_id: 7,
                amount: Decimal::new(499, 2),
                payment_date: Utc::now(),
            }]])
            .into_connection();

        let service = PaymentService::new(Arc::new(conn));
        let id = service.make_payment(request()).await.unwrap();
        assert_eq!(id, 32099);
    }

    #[tokio::test]
    async fn make_payment_maps_partition_error_to_internal() {
        let conn = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom(
                "no partition of relation \"payment\" found for row".to_string(),
            )])
            .into_connection();

        let service = PaymentService::new(Arc::new(conn));
        let err = service.make_payment(request()).await.unwrap_err();
        assert_matches!(err, ServiceError::InternalError(msg) if msg.contains("partition"));
    }

    #[tokio::test]
    async fn make_payment_propagates_other_database_errors() {
        let conn = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("connection reset".to_string())])
            .into_connection();

        let service = PaymentService::new(Arc::new(conn));
        let err = service.make_payment(request()).await.unwrap_err();
        assert_matches!(err, ServiceError::DatabaseError(_));
    }
}
