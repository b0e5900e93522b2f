use std::sync::Arc;
use tracing::instrument;

use crate::db::DbPool;
use crate::errors::ServiceError;
use crate::models::store::StoreInventorySummary;
use crate::queries::store_queries;

#[derive(Clone)]
pub struct StoreService {
    db: Arc<DbPool>,
}

impl StoreService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    /// Per-title copy counts for one store. An unknown store id yields an
    /// empty list rather than an error; the grouping has no row to return.
    #[instrument(skip(self))]
    pub async fn inventory_summary(
        &self,
        store_id: i32,
    ) -> Result<Vec<StoreInventorySummary>, ServiceError> {
        let rows = store_queries::count_titles_by_store(&*self.db, store_id).await?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, Value};
    use std::collections::BTreeMap;

    fn summary_row(title: &str, count: i64) -> BTreeMap<&'static str, Value> {
        BTreeMap::from([
            ("store_id", Value::from(1)),
            ("title", Value::from(title.to_owned())),
            ("title_count", Value::from(count)),
        ])
    }

    #[tokio::test]
    async fn summary_passes_rows_through() {
        let conn = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                summary_row("ACADEMY DINOSAUR", 4),
                summary_row("AFFAIR PREJUDICE", 3),
            ]])
            .into_connection();

        let service = StoreService::new(Arc::new(conn));
        let summary = service.inventory_summary(1).await.unwrap();
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].title_count, 4);
    }

    #[tokio::test]
    async fn summary_is_stable_across_repeated_reads() {
        // Pure read: with unchanged data, asking twice yields the same rows.
        let rows = vec![summary_row("ACADEMY DINOSAUR", 4), summary_row("AFFAIR PREJUDICE", 3)];
        let conn = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([rows.clone()])
            .append_query_results([rows])
            .into_connection();

        let service = StoreService::new(Arc::new(conn));
        let first = service.inventory_summary(1).await.unwrap();
        let second = service.inventory_summary(1).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[tokio::test]
    async fn summary_for_unknown_store_is_empty() {
        let conn = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<BTreeMap<&'static str, Value>>::new()])
            .into_connection();

        let service = StoreService::new(Arc::new(conn));
        assert!(service.inventory_summary(99).await.unwrap().is_empty());
    }
}
