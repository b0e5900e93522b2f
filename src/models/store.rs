use sea_orm::FromQueryResult;
use serde::Serialize;

/// Per-title copy count for one store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromQueryResult)]
pub struct StoreInventorySummary {
    pub store_id: i32,
    pub title: String,
    pub title_count: i64,
}
