use sea_orm::{ConnectionTrait, DbBackend, DbErr, FromQueryResult, Statement};

use crate::models::store::StoreInventorySummary;

const STORE_SUMMARY_QUERY: &str = r#"
    SELECT
        store.store_id,
        film.title,
        COUNT(film.title) AS title_count
    FROM
        inventory
        INNER JOIN store ON inventory.store_id = store.store_id
        INNER JOIN film ON inventory.film_id = film.film_id
    WHERE
        store.store_id = $1
    GROUP BY store.store_id, film.title
"#;

pub async fn count_titles_by_store<C: ConnectionTrait>(
    db: &C,
    store_id: i32,
) -> Result<Vec<StoreInventorySummary>, DbErr> {
    let stmt =
        Statement::from_sql_and_values(DbBackend::Postgres, STORE_SUMMARY_QUERY, [store_id.into()]);
    StoreInventorySummary::find_by_statement(stmt).all(db).await
}
