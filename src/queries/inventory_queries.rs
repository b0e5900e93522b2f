use sea_orm::{ConnectionTrait, DbBackend, DbErr, FromQueryResult, Statement};

use crate::models::inventory::{InventoryAvailability, InventoryRow};

const BASE_INVENTORY_QUERY: &str = r#"
    SELECT
        inventory.inventory_id,
        inventory.last_update,
        inventory.film_id,
        film.title,
        inventory.store_id,
        store.address_id,
        address.phone
    FROM
        inventory
        INNER JOIN store ON inventory.store_id = store.store_id
        INNER JOIN film ON inventory.film_id = film.film_id
        INNER JOIN address ON store.address_id = address.address_id
"#;

/// Most-recently-rented unit per copy of the film at the store; a unit whose
/// latest rental has been returned (or that was never rented) is available.
const INVENTORY_AVAILABLE_QUERY: &str = r#"
    WITH latest_rentals AS (
        SELECT DISTINCT ON (inv.inventory_id)
            inv.inventory_id,
            inv.store_id,
            inv.film_id,
            f.title,
            r.rental_date,
            r.return_date
        FROM
            inventory inv
            JOIN film f ON inv.film_id = f.film_id
            LEFT JOIN rental r ON inv.inventory_id = r.inventory_id
        WHERE
            inv.store_id = $1
            AND inv.film_id = $2
        ORDER BY
            inv.inventory_id,
            r.rental_date DESC
    )
    SELECT
        inventory_id,
        store_id,
        film_id,
        title,
        TRUE AS available
    FROM latest_rentals
    WHERE return_date IS NOT NULL OR rental_date IS NULL
    LIMIT 1
"#;

pub async fn list_inventory<C: ConnectionTrait>(db: &C) -> Result<Vec<InventoryRow>, DbErr> {
    let stmt = Statement::from_string(DbBackend::Postgres, BASE_INVENTORY_QUERY);
    InventoryRow::find_by_statement(stmt).all(db).await
}

pub async fn list_inventory_by_store<C: ConnectionTrait>(
    db: &C,
    store_id: i32,
) -> Result<Vec<InventoryRow>, DbErr> {
    let sql = format!("{} WHERE store.store_id = $1", BASE_INVENTORY_QUERY);
    let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, [store_id.into()]);
    InventoryRow::find_by_statement(stmt).all(db).await
}

pub async fn find_available_inventory<C: ConnectionTrait>(
    db: &C,
    store_id: i32,
    film_id: i32,
) -> Result<Option<InventoryAvailability>, DbErr> {
    let stmt = Statement::from_sql_and_values(
        DbBackend::Postgres,
        INVENTORY_AVAILABLE_QUERY,
        [store_id.into(), film_id.into()],
    );
    InventoryAvailability::find_by_statement(stmt).one(db).await
}
