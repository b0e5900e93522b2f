use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbBackend, DbErr, EntityTrait,
    FromQueryResult, QueryFilter, Set, Statement,
};

use crate::entities::rental;
use crate::models::rental::{CreateRentalRequest, RentalRow};

const OPEN_RENTALS_QUERY: &str = r#"
    SELECT
        customer.first_name,
        customer.last_name,
        address.phone,
        rental.rental_date,
        film.title
    FROM
        rental
        INNER JOIN customer ON rental.customer_id = customer.customer_id
        INNER JOIN address ON customer.address_id = address.address_id
        INNER JOIN inventory ON rental.inventory_id = inventory.inventory_id
        INNER JOIN film ON inventory.film_id = film.film_id
    WHERE
        rental.return_date IS NULL
"#;

pub async fn list_open_rentals<C: ConnectionTrait>(db: &C) -> Result<Vec<RentalRow>, DbErr> {
    let sql = format!("{} ORDER BY rental.rental_date", OPEN_RENTALS_QUERY);
    let stmt = Statement::from_string(DbBackend::Postgres, sql);
    RentalRow::find_by_statement(stmt).all(db).await
}

/// Open rentals past their film-specific due date
/// (`rental_date + rental_duration days`).
pub async fn list_late_rentals<C: ConnectionTrait>(db: &C) -> Result<Vec<RentalRow>, DbErr> {
    let sql = format!(
        "{} AND CURRENT_DATE > rental.rental_date + (film.rental_duration || ' days')::interval \
         ORDER BY rental.rental_date",
        OPEN_RENTALS_QUERY
    );
    let stmt = Statement::from_string(DbBackend::Postgres, sql);
    RentalRow::find_by_statement(stmt).all(db).await
}

/// The availability pre-check: an open rental row for this inventory unit,
/// if any exists.
pub async fn find_open_rental_by_inventory_id<C: ConnectionTrait>(
    db: &C,
    inventory_id: i32,
) -> Result<Option<rental::Model>, DbErr> {
    rental::Entity::find()
        .filter(rental::Column::InventoryId.eq(inventory_id))
        .filter(rental::Column::ReturnDate.is_null())
        .one(db)
        .await
}

pub async fn insert_rental<C: ConnectionTrait>(
    db: &C,
    req: &CreateRentalRequest,
) -> Result<rental::Model, DbErr> {
    let now = Utc::now();
    rental::ActiveModel {
        rental_date: Set(now),
        inventory_id: Set(req.inventory_id),
        customer_id: Set(req.customer_id),
        return_date: Set(None),
        staff_id: Set(req.staff_id),
        last_update: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Closes an open rental by stamping its return date. Only rows with a null
/// `return_date` match, so a second return affects zero rows.
pub async fn close_rental_by_id<C: ConnectionTrait>(db: &C, rental_id: i32) -> Result<u64, DbErr> {
    let now = Utc::now();
    let result = rental::Entity::update_many()
        .col_expr(rental::Column::ReturnDate, Expr::value(now))
        .col_expr(rental::Column::LastUpdate, Expr::value(now))
        .filter(rental::Column::RentalId.eq(rental_id))
        .filter(rental::Column::ReturnDate.is_null())
        .exec(db)
        .await?;
    Ok(result.rows_affected)
}
