use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbBackend, DbErr, EntityTrait,
    FromQueryResult, QueryFilter, Set, Statement,
};

use crate::entities::{address, city, customer};
use crate::models::customer::{AddressInput, CreateCustomerRequest, CustomerRentalRow};

const CUSTOMER_RENTALS_QUERY: &str = r#"
    SELECT
        customer.first_name,
        customer.last_name,
        address.phone,
        rental.rental_date,
        film.title,
        rental.rental_date + (film.rental_duration || ' days')::interval AS rental_due_date,
        CURRENT_DATE > rental.rental_date + (film.rental_duration || ' days')::interval AS overdue
    FROM
        rental
        INNER JOIN customer ON rental.customer_id = customer.customer_id
        INNER JOIN address ON customer.address_id = address.address_id
        INNER JOIN inventory ON rental.inventory_id = inventory.inventory_id
        INNER JOIN film ON inventory.film_id = film.film_id
    WHERE
        rental.return_date IS NULL
        AND customer.customer_id = $1
"#;

pub async fn list_customers<C: ConnectionTrait>(db: &C) -> Result<Vec<customer::Model>, DbErr> {
    customer::Entity::find().all(db).await
}

pub async fn find_customer_by_id<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<Option<customer::Model>, DbErr> {
    customer::Entity::find_by_id(id).one(db).await
}

/// Resolves a city name to its id. Returns `None` for unknown cities; the
/// onboarding workflow turns that into an invalid-input failure.
pub async fn find_city_id_by_name<C: ConnectionTrait>(
    db: &C,
    city_name: &str,
) -> Result<Option<i32>, DbErr> {
    Ok(city::Entity::find()
        .filter(city::Column::City.eq(city_name))
        .one(db)
        .await?
        .map(|c| c.city_id))
}

pub async fn insert_address<C: ConnectionTrait>(
    db: &C,
    input: &AddressInput,
    city_id: i32,
) -> Result<address::Model, DbErr> {
    address::ActiveModel {
        address: Set(input.address.clone()),
        address2: Set(input.address2.clone()),
        district: Set(input.district.clone()),
        city_id: Set(city_id),
        postal_code: Set(Some(input.postal_code.clone())),
        phone: Set(input.phone.clone()),
        last_update: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn insert_customer<C: ConnectionTrait>(
    db: &C,
    req: &CreateCustomerRequest,
    address_id: i32,
) -> Result<customer::Model, DbErr> {
    let now = Utc::now();
    customer::ActiveModel {
        store_id: Set(req.store_id),
        first_name: Set(req.first_name.clone()),
        last_name: Set(req.last_name.clone()),
        email: Set(Some(req.email.clone())),
        address_id: Set(address_id),
        activebool: Set(true),
        create_date: Set(now.date_naive()),
        last_update: Set(Some(now)),
        active: Set(Some(1)),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Deletes a customer, returning the affected-row count so callers can
/// distinguish "deleted" from "was never there".
pub async fn delete_customer_by_id<C: ConnectionTrait>(db: &C, id: i32) -> Result<u64, DbErr> {
    let result = customer::Entity::delete_by_id(id).exec(db).await?;
    Ok(result.rows_affected)
}

pub async fn find_customer_rentals<C: ConnectionTrait>(
    db: &C,
    customer_id: i32,
) -> Result<Vec<CustomerRentalRow>, DbErr> {
    let sql = format!("{} ORDER BY rental.rental_date", CUSTOMER_RENTALS_QUERY);
    let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, [customer_id.into()]);
    CustomerRentalRow::find_by_statement(stmt).all(db).await
}

pub async fn find_late_customer_rentals<C: ConnectionTrait>(
    db: &C,
    customer_id: i32,
) -> Result<Vec<CustomerRentalRow>, DbErr> {
    let sql = format!(
        "{} AND CURRENT_DATE > rental.rental_date + (film.rental_duration || ' days')::interval \
         ORDER BY rental.rental_date",
        CUSTOMER_RENTALS_QUERY
    );
    let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, [customer_id.into()]);
    CustomerRentalRow::find_by_statement(stmt).all(db).await
}
