use sea_orm::{ConnectionTrait, DbBackend, DbErr, FromQueryResult, Statement};

use crate::models::film::{FilmDetailRow, FilmRow};

const BASE_FILM_QUERY: &str = r#"
    SELECT
        film.title,
        film.description,
        film.release_year,
        language.name AS language,
        film.rating
    FROM film
    INNER JOIN language ON film.language_id = language.language_id
"#;

const FILM_DETAIL_QUERY: &str = r#"
    SELECT
        film.film_id,
        film.title,
        film.description,
        film.release_year,
        language.name AS language,
        film.rating,
        category.name AS category,
        actor.first_name || ' ' || actor.last_name AS actor_name
    FROM film
    INNER JOIN language ON film.language_id = language.language_id
    INNER JOIN film_category ON film.film_id = film_category.film_id
    INNER JOIN category ON film_category.category_id = category.category_id
    INNER JOIN film_actor ON film.film_id = film_actor.film_id
    INNER JOIN actor ON film_actor.actor_id = actor.actor_id
    WHERE film.film_id = $1
"#;

pub async fn list_films<C: ConnectionTrait>(db: &C) -> Result<Vec<FilmRow>, DbErr> {
    let stmt = Statement::from_string(DbBackend::Postgres, BASE_FILM_QUERY);
    FilmRow::find_by_statement(stmt).all(db).await
}

pub async fn find_film_by_id<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<Option<FilmRow>, DbErr> {
    let sql = format!("{} WHERE film.film_id = $1", BASE_FILM_QUERY);
    let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, [id.into()]);
    FilmRow::find_by_statement(stmt).one(db).await
}

pub async fn find_films_by_title<C: ConnectionTrait>(
    db: &C,
    title: &str,
) -> Result<Vec<FilmRow>, DbErr> {
    let sql = format!("{} WHERE film.title = $1", BASE_FILM_QUERY);
    let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, [title.into()]);
    FilmRow::find_by_statement(stmt).all(db).await
}

/// One row per (category, actor) pair; the film service de-duplicates.
pub async fn find_film_detail_rows<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<Vec<FilmDetailRow>, DbErr> {
    let stmt = Statement::from_sql_and_values(DbBackend::Postgres, FILM_DETAIL_QUERY, [id.into()]);
    FilmDetailRow::find_by_statement(stmt).all(db).await
}
