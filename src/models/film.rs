use sea_orm::FromQueryResult;
use serde::Serialize;

#[derive(Debug, Clone, Serialize, FromQueryResult)]
pub struct FilmRow {
    pub title: String,
    pub description: Option<String>,
    pub release_year: Option<i32>,
    pub language: String,
    pub rating: Option<String>,
}

/// Film with de-duplicated, sorted actor and category name lists.
#[derive(Debug, Clone, Serialize)]
pub struct FilmDetail {
    pub title: String,
    pub description: Option<String>,
    pub release_year: Option<i32>,
    pub language: String,
    pub rating: Option<String>,
    pub categories: Vec<String>,
    pub actors: Vec<String>,
}

/// One row of the film/actor/category join; aggregated in the service.
#[derive(Debug, Clone, FromQueryResult)]
pub struct FilmDetailRow {
    pub film_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub release_year: Option<i32>,
    pub language: String,
    pub rating: Option<String>,
    pub category: String,
    pub actor_name: String,
}
