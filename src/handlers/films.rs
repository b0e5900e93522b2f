use axum::{
    extract::{Json, Path, Query, State},
    response::IntoResponse,
    routing::get,
    Router,
};
use serde::Deserialize;

use crate::errors::ServiceError;
use crate::handlers::AppState;

#[derive(Debug, Deserialize)]
struct FilmSearchParams {
    title: Option<String>,
}

async fn list_films(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    let films = state.films.get_films().await?;
    Ok(Json(films))
}

async fn get_film(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let film = state.films.get_film(id).await?;
    Ok(Json(film))
}

async fn search_films(
    State(state): State<AppState>,
    Query(params): Query<FilmSearchParams>,
) -> Result<impl IntoResponse, ServiceError> {
    let title = params
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ServiceError::InvalidInput("missing search term 'title'".to_string()))?;
    let films = state.films.search_films(title).await?;
    Ok(Json(films))
}

async fn get_film_detail(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, ServiceError> {
    let detail = state.films.get_film_detail(id).await?;
    Ok(Json(detail))
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_films))
        .route("/search", get(search_films))
        .route("/:id", get(get_film))
        .route("/:id/detail", get(get_film_detail))
}
