use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::instrument;

use crate::db::DbPool;
use crate::errors::ServiceError;
use crate::models::film::{FilmDetail, FilmRow};
use crate::queries::film_queries;

#[derive(Clone)]
pub struct FilmService {
    db: Arc<DbPool>,
}

impl FilmService {
    pub fn new(db: Arc<DbPool>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn get_films(&self) -> Result<Vec<FilmRow>, ServiceError> {
        let mut films = film_queries::list_films(&*self.db).await?;
        for film in &mut films {
            trim_language(film);
        }
        Ok(films)
    }

    #[instrument(skip(self))]
    pub async fn get_film(&self, id: i32) -> Result<FilmRow, ServiceError> {
        let mut film = film_queries::find_film_by_id(&*self.db, id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("no film with id {}", id)))?;
        trim_language(&mut film);
        Ok(film)
    }

    #[instrument(skip(self))]
    pub async fn search_films(&self, title: &str) -> Result<Vec<FilmRow>, ServiceError> {
        let mut films = film_queries::find_films_by_title(&*self.db, title).await?;
        for film in &mut films {
            trim_language(film);
        }
        Ok(films)
    }

    /// Film with de-duplicated, sorted actor and category lists, aggregated
    /// from the one-row-per-pair join.
    #[instrument(skip(self))]
    pub async fn get_film_detail(&self, id: i32) -> Result<FilmDetail, ServiceError> {
        let rows = film_queries::find_film_detail_rows(&*self.db, id).await?;
        let first = rows
            .first()
            .ok_or_else(|| ServiceError::NotFound(format!("no film with id {}", id)))?;

        let mut detail = FilmDetail {
            title: first.title.clone(),
            description: first.description.clone(),
            release_year: first.release_year,
            // language is a fixed-width char column; strip the padding
            language: first.language.trim().to_string(),
            rating: first.rating.clone(),
            categories: Vec::new(),
            actors: Vec::new(),
        };

        let categories: BTreeSet<_> = rows.iter().map(|r| r.category.clone()).collect();
        let actors: BTreeSet<_> = rows.iter().map(|r| r.actor_name.clone()).collect();
        detail.categories = categories.into_iter().collect();
        detail.actors = actors.into_iter().collect();

        Ok(detail)
    }
}

fn trim_language(film: &mut FilmRow) {
    film.language = film.language.trim().to_string();
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use sea_orm::{DatabaseBackend, MockDatabase, Value};
    use std::collections::BTreeMap;

    fn detail_row(category: &str, actor: &str) -> BTreeMap<&'static str, Value> {
        BTreeMap::from([
            ("film_id", Value::from(1)),
            ("title", Value::from("ACADEMY DINOSAUR")),
            ("description", Value::from(Some("An epic drama".to_owned()))),
            ("release_year", Value::from(Some(2006))),
            ("language", Value::from("English             ")),
            ("rating", Value::from(Some("PG".to_owned()))),
            ("category", Value::from(category.to_owned())),
            ("actor_name", Value::from(actor.to_owned())),
        ])
    }

    #[tokio::test]
    async fn film_detail_deduplicates_and_sorts_names() {
        let conn = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                detail_row("Documentary", "PENELOPE GUINESS"),
                detail_row("Documentary", "CHRISTIAN GABLE"),
                detail_row("Family", "PENELOPE GUINESS"),
            ]])
            .into_connection();

        let service = FilmService::new(Arc::new(conn));
        let detail = service.get_film_detail(1).await.unwrap();

        assert_eq!(detail.language, "English");
        assert_eq!(detail.categories, vec!["Documentary", "Family"]);
        assert_eq!(detail.actors, vec!["CHRISTIAN GABLE", "PENELOPE GUINESS"]);
    }

    #[tokio::test]
    async fn film_detail_not_found_when_join_returns_no_rows() {
        let conn = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<BTreeMap<&'static str, Value>>::new()])
            .into_connection();

        let service = FilmService::new(Arc::new(conn));
        let err = service.get_film_detail(9999).await.unwrap_err();
        assert_matches!(err, ServiceError::NotFound(_));
    }
}
