use axum::{
    Json,
    extract::{Path, Query, State},
};
use std::sync::Arc;

use super::validation::validate_page;
use super::{ApiError, AppState, PageQuery};
use crate::domain::{MovieKey, Page};
use crate::models::movie::{MovieDetail, MovieSummary};

/// `GET /api/movie/`
pub async fn list_movies(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<MovieSummary>>, ApiError> {
    let default_size = state.config().read().await.catalog.page_size;
    let page = validate_page(&query, default_size)?;

    let movies = state.catalog_service().list_movies(page).await?;
    Ok(Json(movies))
}

/// `GET /api/movie/{key}/`, where `key` is a numeric id or a slug.
pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> Result<Json<MovieDetail>, ApiError> {
    let key = MovieKey::parse(&key);
    let movie = state.catalog_service().get_movie(&key).await?;
    Ok(Json(movie))
}
