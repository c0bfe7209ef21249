use axum::{Json, extract::State};
use std::sync::Arc;

use super::{ApiError, AppState};
use crate::models::reference::{CategoryView, GenreView, StarView};

/// `GET /api/category/`
pub async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CategoryView>>, ApiError> {
    Ok(Json(state.catalog_service().list_categories().await?))
}

/// `GET /api/genre/`
pub async fn list_genres(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<GenreView>>, ApiError> {
    Ok(Json(state.catalog_service().list_genres().await?))
}

/// `GET /api/star/`
pub async fn list_rating_stars(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<StarView>>, ApiError> {
    Ok(Json(state.catalog_service().list_rating_stars().await?))
}
