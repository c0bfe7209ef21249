use axum::{
    Json,
    extract::{Path, Query, State},
};
use std::sync::Arc;

use super::validation::{validate_actor_id, validate_page};
use super::{ApiError, AppState, PageQuery};
use crate::domain::{ActorId, Page};
use crate::models::actor::{ActorDetail, ActorSummary};

/// `GET /api/actor/`
///
/// Directors and actors share one table, so every person is listed.
pub async fn list_actors(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<ActorSummary>>, ApiError> {
    let default_size = state.config().read().await.catalog.page_size;
    let page = validate_page(&query, default_size)?;

    let actors = state.catalog_service().list_actors(page).await?;
    Ok(Json(actors))
}

/// `GET /api/actor/{id}/`
pub async fn get_actor(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ActorDetail>, ApiError> {
    let id = ActorId::new(validate_actor_id(&id)?);
    let actor = state.catalog_service().get_actor(id).await?;
    Ok(Json(actor))
}
