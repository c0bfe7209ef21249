//! Read side of the catalog: movie listings and details, actors and the
//! small reference tables.

use crate::domain::{ActorId, MovieKey, Page, PageRequest};
use crate::models::actor::{ActorDetail, ActorSummary};
use crate::models::movie::{MovieDetail, MovieSummary};
use crate::models::reference::{CategoryView, GenreView, StarView};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Movie {0} not found")]
    MovieNotFound(MovieKey),

    #[error("Actor {0} not found")]
    ActorNotFound(ActorId),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for CatalogError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for CatalogError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

#[async_trait::async_trait]
pub trait CatalogService: Send + Sync {
    /// Published movies in insertion order.
    async fn list_movies(&self, page: PageRequest) -> Result<Page<MovieSummary>, CatalogError>;

    /// A published movie with people, genres, average star and review threads.
    async fn get_movie(&self, key: &MovieKey) -> Result<MovieDetail, CatalogError>;

    /// Every person, whatever their role.
    async fn list_actors(&self, page: PageRequest) -> Result<Page<ActorSummary>, CatalogError>;

    async fn get_actor(&self, id: ActorId) -> Result<ActorDetail, CatalogError>;

    async fn list_categories(&self) -> Result<Vec<CategoryView>, CatalogError>;

    async fn list_genres(&self) -> Result<Vec<GenreView>, CatalogError>;

    async fn list_rating_stars(&self) -> Result<Vec<StarView>, CatalogError>;
}
