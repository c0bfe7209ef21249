use crate::domain::{MovieKey, PageRequest};
use crate::entities::{actor, category, genre, movie, rating, rating_star, review};
use crate::models::actor::{NewActor, Role};
use crate::models::feedback::{NewReview, ReviewThread};
use crate::models::movie::NewMovie;
use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let path_str = db_url.trim_start_matches("sqlite:");
        if !path_str.starts_with(":memory:") {
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn movie_repo(&self) -> repositories::movie::MovieRepository {
        repositories::movie::MovieRepository::new(self.conn.clone())
    }

    fn actor_repo(&self) -> repositories::actor::ActorRepository {
        repositories::actor::ActorRepository::new(self.conn.clone())
    }

    fn reference_repo(&self) -> repositories::reference::ReferenceRepository {
        repositories::reference::ReferenceRepository::new(self.conn.clone())
    }

    fn rating_repo(&self) -> repositories::rating::RatingRepository {
        repositories::rating::RatingRepository::new(self.conn.clone())
    }

    fn review_repo(&self) -> repositories::review::ReviewRepository {
        repositories::review::ReviewRepository::new(self.conn.clone())
    }

    // ========== Movies ==========

    pub async fn add_movie(&self, movie: &NewMovie) -> Result<i32> {
        self.movie_repo().add(movie).await
    }

    /// Stores a movie together with its ratings and review threads; nothing
    /// is written if any insert fails.
    pub async fn add_movie_with_feedback(
        &self,
        movie: &NewMovie,
        ratings: &[(String, i32)],
        reviews: &[ReviewThread],
    ) -> Result<(i32, usize)> {
        self.movie_repo()
            .add_with_feedback(movie, ratings, reviews)
            .await
    }

    pub async fn movie_exists(&self, id: i32) -> Result<bool> {
        self.movie_repo().exists(id).await
    }

    pub async fn get_movie_by_slug(&self, slug: &str) -> Result<Option<movie::Model>> {
        self.movie_repo().get_by_slug(slug).await
    }

    pub async fn find_published_movie(&self, key: &MovieKey) -> Result<Option<movie::Model>> {
        self.movie_repo().find_published(key).await
    }

    pub async fn page_published_movies(
        &self,
        page: PageRequest,
    ) -> Result<(Vec<movie::Model>, u64)> {
        self.movie_repo().page_published(page).await
    }

    pub async fn list_published_movies(&self) -> Result<Vec<movie::Model>> {
        self.movie_repo().list_published().await
    }

    pub async fn get_category_titles(&self, ids: &[i32]) -> Result<HashMap<i32, String>> {
        self.movie_repo().category_titles(ids).await
    }

    pub async fn get_genre_titles_for_movies(
        &self,
        movie_ids: &[i32],
    ) -> Result<HashMap<i32, Vec<String>>> {
        self.movie_repo().genre_titles_for(movie_ids).await
    }

    pub async fn get_people_for_movies(
        &self,
        movie_ids: &[i32],
        role: Role,
    ) -> Result<HashMap<i32, Vec<String>>> {
        self.movie_repo().people_for(movie_ids, role).await
    }

    pub async fn get_published_titles_for_person(
        &self,
        actor_id: i32,
        role: Role,
    ) -> Result<Vec<String>> {
        self.movie_repo()
            .published_titles_for_person(actor_id, role)
            .await
    }

    // ========== Actors ==========

    pub async fn add_actor(&self, actor: &NewActor) -> Result<i32> {
        self.actor_repo().add(actor).await
    }

    pub async fn get_actor(&self, id: i32) -> Result<Option<actor::Model>> {
        self.actor_repo().get(id).await
    }

    pub async fn page_actors(&self, page: PageRequest) -> Result<(Vec<actor::Model>, u64)> {
        self.actor_repo().page(page).await
    }

    pub async fn list_actors(&self) -> Result<Vec<actor::Model>> {
        self.actor_repo().list_all().await
    }

    // ========== Categories & Genres ==========

    pub async fn add_category(&self, title: &str, description: &str, slug: &str) -> Result<i32> {
        self.reference_repo()
            .add_category(title, description, slug)
            .await
    }

    pub async fn add_genre(&self, title: &str, description: &str, slug: &str) -> Result<i32> {
        self.reference_repo()
            .add_genre(title, description, slug)
            .await
    }

    pub async fn get_category_by_slug(&self, slug: &str) -> Result<Option<category::Model>> {
        self.reference_repo().category_by_slug(slug).await
    }

    pub async fn get_genre_by_slug(&self, slug: &str) -> Result<Option<genre::Model>> {
        self.reference_repo().genre_by_slug(slug).await
    }

    pub async fn list_categories(&self) -> Result<Vec<category::Model>> {
        self.reference_repo().list_categories().await
    }

    pub async fn list_genres(&self) -> Result<Vec<genre::Model>> {
        self.reference_repo().list_genres().await
    }

    // ========== Ratings ==========

    pub async fn sync_rating_stars(&self, values: &[i32]) -> Result<()> {
        self.rating_repo().sync_stars(values).await
    }

    pub async fn list_rating_stars(&self) -> Result<Vec<rating_star::Model>> {
        self.rating_repo().list_stars().await
    }

    pub async fn get_rating_star(&self, value: i32) -> Result<Option<rating_star::Model>> {
        self.rating_repo().star_by_value(value).await
    }

    pub async fn get_star_values_for_movies(&self, movie_ids: &[i32]) -> Result<Vec<(i32, i32)>> {
        self.rating_repo().star_values_for(movie_ids).await
    }

    pub async fn add_rating(&self, ip: &str, star_id: i32, movie_id: i32) -> Result<rating::Model> {
        self.rating_repo().insert(ip, star_id, movie_id).await
    }

    pub async fn upsert_rating(
        &self,
        ip: &str,
        star_id: i32,
        movie_id: i32,
    ) -> Result<(rating::Model, bool)> {
        self.rating_repo().upsert(ip, star_id, movie_id).await
    }

    pub async fn rating_count(&self) -> Result<u64> {
        self.rating_repo().count().await
    }

    // ========== Reviews ==========

    pub async fn add_review(&self, review: &NewReview) -> Result<review::Model> {
        self.review_repo().add(review).await
    }

    pub async fn get_review(&self, id: i32) -> Result<Option<review::Model>> {
        self.review_repo().get(id).await
    }

    pub async fn get_reviews_for_movie(&self, movie_id: i32) -> Result<Vec<review::Model>> {
        self.review_repo().for_movie(movie_id).await
    }

    pub async fn review_count(&self) -> Result<u64> {
        self.review_repo().count().await
    }
}
