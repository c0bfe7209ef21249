//! `SeaORM` implementation of the `CatalogService` trait.

use crate::catalog::rating::tally_by_movie;
use crate::catalog::{FlatReview, build_forest};
use crate::db::Store;
use crate::domain::{ActorId, MovieId, MovieKey, Page, PageRequest};
use crate::entities::movie;
use crate::models::actor::{ActorDetail, ActorSummary, Role};
use crate::models::movie::{MovieDetail, MovieSummary};
use crate::models::reference::{CategoryView, GenreView, StarView};
use crate::services::catalog_service::{CatalogError, CatalogService};
use async_trait::async_trait;
use tracing::debug;

pub struct SeaOrmCatalogService {
    store: Store,
}

impl SeaOrmCatalogService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    /// Builds summaries for a batch of movies with one query per relation,
    /// independent of the batch size.
    async fn summarize(&self, movies: Vec<movie::Model>) -> Result<Vec<MovieSummary>, CatalogError> {
        let ids: Vec<i32> = movies.iter().map(|m| m.id).collect();
        let mut category_ids: Vec<i32> = movies.iter().filter_map(|m| m.category_id).collect();
        category_ids.sort_unstable();
        category_ids.dedup();

        let categories = self.store.get_category_titles(&category_ids).await?;
        let mut genres = self.store.get_genre_titles_for_movies(&ids).await?;
        let tallies = tally_by_movie(self.store.get_star_values_for_movies(&ids).await?);

        Ok(movies
            .into_iter()
            .map(|m| MovieSummary {
                id: MovieId::new(m.id),
                category: m.category_id.and_then(|c| categories.get(&c).cloned()),
                genres: genres.remove(&m.id).unwrap_or_default(),
                middle_star: tallies.get(&m.id).and_then(|t| t.middle_star()),
                title: m.title,
                tagline: m.tagline,
                year: m.year,
                poster: m.poster,
            })
            .collect())
    }
}

#[async_trait]
impl CatalogService for SeaOrmCatalogService {
    async fn list_movies(&self, page: PageRequest) -> Result<Page<MovieSummary>, CatalogError> {
        let (movies, count) = self.store.page_published_movies(page).await?;
        let results = self.summarize(movies).await?;

        Ok(Page {
            count,
            page: page.page,
            page_size: page.page_size,
            results,
        })
    }

    async fn get_movie(&self, key: &MovieKey) -> Result<MovieDetail, CatalogError> {
        let Some(movie) = self.store.find_published_movie(key).await? else {
            debug!(%key, "Movie lookup missed or hit a draft");
            return Err(CatalogError::MovieNotFound(key.clone()));
        };

        let ids = [movie.id];
        let category = match movie.category_id {
            Some(category_id) => self
                .store
                .get_category_titles(&[category_id])
                .await?
                .remove(&category_id),
            None => None,
        };
        let mut directors = self.store.get_people_for_movies(&ids, Role::Director).await?;
        let mut actors = self.store.get_people_for_movies(&ids, Role::Actor).await?;
        let mut genres = self.store.get_genre_titles_for_movies(&ids).await?;
        let tallies = tally_by_movie(self.store.get_star_values_for_movies(&ids).await?);

        let reviews = self
            .store
            .get_reviews_for_movie(movie.id)
            .await?
            .into_iter()
            .map(|r| FlatReview {
                id: r.id,
                name: r.name,
                text: r.text,
                parent_id: r.parent_id,
            })
            .collect();

        Ok(MovieDetail {
            id: MovieId::new(movie.id),
            category,
            directors: directors.remove(&movie.id).unwrap_or_default(),
            actors: actors.remove(&movie.id).unwrap_or_default(),
            genres: genres.remove(&movie.id).unwrap_or_default(),
            middle_star: tallies.get(&movie.id).and_then(|t| t.middle_star()),
            reviews: build_forest(reviews),
            title: movie.title,
            tagline: movie.tagline,
            description: movie.description,
            poster: movie.poster,
            year: movie.year,
            country: movie.country,
            world_premiere: movie.world_premiere,
            budget: movie.budget,
            fees_in_usa: movie.fees_in_usa,
            fees_in_world: movie.fees_in_world,
            slug: movie.slug,
        })
    }

    async fn list_actors(&self, page: PageRequest) -> Result<Page<ActorSummary>, CatalogError> {
        let (actors, count) = self.store.page_actors(page).await?;

        Ok(Page {
            count,
            page: page.page,
            page_size: page.page_size,
            results: actors
                .into_iter()
                .map(|a| ActorSummary {
                    id: ActorId::new(a.id),
                    name: a.name,
                    image: a.image,
                })
                .collect(),
        })
    }

    async fn get_actor(&self, id: ActorId) -> Result<ActorDetail, CatalogError> {
        let actor = self
            .store
            .get_actor(id.value())
            .await?
            .ok_or(CatalogError::ActorNotFound(id))?;

        let directed = self
            .store
            .get_published_titles_for_person(actor.id, Role::Director)
            .await?;
        let acted_in = self
            .store
            .get_published_titles_for_person(actor.id, Role::Actor)
            .await?;

        Ok(ActorDetail {
            id,
            name: actor.name,
            age: actor.age,
            description: actor.description,
            image: actor.image,
            directed,
            acted_in,
        })
    }

    async fn list_categories(&self) -> Result<Vec<CategoryView>, CatalogError> {
        let rows = self.store.list_categories().await?;
        Ok(rows
            .into_iter()
            .map(|c| CategoryView {
                id: c.id,
                title: c.title,
                description: c.description,
                slug: c.slug,
            })
            .collect())
    }

    async fn list_genres(&self) -> Result<Vec<GenreView>, CatalogError> {
        let rows = self.store.list_genres().await?;
        Ok(rows
            .into_iter()
            .map(|g| GenreView {
                id: g.id,
                title: g.title,
                description: g.description,
                slug: g.slug,
            })
            .collect())
    }

    async fn list_rating_stars(&self) -> Result<Vec<StarView>, CatalogError> {
        let rows = self.store.list_rating_stars().await?;
        Ok(rows
            .into_iter()
            .map(|s| StarView {
                id: s.id,
                value: s.value,
            })
            .collect())
    }
}
