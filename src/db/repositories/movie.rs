use crate::db::repositories::rating::insert_rating;
use crate::db::repositories::review::insert_review;
use crate::domain::{MovieId, MovieKey, PageRequest, ReviewId};
use crate::entities::{
    actor, category, genre, movie, movie_actors, movie_directors, movie_genres, prelude::*,
};
use crate::models::actor::Role;
use crate::models::feedback::{NewReview, ReviewThread};
use crate::models::movie::NewMovie;
use anyhow::Result;
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, EntityTrait, JoinType,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};
use std::collections::HashMap;
use tracing::info;

/// Inserts a movie and its join rows on `db`, which may be a transaction.
async fn insert_movie<C: ConnectionTrait>(db: &C, new: &NewMovie) -> Result<i32> {
    let active_model = movie::ActiveModel {
        title: Set(new.title.clone()),
        tagline: Set(new.tagline.clone()),
        description: Set(new.description.clone()),
        poster: Set(new.poster.clone()),
        year: Set(new.year),
        country: Set(new.country.clone()),
        world_premiere: Set(new.world_premiere.map(|d| d.format("%Y-%m-%d").to_string())),
        budget: Set(new.budget),
        fees_in_usa: Set(new.fees_in_usa),
        fees_in_world: Set(new.fees_in_world),
        category_id: Set(new.category_id),
        slug: Set(new.slug.clone()),
        draft: Set(new.draft),
        ..Default::default()
    };

    let movie_id = Movie::insert(active_model).exec(db).await?.last_insert_id;

    if !new.director_ids.is_empty() {
        MovieDirectors::insert_many(new.director_ids.iter().map(|&actor_id| {
            movie_directors::ActiveModel {
                movie_id: Set(movie_id),
                actor_id: Set(actor_id),
            }
        }))
        .exec_without_returning(db)
        .await?;
    }

    if !new.actor_ids.is_empty() {
        MovieActors::insert_many(new.actor_ids.iter().map(|&actor_id| {
            movie_actors::ActiveModel {
                movie_id: Set(movie_id),
                actor_id: Set(actor_id),
            }
        }))
        .exec_without_returning(db)
        .await?;
    }

    if !new.genre_ids.is_empty() {
        MovieGenres::insert_many(new.genre_ids.iter().map(|&genre_id| {
            movie_genres::ActiveModel {
                movie_id: Set(movie_id),
                genre_id: Set(genre_id),
            }
        }))
        .exec_without_returning(db)
        .await?;
    }

    info!("Added movie {} ({})", new.title, new.slug);
    Ok(movie_id)
}

pub struct MovieRepository {
    conn: DatabaseConnection,
}

impl MovieRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Stores a movie and its director, actor and genre links in one
    /// transaction.
    pub async fn add(&self, new: &NewMovie) -> Result<i32> {
        let txn = self.conn.begin().await?;
        let movie_id = insert_movie(&txn, new).await?;
        txn.commit().await?;

        Ok(movie_id)
    }

    /// Stores a movie with its links, ratings and review threads in one
    /// transaction. `ratings` are `(ip, star id)` pairs. Returns the movie
    /// id and the number of reviews written.
    pub async fn add_with_feedback(
        &self,
        new: &NewMovie,
        ratings: &[(String, i32)],
        reviews: &[ReviewThread],
    ) -> Result<(i32, usize)> {
        let txn = self.conn.begin().await?;
        let movie_id = insert_movie(&txn, new).await?;

        for (ip, star_id) in ratings {
            insert_rating(&txn, ip, *star_id, movie_id).await?;
        }

        // Parents are written before their replies.
        let mut written = 0;
        let mut pending: Vec<(Option<i32>, &ReviewThread)> =
            reviews.iter().rev().map(|r| (None, r)).collect();
        while let Some((parent_id, thread)) = pending.pop() {
            let row = insert_review(
                &txn,
                &NewReview {
                    email: thread.email.clone(),
                    name: thread.name.clone(),
                    text: thread.text.clone(),
                    movie_id: MovieId::new(movie_id),
                    parent_id: parent_id.map(ReviewId::new),
                },
            )
            .await?;
            written += 1;
            pending.extend(thread.replies.iter().rev().map(|reply| (Some(row.id), reply)));
        }

        txn.commit().await?;
        Ok((movie_id, written))
    }

    pub async fn exists(&self, id: i32) -> Result<bool> {
        let count = Movie::find()
            .filter(movie::Column::Id.eq(id))
            .count(&self.conn)
            .await?;
        Ok(count > 0)
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<movie::Model>> {
        Ok(Movie::find()
            .filter(movie::Column::Slug.eq(slug))
            .one(&self.conn)
            .await?)
    }

    /// Published movies in insertion order, one page at a time, with the
    /// total number of published movies.
    pub async fn page_published(&self, page: PageRequest) -> Result<(Vec<movie::Model>, u64)> {
        let paginator = Movie::find()
            .filter(movie::Column::Draft.eq(false))
            .order_by_asc(movie::Column::Id)
            .paginate(&self.conn, page.page_size);

        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(page.index()).await?;

        Ok((rows, total))
    }

    pub async fn list_published(&self) -> Result<Vec<movie::Model>> {
        Ok(Movie::find()
            .filter(movie::Column::Draft.eq(false))
            .order_by_asc(movie::Column::Id)
            .all(&self.conn)
            .await?)
    }

    /// A published movie by id or slug. Drafts are treated as absent.
    ///
    /// A numeric key matches either column, and the id match wins when both
    /// exist.
    pub async fn find_published(&self, key: &MovieKey) -> Result<Option<movie::Model>> {
        let query = Movie::find().filter(movie::Column::Draft.eq(false));

        match key {
            MovieKey::Slug(slug) => Ok(query
                .filter(movie::Column::Slug.eq(slug.as_str()))
                .one(&self.conn)
                .await?),
            MovieKey::Numeric { id, segment } => {
                let mut rows = query
                    .filter(
                        Condition::any()
                            .add(movie::Column::Id.eq(id.value()))
                            .add(movie::Column::Slug.eq(segment.as_str())),
                    )
                    .all(&self.conn)
                    .await?;
                rows.sort_by_key(|m| m.id != id.value());
                Ok(rows.into_iter().next())
            }
        }
    }

    pub async fn category_titles(&self, category_ids: &[i32]) -> Result<HashMap<i32, String>> {
        if category_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<(i32, String)> = Category::find()
            .select_only()
            .column(category::Column::Id)
            .column(category::Column::Title)
            .filter(category::Column::Id.is_in(category_ids.to_vec()))
            .into_tuple()
            .all(&self.conn)
            .await?;

        Ok(rows.into_iter().collect())
    }

    /// Genre titles per movie, ordered by genre id.
    pub async fn genre_titles_for(&self, movie_ids: &[i32]) -> Result<HashMap<i32, Vec<String>>> {
        if movie_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<(i32, String)> = MovieGenres::find()
            .select_only()
            .column(movie_genres::Column::MovieId)
            .column(genre::Column::Title)
            .join(JoinType::InnerJoin, movie_genres::Relation::Genre.def())
            .filter(movie_genres::Column::MovieId.is_in(movie_ids.to_vec()))
            .order_by_asc(genre::Column::Id)
            .into_tuple()
            .all(&self.conn)
            .await?;

        Ok(group_pairs(rows))
    }

    /// Names of the people holding `role` on each movie, ordered by actor id.
    pub async fn people_for(
        &self,
        movie_ids: &[i32],
        role: Role,
    ) -> Result<HashMap<i32, Vec<String>>> {
        if movie_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<(i32, String)> = match role {
            Role::Director => {
                MovieDirectors::find()
                    .select_only()
                    .column(movie_directors::Column::MovieId)
                    .column(actor::Column::Name)
                    .join(JoinType::InnerJoin, movie_directors::Relation::Actor.def())
                    .filter(movie_directors::Column::MovieId.is_in(movie_ids.to_vec()))
                    .order_by_asc(actor::Column::Id)
                    .into_tuple()
                    .all(&self.conn)
                    .await?
            }
            Role::Actor => {
                MovieActors::find()
                    .select_only()
                    .column(movie_actors::Column::MovieId)
                    .column(actor::Column::Name)
                    .join(JoinType::InnerJoin, movie_actors::Relation::Actor.def())
                    .filter(movie_actors::Column::MovieId.is_in(movie_ids.to_vec()))
                    .order_by_asc(actor::Column::Id)
                    .into_tuple()
                    .all(&self.conn)
                    .await?
            }
        };

        Ok(group_pairs(rows))
    }

    /// Titles of published movies on which the person holds `role`.
    pub async fn published_titles_for_person(&self, actor_id: i32, role: Role) -> Result<Vec<String>> {
        let titles: Vec<String> = match role {
            Role::Director => {
                MovieDirectors::find()
                    .select_only()
                    .column(movie::Column::Title)
                    .join(JoinType::InnerJoin, movie_directors::Relation::Movie.def())
                    .filter(movie_directors::Column::ActorId.eq(actor_id))
                    .filter(movie::Column::Draft.eq(false))
                    .order_by_asc(movie::Column::Id)
                    .into_tuple()
                    .all(&self.conn)
                    .await?
            }
            Role::Actor => {
                MovieActors::find()
                    .select_only()
                    .column(movie::Column::Title)
                    .join(JoinType::InnerJoin, movie_actors::Relation::Movie.def())
                    .filter(movie_actors::Column::ActorId.eq(actor_id))
                    .filter(movie::Column::Draft.eq(false))
                    .order_by_asc(movie::Column::Id)
                    .into_tuple()
                    .all(&self.conn)
                    .await?
            }
        };

        Ok(titles)
    }
}

fn group_pairs(rows: Vec<(i32, String)>) -> HashMap<i32, Vec<String>> {
    let mut grouped: HashMap<i32, Vec<String>> = HashMap::new();
    for (movie_id, value) in rows {
        grouped.entry(movie_id).or_default().push(value);
    }
    grouped
}
