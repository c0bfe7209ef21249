use crate::entities::{prelude::*, review};
use crate::models::feedback::NewReview;
use anyhow::Result;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::info;

/// Inserts one review row on `db`, which may be a transaction.
pub(crate) async fn insert_review<C: ConnectionTrait>(
    db: &C,
    new: &NewReview,
) -> Result<review::Model> {
    let active_model = review::ActiveModel {
        email: Set(new.email.clone()),
        name: Set(new.name.clone()),
        text: Set(new.text.clone()),
        parent_id: Set(new.parent_id.map(|id| id.value())),
        movie_id: Set(new.movie_id.value()),
        ..Default::default()
    };

    let res = Review::insert(active_model).exec(db).await?;
    info!(
        "Added review {} on movie {}",
        res.last_insert_id, new.movie_id
    );

    Ok(review::Model {
        id: res.last_insert_id,
        email: new.email.clone(),
        name: new.name.clone(),
        text: new.text.clone(),
        parent_id: new.parent_id.map(|id| id.value()),
        movie_id: new.movie_id.value(),
    })
}

pub struct ReviewRepository {
    conn: DatabaseConnection,
}

impl ReviewRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn add(&self, new: &NewReview) -> Result<review::Model> {
        insert_review(&self.conn, new).await
    }

    pub async fn get(&self, id: i32) -> Result<Option<review::Model>> {
        Ok(Review::find_by_id(id).one(&self.conn).await?)
    }

    /// Every review of a movie as a flat list ordered by id.
    pub async fn for_movie(&self, movie_id: i32) -> Result<Vec<review::Model>> {
        Ok(Review::find()
            .filter(review::Column::MovieId.eq(movie_id))
            .order_by_asc(review::Column::Id)
            .all(&self.conn)
            .await?)
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(Review::find().count(&self.conn).await?)
    }
}
