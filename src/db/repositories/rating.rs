use crate::entities::{prelude::*, rating, rating_star};
use anyhow::Result;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};
use tracing::info;

/// Inserts one rating row on `db`, which may be a transaction.
pub(crate) async fn insert_rating<C: ConnectionTrait>(
    db: &C,
    ip: &str,
    star_id: i32,
    movie_id: i32,
) -> Result<rating::Model> {
    let active_model = rating::ActiveModel {
        ip: Set(ip.to_string()),
        star_id: Set(star_id),
        movie_id: Set(movie_id),
        ..Default::default()
    };

    let res = Rating::insert(active_model).exec(db).await?;
    info!("Recorded rating for movie {} from {}", movie_id, ip);

    Ok(rating::Model {
        id: res.last_insert_id,
        ip: ip.to_string(),
        star_id,
        movie_id,
    })
}

pub struct RatingRepository {
    conn: DatabaseConnection,
}

impl RatingRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Registers every star value that is not present yet.
    pub async fn sync_stars(&self, values: &[i32]) -> Result<()> {
        let existing: Vec<i32> = RatingStar::find()
            .select_only()
            .column(rating_star::Column::Value)
            .into_tuple()
            .all(&self.conn)
            .await?;

        let mut missing: Vec<i32> = values
            .iter()
            .copied()
            .filter(|v| !existing.contains(v))
            .collect();
        missing.sort_unstable();
        missing.dedup();

        if missing.is_empty() {
            return Ok(());
        }

        RatingStar::insert_many(missing.iter().map(|&value| rating_star::ActiveModel {
            value: Set(value),
            ..Default::default()
        }))
        .exec(&self.conn)
        .await?;

        info!("Registered rating stars {:?}", missing);
        Ok(())
    }

    pub async fn list_stars(&self) -> Result<Vec<rating_star::Model>> {
        Ok(RatingStar::find()
            .order_by_asc(rating_star::Column::Id)
            .all(&self.conn)
            .await?)
    }

    pub async fn star_by_value(&self, value: i32) -> Result<Option<rating_star::Model>> {
        Ok(RatingStar::find()
            .filter(rating_star::Column::Value.eq(value))
            .one(&self.conn)
            .await?)
    }

    /// `(movie_id, star value)` for every rating of the given movies.
    pub async fn star_values_for(&self, movie_ids: &[i32]) -> Result<Vec<(i32, i32)>> {
        if movie_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows: Vec<(i32, i32)> = Rating::find()
            .select_only()
            .column(rating::Column::MovieId)
            .column(rating_star::Column::Value)
            .join(JoinType::InnerJoin, rating::Relation::RatingStar.def())
            .filter(rating::Column::MovieId.is_in(movie_ids.to_vec()))
            .into_tuple()
            .all(&self.conn)
            .await?;

        Ok(rows)
    }

    pub async fn insert(&self, ip: &str, star_id: i32, movie_id: i32) -> Result<rating::Model> {
        insert_rating(&self.conn, ip, star_id, movie_id).await
    }

    /// Replaces the star of the client's earliest rating for the movie, or
    /// inserts one. Returns the row and whether an existing one was updated.
    pub async fn upsert(
        &self,
        ip: &str,
        star_id: i32,
        movie_id: i32,
    ) -> Result<(rating::Model, bool)> {
        let txn = self.conn.begin().await?;

        let existing = Rating::find()
            .filter(rating::Column::MovieId.eq(movie_id))
            .filter(rating::Column::Ip.eq(ip))
            .order_by_asc(rating::Column::Id)
            .one(&txn)
            .await?;

        let result = if let Some(row) = existing {
            Rating::update_many()
                .col_expr(
                    rating::Column::StarId,
                    sea_orm::sea_query::Expr::value(star_id),
                )
                .filter(rating::Column::Id.eq(row.id))
                .exec(&txn)
                .await?;
            info!("Updated rating {} for movie {} from {}", row.id, movie_id, ip);
            (rating::Model { star_id, ..row }, true)
        } else {
            (insert_rating(&txn, ip, star_id, movie_id).await?, false)
        };

        txn.commit().await?;
        Ok(result)
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(Rating::find().count(&self.conn).await?)
    }
}
