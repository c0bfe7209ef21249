use crate::entities::{category, genre, prelude::*};
use anyhow::Result;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::info;

/// Categories and genres: small lookup tables referenced by movies.
pub struct ReferenceRepository {
    conn: DatabaseConnection,
}

impl ReferenceRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn add_category(&self, title: &str, description: &str, slug: &str) -> Result<i32> {
        let active_model = category::ActiveModel {
            title: Set(title.to_string()),
            description: Set(description.to_string()),
            slug: Set(slug.to_string()),
            ..Default::default()
        };

        let res = Category::insert(active_model).exec(&self.conn).await?;
        info!("Added category {}", slug);
        Ok(res.last_insert_id)
    }

    pub async fn add_genre(&self, title: &str, description: &str, slug: &str) -> Result<i32> {
        let active_model = genre::ActiveModel {
            title: Set(title.to_string()),
            description: Set(description.to_string()),
            slug: Set(slug.to_string()),
            ..Default::default()
        };

        let res = Genre::insert(active_model).exec(&self.conn).await?;
        info!("Added genre {}", slug);
        Ok(res.last_insert_id)
    }

    pub async fn category_by_slug(&self, slug: &str) -> Result<Option<category::Model>> {
        Ok(Category::find()
            .filter(category::Column::Slug.eq(slug))
            .one(&self.conn)
            .await?)
    }

    pub async fn genre_by_slug(&self, slug: &str) -> Result<Option<genre::Model>> {
        Ok(Genre::find()
            .filter(genre::Column::Slug.eq(slug))
            .one(&self.conn)
            .await?)
    }

    pub async fn list_categories(&self) -> Result<Vec<category::Model>> {
        Ok(Category::find()
            .order_by_asc(category::Column::Id)
            .all(&self.conn)
            .await?)
    }

    pub async fn list_genres(&self) -> Result<Vec<genre::Model>> {
        Ok(Genre::find()
            .order_by_asc(genre::Column::Id)
            .all(&self.conn)
            .await?)
    }
}
