use crate::domain::PageRequest;
use crate::entities::{actor, prelude::*};
use crate::models::actor::NewActor;
use anyhow::Result;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set};
use tracing::info;

pub struct ActorRepository {
    conn: DatabaseConnection,
}

impl ActorRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn add(&self, new: &NewActor) -> Result<i32> {
        let active_model = actor::ActiveModel {
            name: Set(new.name.clone()),
            age: Set(new.age),
            description: Set(new.description.clone()),
            image: Set(new.image.clone()),
            ..Default::default()
        };

        let res = Actor::insert(active_model).exec(&self.conn).await?;
        info!("Added actor {}", new.name);
        Ok(res.last_insert_id)
    }

    pub async fn get(&self, id: i32) -> Result<Option<actor::Model>> {
        Ok(Actor::find_by_id(id).one(&self.conn).await?)
    }

    pub async fn page(&self, page: PageRequest) -> Result<(Vec<actor::Model>, u64)> {
        let paginator = Actor::find()
            .order_by_asc(actor::Column::Id)
            .paginate(&self.conn, page.page_size);

        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(page.index()).await?;

        Ok((rows, total))
    }

    pub async fn list_all(&self) -> Result<Vec<actor::Model>> {
        Ok(Actor::find()
            .order_by_asc(actor::Column::Id)
            .all(&self.conn)
            .await?)
    }
}
