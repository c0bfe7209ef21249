use crate::entities::prelude::*;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{EntityTrait, Schema};

#[derive(DeriveMigrationName)]
pub struct Migration;

impl Migration {
    async fn create<E>(manager: &SchemaManager<'_>, schema: &Schema, entity: E) -> Result<(), DbErr>
    where
        E: EntityTrait,
    {
        manager
            .create_table(
                schema
                    .create_table_from_entity(entity)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        // Parents before children so foreign keys resolve.
        Self::create(manager, &schema, Category).await?;
        Self::create(manager, &schema, Genre).await?;
        Self::create(manager, &schema, Actor).await?;
        Self::create(manager, &schema, RatingStar).await?;
        Self::create(manager, &schema, Movie).await?;
        Self::create(manager, &schema, MovieDirectors).await?;
        Self::create(manager, &schema, MovieActors).await?;
        Self::create(manager, &schema, MovieGenres).await?;
        Self::create(manager, &schema, Rating).await?;
        Self::create(manager, &schema, Review).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Review).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Rating).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MovieGenres).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MovieActors).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MovieDirectors).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Movie).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RatingStar).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Actor).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Genre).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Category).if_exists().to_owned())
            .await
    }
}
