use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Not unique: duplicate (ip, movie) rows are allowed under the insert policy.
        manager
            .create_index(
                Index::create()
                    .name("idx_ratings_movie_ip")
                    .table(Ratings::Table)
                    .col(Ratings::MovieId)
                    .col(Ratings::Ip)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reviews_movie_id")
                    .table(Reviews::Table)
                    .col(Reviews::MovieId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_movies_draft")
                    .table(Movies::Table)
                    .col(Movies::Draft)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_movies_draft").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_reviews_movie_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_ratings_movie_ip").to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Ratings {
    Table,
    MovieId,
    Ip,
}

#[derive(DeriveIden)]
enum Reviews {
    Table,
    MovieId,
}

#[derive(DeriveIden)]
enum Movies {
    Table,
    Draft,
}
