use sea_orm::entity::prelude::*;

/// A person credited on movies. The same row backs both the actor and the
/// director role; the role lives on the join table, not here.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "actors")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub age: i32,
    pub description: String,
    pub image: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::movie_actors::Entity")]
    MovieActors,
    #[sea_orm(has_many = "super::movie_directors::Entity")]
    MovieDirectors,
}

impl ActiveModelBehavior for ActiveModel {}
