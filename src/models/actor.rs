use serde::Serialize;

use crate::domain::ActorId;

#[derive(Debug, Clone, Serialize)]
pub struct ActorSummary {
    pub id: ActorId,
    pub name: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActorDetail {
    pub id: ActorId,
    pub name: String,
    pub age: i32,
    pub description: String,
    pub image: Option<String>,
    /// Titles of published movies this person directed.
    pub directed: Vec<String>,
    /// Titles of published movies this person acted in.
    pub acted_in: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct NewActor {
    pub name: String,
    pub age: i32,
    pub description: String,
    pub image: Option<String>,
}

/// The part a person plays on a movie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Director,
    Actor,
}
