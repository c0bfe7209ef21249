use serde::Serialize;

use crate::catalog::ReviewNode;
use crate::domain::MovieId;

/// A movie as shown in listings.
#[derive(Debug, Clone, Serialize)]
pub struct MovieSummary {
    pub id: MovieId,
    pub title: String,
    pub tagline: String,
    pub category: Option<String>,
    pub year: i32,
    pub poster: Option<String>,
    pub genres: Vec<String>,
    pub middle_star: Option<i32>,
}

/// A movie with its people, genres, average star and review threads.
#[derive(Debug, Clone, Serialize)]
pub struct MovieDetail {
    pub id: MovieId,
    pub title: String,
    pub tagline: String,
    pub description: String,
    pub poster: Option<String>,
    pub year: i32,
    pub country: String,
    pub world_premiere: Option<String>,
    pub budget: i64,
    pub fees_in_usa: i64,
    pub fees_in_world: i64,
    pub category: Option<String>,
    pub slug: String,
    pub directors: Vec<String>,
    pub actors: Vec<String>,
    pub genres: Vec<String>,
    pub middle_star: Option<i32>,
    pub reviews: Vec<ReviewNode>,
}

/// Everything needed to store a movie together with its relations.
#[derive(Debug, Clone, Default)]
pub struct NewMovie {
    pub title: String,
    pub tagline: String,
    pub description: String,
    pub poster: Option<String>,
    pub year: i32,
    pub country: String,
    pub world_premiere: Option<chrono::NaiveDate>,
    pub budget: i64,
    pub fees_in_usa: i64,
    pub fees_in_world: i64,
    pub category_id: Option<i32>,
    pub slug: String,
    pub draft: bool,
    pub director_ids: Vec<i32>,
    pub actor_ids: Vec<i32>,
    pub genre_ids: Vec<i32>,
}
