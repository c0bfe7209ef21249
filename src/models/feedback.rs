use serde::{Deserialize, Serialize};

use crate::domain::{MovieId, ReviewId};

/// A validated review ready to be stored.
#[derive(Debug, Clone)]
pub struct NewReview {
    pub email: String,
    pub name: String,
    pub text: String,
    pub movie_id: MovieId,
    pub parent_id: Option<ReviewId>,
}

/// A review and its replies, nested as they should appear in the thread.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewThread {
    pub email: String,
    pub name: String,
    pub text: String,
    #[serde(default)]
    pub replies: Vec<ReviewThread>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StoredReview {
    pub id: ReviewId,
    pub email: String,
    pub name: String,
    pub text: String,
    pub movie: MovieId,
    pub parent: Option<ReviewId>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StoredRating {
    pub id: i32,
    pub ip: String,
    pub movie: MovieId,
    pub star: i32,
}

/// Result of recording a rating: the row and whether an earlier rating from
/// the same client was replaced.
#[derive(Debug, Clone)]
pub struct RatingWrite {
    pub rating: StoredRating,
    pub replaced: bool,
}
