//! Write side of the catalog: reviews and star ratings submitted by visitors.

use crate::models::feedback::{RatingWrite, StoredReview};
use crate::services::validation::FieldErrors;
use thiserror::Error;

/// Review fields exactly as submitted. Every field is checked by the service
/// so that all problems are reported together.
#[derive(Debug, Clone, Default)]
pub struct ReviewSubmission {
    pub email: Option<String>,
    pub name: Option<String>,
    pub text: Option<String>,
    pub movie: Option<String>,
    pub parent: Option<String>,
}

/// Rating fields as submitted plus the client address recorded with them.
#[derive(Debug, Clone, Default)]
pub struct RatingSubmission {
    pub movie: Option<String>,
    pub star: Option<String>,
    pub ip: String,
}

#[derive(Debug, Error)]
pub enum FeedbackError {
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<FieldErrors> for FeedbackError {
    fn from(errors: FieldErrors) -> Self {
        Self::Validation(errors)
    }
}

impl From<sea_orm::DbErr> for FeedbackError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for FeedbackError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

#[async_trait::async_trait]
pub trait FeedbackService: Send + Sync {
    /// Stores a review, optionally as a reply to another review.
    async fn create_review(&self, input: ReviewSubmission) -> Result<StoredReview, FeedbackError>;

    /// Records a star rating for a movie.
    async fn create_rating(&self, input: RatingSubmission) -> Result<RatingWrite, FeedbackError>;
}
