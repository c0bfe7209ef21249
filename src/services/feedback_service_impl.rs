//! `SeaORM` implementation of the `FeedbackService` trait.

use crate::config::{Config, RatingPolicy};
use crate::db::Store;
use crate::domain::{MovieId, ReviewId};
use crate::models::feedback::{NewReview, RatingWrite, StoredRating, StoredReview};
use crate::services::feedback_service::{
    FeedbackError, FeedbackService, RatingSubmission, ReviewSubmission,
};
use crate::services::validation::{
    self, FieldErrors, MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_TEXT_LEN,
};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

pub struct SeaOrmFeedbackService {
    store: Store,
    config: Arc<RwLock<Config>>,
}

impl SeaOrmFeedbackService {
    #[must_use]
    pub const fn new(store: Store, config: Arc<RwLock<Config>>) -> Self {
        Self { store, config }
    }

    async fn validate_review(&self, input: ReviewSubmission) -> Result<NewReview, FeedbackError> {
        let mut errors = FieldErrors::new();

        let email = validation::required_text(
            &mut errors,
            "email",
            input.email.as_deref(),
            MAX_EMAIL_LEN,
        );
        if !errors.contains("email") && !validation::is_valid_email(&email) {
            errors.add("email", "Enter a valid email address.");
        }
        let name =
            validation::required_text(&mut errors, "name", input.name.as_deref(), MAX_NAME_LEN);
        let text =
            validation::required_text(&mut errors, "text", input.text.as_deref(), MAX_TEXT_LEN);

        let movie_id = validation::required_id(&mut errors, "movie", input.movie.as_deref());
        let parent_id = validation::optional_id(&mut errors, "parent", input.parent.as_deref());

        if let Some(id) = movie_id {
            if !self.store.movie_exists(id).await? {
                errors.add("movie", format!("Invalid pk \"{id}\" - object does not exist."));
            }
        }

        if let Some(id) = parent_id {
            match self.store.get_review(id).await? {
                None => {
                    errors.add("parent", format!("Invalid pk \"{id}\" - object does not exist."));
                }
                Some(parent) => {
                    let enforce = self.config.read().await.catalog.enforce_reply_movie_match;
                    if enforce && movie_id.is_some_and(|m| m != parent.movie_id) {
                        errors.add("parent", "Reply must belong to the same movie as its parent.");
                    }
                }
            }
        }

        if let Err(errors) = errors.into_result() {
            debug!(%errors, "Rejected review");
            return Err(FeedbackError::Validation(errors));
        }

        let movie_id =
            movie_id.ok_or_else(|| FieldErrors::single("movie", "This field is required."))?;

        Ok(NewReview {
            email,
            name,
            text,
            movie_id: MovieId::new(movie_id),
            parent_id: parent_id.map(ReviewId::new),
        })
    }
}

#[async_trait]
impl FeedbackService for SeaOrmFeedbackService {
    async fn create_review(&self, input: ReviewSubmission) -> Result<StoredReview, FeedbackError> {
        let new_review = self.validate_review(input).await?;
        let row = self.store.add_review(&new_review).await?;

        Ok(StoredReview {
            id: ReviewId::new(row.id),
            email: row.email,
            name: row.name,
            text: row.text,
            movie: MovieId::new(row.movie_id),
            parent: row.parent_id.map(ReviewId::new),
        })
    }

    async fn create_rating(&self, input: RatingSubmission) -> Result<RatingWrite, FeedbackError> {
        let mut errors = FieldErrors::new();

        let movie_id = validation::required_id(&mut errors, "movie", input.movie.as_deref());
        let star_value = validation::required_id(&mut errors, "star", input.star.as_deref());

        if let Some(id) = movie_id {
            if !self.store.movie_exists(id).await? {
                errors.add("movie", format!("Invalid pk \"{id}\" - object does not exist."));
            }
        }

        let star = match star_value {
            Some(value) => {
                let star = self.store.get_rating_star(value).await?;
                if star.is_none() {
                    errors.add("star", format!("Star level {value} is not registered."));
                }
                star
            }
            None => None,
        };

        if let Err(errors) = errors.into_result() {
            debug!(%errors, ip = %input.ip, "Rejected rating");
            return Err(FeedbackError::Validation(errors));
        }

        let (Some(movie_id), Some(star)) = (movie_id, star) else {
            return Err(FieldErrors::single("star", "This field is required.").into());
        };

        let policy = self.config.read().await.catalog.rating_policy;
        let (row, replaced) = match policy {
            RatingPolicy::Insert => (
                self.store.add_rating(&input.ip, star.id, movie_id).await?,
                false,
            ),
            RatingPolicy::Upsert => {
                self.store
                    .upsert_rating(&input.ip, star.id, movie_id)
                    .await?
            }
        };

        Ok(RatingWrite {
            rating: StoredRating {
                id: row.id,
                ip: row.ip,
                movie: MovieId::new(row.movie_id),
                star: star.value,
            },
            replaced,
        })
    }
}
