use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use std::sync::Arc;
use tracing::info;

use super::extract::{ClientIp, FormOrJson};
use super::{ApiError, AppState, RatingForm, ReviewForm};
use crate::models::feedback::{StoredRating, StoredReview};

/// `POST /api/review/`
pub async fn create_review(
    State(state): State<Arc<AppState>>,
    FormOrJson(form): FormOrJson<ReviewForm>,
) -> Result<(StatusCode, Json<StoredReview>), ApiError> {
    let review = state.feedback_service().create_review(form.into()).await?;

    info!(
        review_id = %review.id,
        movie_id = %review.movie,
        reply = review.parent.is_some(),
        "Review created"
    );
    metrics::counter!("reviews_created_total").increment(1);

    Ok((StatusCode::CREATED, Json(review)))
}

/// `POST /api/rating/`
///
/// Answers 201 for a new rating and 200 when an earlier rating from the same
/// client was replaced.
pub async fn create_rating(
    State(state): State<Arc<AppState>>,
    ClientIp(ip): ClientIp,
    FormOrJson(form): FormOrJson<RatingForm>,
) -> Result<(StatusCode, Json<StoredRating>), ApiError> {
    let write = state
        .feedback_service()
        .create_rating(form.into_submission(ip))
        .await?;

    info!(
        rating_id = write.rating.id,
        movie_id = %write.rating.movie,
        star = write.rating.star,
        replaced = write.replaced,
        "Rating recorded"
    );
    metrics::counter!("ratings_recorded_total").increment(1);

    let status = if write.replaced {
        StatusCode::OK
    } else {
        StatusCode::CREATED
    };
    Ok((status, Json(write.rating)))
}
