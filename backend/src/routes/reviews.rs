//! Product review handlers
//!
//! Mounted under /api/v1/products/:id/reviews. Reviews are open to
//! anonymous visitors, matching the storefront behavior.

use crate::error::{ApiError, ApiResult};
use crate::repositories::{ProductRepository, ReviewRecord, ReviewRepository};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use nexuskart_shared::types::{ReviewRequest, ReviewResponse};
use nexuskart_shared::validation;
use uuid::Uuid;

/// List reviews for a product
///
/// GET /api/v1/products/:id/reviews
pub async fn list_reviews(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
) -> ApiResult<Json<Vec<ReviewResponse>>> {
    let reviews = ReviewRepository::list_by_product(&state.db, product_id).await?;
    Ok(Json(reviews.into_iter().map(to_response).collect()))
}

/// Add a review to a product
///
/// POST /api/v1/products/:id/reviews
pub async fn add_review(
    State(state): State<AppState>,
    Path(product_id): Path<Uuid>,
    Json(req): Json<ReviewRequest>,
) -> ApiResult<(StatusCode, Json<ReviewResponse>)> {
    validation::validate_name(&req.user_name).map_err(ApiError::Validation)?;
    validation::validate_rating(req.rating).map_err(ApiError::Validation)?;
    validation::validate_comment(&req.comment).map_err(ApiError::Validation)?;

    if ProductRepository::find_by_id(&state.db, product_id)
        .await?
        .is_none()
    {
        return Err(ApiError::NotFound("Product not found".to_string()));
    }

    let review = ReviewRepository::create(
        &state.db,
        product_id,
        req.user_name.trim(),
        req.rating,
        &req.comment,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(to_response(review))))
}

fn to_response(review: ReviewRecord) -> ReviewResponse {
    ReviewResponse {
        id: review.id,
        user_name: review.user_name,
        rating: review.rating,
        comment: review.comment,
        created_at: review.created_at,
    }
}
