//! Newsletter routes

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::{extract::State, routing::post, Json, Router};
use nexuskart_shared::types::{MessageResponse, SubscribeRequest};
use nexuskart_shared::validation;

/// Create newsletter routes
pub fn newsletter_routes() -> Router<AppState> {
    Router::new().route("/subscribe", post(subscribe))
}

/// Subscribe to the newsletter
///
/// POST /api/v1/newsletter/subscribe
async fn subscribe(
    State(state): State<AppState>,
    Json(req): Json<SubscribeRequest>,
) -> ApiResult<Json<MessageResponse>> {
    validation::validate_email(&req.email).map_err(ApiError::Validation)?;

    state
        .mailer()
        .send_newsletter_email(&req.email)
        .await
        .map_err(ApiError::Internal)?;

    Ok(Json(MessageResponse {
        message: "Subscription successful! Verification email sent.".to_string(),
    }))
}
