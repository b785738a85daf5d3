//! User profile picture routes
//!
//! Uploading requires authentication and is limited to the account owner
//! or an administrator; reading is public so the storefront can render
//! avatars.

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::routes::products::{image_response, read_image_field};
use crate::services::UserService;
use crate::state::AppState;
use axum::{
    extract::{Multipart, Path, State},
    response::Response,
    routing::{get, post},
    Json, Router,
};
use nexuskart_shared::types::MessageResponse;
use uuid::Uuid;

/// Create user profile routes
pub fn user_routes() -> Router<AppState> {
    Router::new().route(
        "/:id/image",
        post(upload_profile_picture).get(get_profile_picture),
    )
}

/// Upload a profile picture
///
/// POST /api/v1/users/:id/image
async fn upload_profile_picture(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> ApiResult<Json<MessageResponse>> {
    let mut image = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart payload: {}", e)))?
    {
        if field.name() == Some("imageFile") {
            image = Some(read_image_field(field).await?);
        }
    }
    let image = image.ok_or_else(|| ApiError::BadRequest("Missing imageFile part".to_string()))?;

    UserService::update_profile_image(
        &state.db,
        &auth.email,
        auth.role,
        id,
        &image.file_name,
        &image.content_type,
        &image.data,
    )
    .await?;

    Ok(Json(MessageResponse {
        message: "Profile picture updated".to_string(),
    }))
}

/// Fetch a profile picture
///
/// GET /api/v1/users/:id/image
async fn get_profile_picture(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Response> {
    let image = UserService::get_profile_image(&state.db, id).await?;
    Ok(image_response(image, false))
}
