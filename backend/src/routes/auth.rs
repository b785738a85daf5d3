//! Authentication routes
//!
//! Signup, login, identity lookup, and profile updates.
//!
//! # Performance
//!
//! - Uses pre-computed JWT keys from AppState (no per-request allocation)
//! - Password hashing runs on blocking thread pool (doesn't block async runtime)

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::UserService;
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{post, put},
    Json, Router,
};
use nexuskart_shared::types::{
    LoginRequest, LoginResponse, SignupRequest, UpdateProfileRequest, UserResponse,
};

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/me", axum::routing::get(me))
        .route("/profile", put(update_profile))
}

/// Register a new account
///
/// POST /api/v1/auth/signup
///
/// The optional `admin_code` elevates the account to ADMIN when it matches
/// the configured provisioning secret.
async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    let user = UserService::signup(
        &state.db,
        &state.config.auth,
        &req.email,
        &req.password,
        &req.name,
        req.admin_code.as_deref(),
    )
    .await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Login with email and password
///
/// POST /api/v1/auth/login
///
/// Returns the bearer token and an identity summary. Unknown email and
/// wrong password are indistinguishable in the response.
async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let response = UserService::login(&state.db, state.jwt(), &req.email, &req.password).await?;
    Ok(Json(response))
}

/// Identity behind the presented token (requires authentication)
///
/// GET /api/v1/auth/me
async fn me(State(state): State<AppState>, auth: AuthUser) -> ApiResult<Json<UserResponse>> {
    let user = UserService::get_by_email(&state.db, &auth.email).await?;
    Ok(Json(user))
}

/// Update the authenticated account's profile
///
/// PUT /api/v1/auth/profile
///
/// Only the token subject's own record is touched; a supplied password is
/// re-hashed before storage.
async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<UpdateProfileRequest>,
) -> ApiResult<Json<UserResponse>> {
    let user =
        UserService::update_profile(&state.db, &state.config.auth, &auth.email, req).await?;
    Ok(Json(user))
}
