//! Access gate middleware
//!
//! Axum extractors that validate the bearer token and attach the verified
//! identity to the request. Rejections happen before any handler runs:
//! missing/invalid/expired tokens are 401 Unauthorized, while a valid
//! identity lacking the required role is 403 Forbidden.
//!
//! # Performance
//!
//! Uses pre-computed JWT keys from AppState to avoid expensive
//! key derivation on every request.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::FromRef,
    http::{header::AUTHORIZATION, request::Parts},
};
use chrono::Utc;
use nexuskart_shared::Role;
use tracing::debug;

/// Authenticated identity extracted from a verified token
///
/// Request-scoped: built fresh for every call that presents a token and
/// discarded when the call completes.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub email: String,
    pub role: Role,
}

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        // Extract Authorization header
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing authorization header".to_string()))?;

        // Check Bearer prefix
        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError::Unauthorized("Invalid authorization format".to_string()))?;

        // Wall clock is read once per verification
        let now = Utc::now();
        let identity = app_state.jwt().verify(token, now).map_err(|e| {
            debug!(error = %e, "token rejected");
            ApiError::Unauthorized(format!("Invalid token: {}", e))
        })?;

        Ok(AuthUser {
            email: identity.subject,
            role: identity.role,
        })
    }
}

/// Authenticated identity that additionally satisfies the ADMIN requirement
///
/// Failing the role check is 403, distinct from the 401 issued when no
/// valid identity was presented at all.
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthUser);

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for AdminUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;

        if !user.role.is_admin() {
            debug!(email = %user.email, "admin route refused for non-admin caller");
            return Err(ApiError::Forbidden(
                "Administrator role required".to_string(),
            ));
        }

        Ok(AdminUser(user))
    }
}
