//! User service: credential verification, signup, and profile management
//!
//! # Performance
//!
//! Password hashing and verification run on the blocking thread pool;
//! the token codec is passed by reference with pre-computed keys.

use crate::auth::{JwtService, PasswordService};
use crate::config::AuthConfig;
use crate::error::ApiError;
use crate::repositories::{StoredImage, UpdateUserProfile, UserRecord, UserRepository};
use chrono::Utc;
use nexuskart_shared::types::{LoginResponse, UpdateProfileRequest, UserResponse};
use nexuskart_shared::validation;
use nexuskart_shared::Role;
use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;
use validator::ValidateEmail;

/// User service for authentication and account operations
pub struct UserService;

impl UserService {
    /// Verify a submitted email/password pair against the user store
    ///
    /// Both "no such account" and "wrong password" collapse into the same
    /// externally visible failure so the response cannot be used to probe
    /// which emails are registered. The log lines below keep the causes
    /// apart for operational diagnosis.
    pub async fn verify_credentials(
        pool: &PgPool,
        email: &str,
        password: &str,
    ) -> Result<UserRecord, ApiError> {
        let Some(user) = UserRepository::find_by_email(pool, email).await? else {
            debug!(email, "login rejected: no account for email");
            return Err(invalid_credentials());
        };

        let valid =
            PasswordService::verify_async(password.to_string(), user.password_hash.clone())
                .await
                .map_err(ApiError::Internal)?;

        if !valid {
            debug!(email, "login rejected: password mismatch");
            return Err(invalid_credentials());
        }

        Ok(user)
    }

    /// Login with email and password, issuing a fresh bearer token
    pub async fn login(
        pool: &PgPool,
        jwt: &JwtService,
        email: &str,
        password: &str,
    ) -> Result<LoginResponse, ApiError> {
        let user = Self::verify_credentials(pool, email, password).await?;
        let role = stored_role(&user)?;

        let token = jwt
            .issue(&user.email, role, Utc::now())
            .map_err(ApiError::Internal)?;

        Ok(LoginResponse {
            id: user.id,
            email: user.email,
            name: user.name,
            role,
            token,
        })
    }

    /// Register a new account
    ///
    /// The role defaults to USER; ADMIN is granted only when the supplied
    /// code matches the configured provisioning secret. The plaintext
    /// password is hashed before anything reaches the store and is never
    /// logged.
    pub async fn signup(
        pool: &PgPool,
        auth_config: &AuthConfig,
        email: &str,
        password: &str,
        name: &str,
        admin_code: Option<&str>,
    ) -> Result<UserResponse, ApiError> {
        if !email.validate_email() {
            return Err(ApiError::Validation("Invalid email format".to_string()));
        }
        validation::validate_password(password).map_err(ApiError::Validation)?;
        validation::validate_name(name).map_err(ApiError::Validation)?;

        // Friendly pre-check; the UNIQUE constraint below remains the
        // authoritative guard under concurrent signups.
        if UserRepository::email_exists(pool, email).await? {
            return Err(email_conflict());
        }

        let role = match admin_code {
            Some(code) if code == auth_config.admin_signup_code => Role::Admin,
            _ => Role::User,
        };

        let password_hash = PasswordService::hash_async(password.to_string(), auth_config.bcrypt_cost)
            .await
            .map_err(ApiError::Internal)?;

        let user = match UserRepository::create(pool, email, &password_hash, name, role).await {
            Ok(user) => user,
            Err(e) if is_unique_violation(&e) => return Err(email_conflict()),
            Err(e) => return Err(ApiError::Database(e)),
        };

        if role.is_admin() {
            info!(email = %user.email, "administrator account provisioned via signup code");
        }

        to_response(user)
    }

    /// Current identity summary for a verified subject
    pub async fn get_by_email(pool: &PgPool, email: &str) -> Result<UserResponse, ApiError> {
        let user = UserRepository::find_by_email(pool, email)
            .await?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;
        to_response(user)
    }

    /// Update the authenticated subject's profile
    ///
    /// A new password is re-hashed; a new email is validated before it
    /// replaces the subject identity.
    pub async fn update_profile(
        pool: &PgPool,
        auth_config: &AuthConfig,
        subject_email: &str,
        req: UpdateProfileRequest,
    ) -> Result<UserResponse, ApiError> {
        let user = UserRepository::find_by_email(pool, subject_email)
            .await?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        if let Some(name) = &req.name {
            validation::validate_name(name).map_err(ApiError::Validation)?;
        }
        if let Some(email) = &req.email {
            if !email.validate_email() {
                return Err(ApiError::Validation("Invalid email format".to_string()));
            }
        }

        let password_hash = match &req.password {
            Some(password) if !password.is_empty() => {
                validation::validate_password(password).map_err(ApiError::Validation)?;
                Some(
                    PasswordService::hash_async(password.clone(), auth_config.bcrypt_cost)
                        .await
                        .map_err(ApiError::Internal)?,
                )
            }
            _ => None,
        };

        let updates = UpdateUserProfile {
            name: req.name,
            email: req.email,
            password_hash,
        };

        let updated = match UserRepository::update_profile(pool, user.id, updates).await {
            Ok(Some(user)) => user,
            Ok(None) => return Err(ApiError::NotFound("User not found".to_string())),
            Err(e) if is_unique_violation(&e) => return Err(email_conflict()),
            Err(e) => return Err(ApiError::Database(e)),
        };

        to_response(updated)
    }

    /// Replace a user's profile picture; the caller must be the account
    /// owner or an administrator
    pub async fn update_profile_image(
        pool: &PgPool,
        caller_email: &str,
        caller_role: Role,
        user_id: Uuid,
        image_name: &str,
        image_type: &str,
        image_data: &[u8],
    ) -> Result<(), ApiError> {
        let target = UserRepository::find_by_id(pool, user_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        if target.email != caller_email && !caller_role.is_admin() {
            return Err(ApiError::Forbidden(
                "Cannot modify another user's profile".to_string(),
            ));
        }

        let updated =
            UserRepository::update_image(pool, user_id, image_name, image_type, image_data).await?;
        if !updated {
            return Err(ApiError::NotFound("User not found".to_string()));
        }

        Ok(())
    }

    /// Fetch a user's profile picture
    pub async fn get_profile_image(pool: &PgPool, user_id: Uuid) -> Result<StoredImage, ApiError> {
        UserRepository::get_image(pool, user_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Profile picture not found".to_string()))
    }
}

/// The single externally visible credential failure
fn invalid_credentials() -> ApiError {
    ApiError::Unauthorized("Invalid credentials".to_string())
}

fn email_conflict() -> ApiError {
    ApiError::Conflict("Email already registered".to_string())
}

/// Parse the role column; an unknown value is a data-integrity fault,
/// not a caller error
fn stored_role(user: &UserRecord) -> Result<Role, ApiError> {
    user.role.parse::<Role>().map_err(|_| {
        ApiError::Internal(anyhow::anyhow!(
            "user {} has unrecognized role in store",
            user.id
        ))
    })
}

fn to_response(user: UserRecord) -> Result<UserResponse, ApiError> {
    let role = stored_role(&user)?;
    Ok(UserResponse {
        id: user.id,
        email: user.email,
        name: user.name,
        role,
        created_at: user.created_at,
    })
}

/// Postgres unique-constraint violation (SQLSTATE 23505)
fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn record(role: &str) -> UserRecord {
        UserRecord {
            id: Uuid::new_v4(),
            email: "a@b.com".to_string(),
            password_hash: "$2b$04$hash".to_string(),
            name: "A".to_string(),
            role: role.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn stored_role_parses_known_roles() {
        assert_eq!(stored_role(&record("USER")).unwrap(), Role::User);
        assert_eq!(stored_role(&record("ADMIN")).unwrap(), Role::Admin);
    }

    #[test]
    fn stored_role_rejects_corrupt_column() {
        assert!(stored_role(&record("ROOT")).is_err());
    }

    #[test]
    fn response_never_carries_password_hash() {
        let response = to_response(record("USER")).unwrap();
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("password_hash").is_none());
    }
}
