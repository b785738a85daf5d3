//! User repository for database operations

use super::StoredImage;
use chrono::{DateTime, Utc};
use nexuskart_shared::Role;
use sqlx::PgPool;
use uuid::Uuid;

/// User record from database
///
/// The image columns are deliberately excluded; profile pictures are
/// fetched through [`UserRepository::get_image`] only when needed.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for updating a user profile; `None` fields are left unchanged
#[derive(Debug, Clone, Default)]
pub struct UpdateUserProfile {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
}

/// User repository for database operations
pub struct UserRepository;

impl UserRepository {
    /// Create a new user
    pub async fn create(
        pool: &PgPool,
        email: &str,
        password_hash: &str,
        name: &str,
        role: Role,
    ) -> Result<UserRecord, sqlx::Error> {
        sqlx::query_as::<_, UserRecord>(
            r#"
            INSERT INTO users (email, password_hash, name, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, email, password_hash, name, role, created_at, updated_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .bind(name)
        .bind(role.as_str())
        .fetch_one(pool)
        .await
    }

    /// Find user by email (exact, case-sensitive match)
    pub async fn find_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<UserRecord>, sqlx::Error> {
        sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, email, password_hash, name, role, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await
    }

    /// Find user by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<UserRecord>, sqlx::Error> {
        sqlx::query_as::<_, UserRecord>(
            r#"
            SELECT id, email, password_hash, name, role, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Check if email exists
    pub async fn email_exists(pool: &PgPool, email: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)
            "#,
        )
        .bind(email)
        .fetch_one(pool)
        .await
    }

    /// Update profile fields; unset fields keep their current values
    pub async fn update_profile(
        pool: &PgPool,
        id: Uuid,
        updates: UpdateUserProfile,
    ) -> Result<Option<UserRecord>, sqlx::Error> {
        sqlx::query_as::<_, UserRecord>(
            r#"
            UPDATE users SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                password_hash = COALESCE($4, password_hash),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, email, password_hash, name, role, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(updates.name)
        .bind(updates.email)
        .bind(updates.password_hash)
        .fetch_optional(pool)
        .await
    }

    /// Replace the profile picture
    pub async fn update_image(
        pool: &PgPool,
        id: Uuid,
        image_name: &str,
        image_type: &str,
        image_data: &[u8],
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE users SET
                image_name = $2,
                image_type = $3,
                image_data = $4,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(image_name)
        .bind(image_type)
        .bind(image_data)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Fetch the profile picture, if one was uploaded
    pub async fn get_image(pool: &PgPool, id: Uuid) -> Result<Option<StoredImage>, sqlx::Error> {
        sqlx::query_as::<_, StoredImage>(
            r#"
            SELECT image_name, image_type, image_data
            FROM users
            WHERE id = $1 AND image_data IS NOT NULL
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }
}
