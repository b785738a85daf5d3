//! Review repository for database operations

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// Review record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ReviewRecord {
    pub id: Uuid,
    pub product_id: Uuid,
    pub user_name: String,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

/// Review repository for database operations
pub struct ReviewRepository;

impl ReviewRepository {
    /// Insert a review for a product
    pub async fn create(
        pool: &PgPool,
        product_id: Uuid,
        user_name: &str,
        rating: i32,
        comment: &str,
    ) -> Result<ReviewRecord, sqlx::Error> {
        sqlx::query_as::<_, ReviewRecord>(
            r#"
            INSERT INTO reviews (product_id, user_name, rating, comment)
            VALUES ($1, $2, $3, $4)
            RETURNING id, product_id, user_name, rating, comment, created_at
            "#,
        )
        .bind(product_id)
        .bind(user_name)
        .bind(rating)
        .bind(comment)
        .fetch_one(pool)
        .await
    }

    /// Reviews for a product, newest first
    pub async fn list_by_product(
        pool: &PgPool,
        product_id: Uuid,
    ) -> Result<Vec<ReviewRecord>, sqlx::Error> {
        sqlx::query_as::<_, ReviewRecord>(
            r#"
            SELECT id, product_id, user_name, rating, comment, created_at
            FROM reviews
            WHERE product_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(product_id)
        .fetch_all(pool)
        .await
    }
}
