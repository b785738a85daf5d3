//! Product catalog repository

use super::StoredImage;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

/// Product record from database (image bytes excluded; see
/// [`ProductRepository::get_image`])
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductRecord {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub brand: String,
    pub price: Decimal,
    pub category: String,
    pub release_date: Option<NaiveDate>,
    pub available: bool,
    pub stock_quantity: i32,
    pub image_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Lightweight projection for keyword search results
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductSummaryRecord {
    pub id: Uuid,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub price: Decimal,
}

/// Input for creating or updating a product
///
/// On update, `None` image fields keep the stored image.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub brand: String,
    pub price: Decimal,
    pub category: String,
    pub release_date: Option<NaiveDate>,
    pub available: bool,
    pub stock_quantity: i32,
    pub image_name: Option<String>,
    pub image_type: Option<String>,
    pub image_data: Option<Vec<u8>>,
}

const PRODUCT_COLUMNS: &str = "id, name, description, brand, price, category, release_date, \
                               available, stock_quantity, image_name, created_at, updated_at";

/// Product repository for database operations
pub struct ProductRepository;

impl ProductRepository {
    /// Insert a new product
    pub async fn create(pool: &PgPool, product: &NewProduct) -> Result<ProductRecord, sqlx::Error> {
        sqlx::query_as::<_, ProductRecord>(&format!(
            r#"
            INSERT INTO products
                (name, description, brand, price, category, release_date,
                 available, stock_quantity, image_name, image_type, image_data)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(&product.name)
        .bind(&product.description)
        .bind(&product.brand)
        .bind(product.price)
        .bind(&product.category)
        .bind(product.release_date)
        .bind(product.available)
        .bind(product.stock_quantity)
        .bind(&product.image_name)
        .bind(&product.image_type)
        .bind(&product.image_data)
        .fetch_one(pool)
        .await
    }

    /// Update a product; absent image fields preserve the stored image
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        product: &NewProduct,
    ) -> Result<Option<ProductRecord>, sqlx::Error> {
        sqlx::query_as::<_, ProductRecord>(&format!(
            r#"
            UPDATE products SET
                name = $2,
                description = $3,
                brand = $4,
                price = $5,
                category = $6,
                release_date = $7,
                available = $8,
                stock_quantity = $9,
                image_name = COALESCE($10, image_name),
                image_type = COALESCE($11, image_type),
                image_data = COALESCE($12, image_data),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {PRODUCT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(&product.brand)
        .bind(product.price)
        .bind(&product.category)
        .bind(product.release_date)
        .bind(product.available)
        .bind(product.stock_quantity)
        .bind(&product.image_name)
        .bind(&product.image_type)
        .bind(&product.image_data)
        .fetch_optional(pool)
        .await
    }

    /// Find a product by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<ProductRecord>, sqlx::Error> {
        sqlx::query_as::<_, ProductRecord>(&format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products
            WHERE id = $1
            "#
        ))
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Delete a product; returns whether a row was removed
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Full catalog listing, newest first
    pub async fn list_all(pool: &PgPool) -> Result<Vec<ProductRecord>, sqlx::Error> {
        sqlx::query_as::<_, ProductRecord>(&format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products
            ORDER BY created_at DESC
            "#
        ))
        .fetch_all(pool)
        .await
    }

    /// One page of the catalog, newest first, with the total row count
    pub async fn list_paginated(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<ProductRecord>, i64), sqlx::Error> {
        let rows = sqlx::query_as::<_, ProductRecord>(&format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
            .fetch_one(pool)
            .await?;

        Ok((rows, total))
    }

    /// One page of a category, with the total row count for that category
    pub async fn list_by_category_paginated(
        pool: &PgPool,
        category: &str,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<ProductRecord>, i64), sqlx::Error> {
        let rows = sqlx::query_as::<_, ProductRecord>(&format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products
            WHERE category = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(category)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        let total =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products WHERE category = $1")
                .bind(category)
                .fetch_one(pool)
                .await?;

        Ok((rows, total))
    }

    /// One page of keyword matches over name and category
    pub async fn search_paginated(
        pool: &PgPool,
        keyword: &str,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<ProductRecord>, i64), sqlx::Error> {
        let pattern = like_pattern(keyword);

        let rows = sqlx::query_as::<_, ProductRecord>(&format!(
            r#"
            SELECT {PRODUCT_COLUMNS}
            FROM products
            WHERE name ILIKE $1 OR category ILIKE $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#
        ))
        .bind(&pattern)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM products WHERE name ILIKE $1 OR category ILIKE $1",
        )
        .bind(&pattern)
        .fetch_one(pool)
        .await?;

        Ok((rows, total))
    }

    /// Keyword search over name, description, brand, and category,
    /// returning the lightweight summary projection
    pub async fn search_summaries(
        pool: &PgPool,
        keyword: &str,
    ) -> Result<Vec<ProductSummaryRecord>, sqlx::Error> {
        sqlx::query_as::<_, ProductSummaryRecord>(
            r#"
            SELECT id, name, brand, category, price
            FROM products
            WHERE name ILIKE $1
               OR description ILIKE $1
               OR brand ILIKE $1
               OR category ILIKE $1
            ORDER BY name
            "#,
        )
        .bind(like_pattern(keyword))
        .fetch_all(pool)
        .await
    }

    /// Fetch the product image, if one is stored
    pub async fn get_image(pool: &PgPool, id: Uuid) -> Result<Option<StoredImage>, sqlx::Error> {
        sqlx::query_as::<_, StoredImage>(
            r#"
            SELECT image_name, image_type, image_data
            FROM products
            WHERE id = $1 AND image_data IS NOT NULL
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Total number of products
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
            .fetch_one(pool)
            .await
    }

    /// Number of products at or below the given stock threshold
    pub async fn low_stock_count(pool: &PgPool, threshold: i32) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products WHERE stock_quantity <= $1")
            .bind(threshold)
            .fetch_one(pool)
            .await
    }
}

/// Wrap a keyword for ILIKE matching, escaping the pattern metacharacters
fn like_pattern(keyword: &str) -> String {
    let escaped = keyword
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}
