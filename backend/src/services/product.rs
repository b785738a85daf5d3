//! Product catalog service

use crate::error::ApiError;
use crate::repositories::{NewProduct, ProductRecord, ProductRepository, StoredImage};
use nexuskart_shared::types::{
    PaginatedResponse, ProductListQuery, ProductRequest, ProductResponse, ProductSummary,
};
use nexuskart_shared::validation;
use sqlx::PgPool;
use uuid::Uuid;

/// An image file received over multipart
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// Product catalog service
pub struct ProductService;

impl ProductService {
    /// Create a product with its image
    pub async fn create(
        pool: &PgPool,
        req: ProductRequest,
        image: UploadedImage,
    ) -> Result<ProductResponse, ApiError> {
        validate_product(&req)?;

        let product = ProductRepository::create(pool, &to_new_product(req, Some(image))).await?;
        Ok(to_response(product))
    }

    /// Update a product; without a new image the stored one is kept
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        req: ProductRequest,
        image: Option<UploadedImage>,
    ) -> Result<ProductResponse, ApiError> {
        validate_product(&req)?;

        let updated = ProductRepository::update(pool, id, &to_new_product(req, image))
            .await?
            .ok_or_else(|| ApiError::NotFound("Product not found".to_string()))?;
        Ok(to_response(updated))
    }

    /// Fetch a single product
    pub async fn get(pool: &PgPool, id: Uuid) -> Result<ProductResponse, ApiError> {
        let product = ProductRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Product not found".to_string()))?;
        Ok(to_response(product))
    }

    /// Delete a product
    ///
    /// A product referenced by existing order lines cannot be removed;
    /// that surfaces as a conflict, not a store failure.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), ApiError> {
        match ProductRepository::delete(pool, id).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(ApiError::NotFound("Product not found".to_string())),
            Err(e) if is_foreign_key_violation(&e) => Err(ApiError::Conflict(
                "Product is referenced by existing orders".to_string(),
            )),
            Err(e) => Err(ApiError::Database(e)),
        }
    }

    /// Full catalog listing
    pub async fn list_all(pool: &PgPool) -> Result<Vec<ProductResponse>, ApiError> {
        let products = ProductRepository::list_all(pool).await?;
        Ok(products.into_iter().map(to_response).collect())
    }

    /// One page of the catalog; a category filter takes precedence over a
    /// keyword, matching the original listing contract
    pub async fn list_page(
        pool: &PgPool,
        query: &ProductListQuery,
    ) -> Result<PaginatedResponse<ProductResponse>, ApiError> {
        let page = query.page.unwrap_or(0);
        let per_page = query.page_size();
        let limit = per_page as i64;
        let offset = page as i64 * limit;

        let (rows, total) = match (&query.category, &query.keyword) {
            (Some(category), _) if !category.is_empty() => {
                ProductRepository::list_by_category_paginated(pool, category, limit, offset).await?
            }
            (_, Some(keyword)) if !keyword.is_empty() => {
                ProductRepository::search_paginated(pool, keyword, limit, offset).await?
            }
            _ => ProductRepository::list_paginated(pool, limit, offset).await?,
        };

        let total = total as u64;
        let total_pages = total.div_ceil(per_page as u64) as u32;

        Ok(PaginatedResponse {
            data: rows.into_iter().map(to_response).collect(),
            total,
            page,
            per_page,
            total_pages,
        })
    }

    /// Keyword search returning the lightweight projection
    pub async fn search(pool: &PgPool, keyword: &str) -> Result<Vec<ProductSummary>, ApiError> {
        let rows = ProductRepository::search_summaries(pool, keyword).await?;
        Ok(rows
            .into_iter()
            .map(|r| ProductSummary {
                id: r.id,
                name: r.name,
                brand: r.brand,
                category: r.category,
                price: r.price,
            })
            .collect())
    }

    /// Fetch a product's image bytes
    pub async fn get_image(pool: &PgPool, id: Uuid) -> Result<StoredImage, ApiError> {
        ProductRepository::get_image(pool, id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Product image not found".to_string()))
    }
}

/// Postgres foreign-key violation (SQLSTATE 23503)
fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23503"))
}

fn validate_product(req: &ProductRequest) -> Result<(), ApiError> {
    if req.name.trim().is_empty() {
        return Err(ApiError::Validation("Product name is required".to_string()));
    }
    if req.description.trim().is_empty() {
        return Err(ApiError::Validation("Description is required".to_string()));
    }
    if req.brand.trim().is_empty() {
        return Err(ApiError::Validation("Brand is required".to_string()));
    }
    if req.category.trim().is_empty() {
        return Err(ApiError::Validation("Category is required".to_string()));
    }
    validation::validate_price(req.price).map_err(ApiError::Validation)?;
    validation::validate_stock_quantity(req.stock_quantity).map_err(ApiError::Validation)?;
    Ok(())
}

fn to_new_product(req: ProductRequest, image: Option<UploadedImage>) -> NewProduct {
    let (image_name, image_type, image_data) = match image {
        Some(image) => (
            Some(image.file_name),
            Some(image.content_type),
            Some(image.data),
        ),
        None => (None, None, None),
    };

    NewProduct {
        name: req.name,
        description: req.description,
        brand: req.brand,
        price: req.price,
        category: req.category,
        release_date: req.release_date,
        available: req.available,
        stock_quantity: req.stock_quantity,
        image_name,
        image_type,
        image_data,
    }
}

fn to_response(product: ProductRecord) -> ProductResponse {
    ProductResponse {
        id: product.id,
        name: product.name,
        description: product.description,
        brand: product.brand,
        price: product.price,
        category: product.category,
        release_date: product.release_date,
        available: product.available,
        stock_quantity: product.stock_quantity,
        image_name: product.image_name,
        created_at: product.created_at,
        updated_at: product.updated_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn valid_request() -> ProductRequest {
        ProductRequest {
            name: "Nexus Phone".to_string(),
            description: "A phone".to_string(),
            brand: "Nexus".to_string(),
            price: Decimal::new(49_999, 2),
            category: "electronics".to_string(),
            release_date: None,
            available: true,
            stock_quantity: 10,
        }
    }

    #[test]
    fn test_validate_product_accepts_valid_request() {
        assert!(validate_product(&valid_request()).is_ok());
    }

    #[test]
    fn test_validate_product_rejects_blank_fields() {
        let mut req = valid_request();
        req.name = "  ".to_string();
        assert!(validate_product(&req).is_err());

        let mut req = valid_request();
        req.brand = String::new();
        assert!(validate_product(&req).is_err());
    }

    #[test]
    fn test_validate_product_rejects_bad_numbers() {
        let mut req = valid_request();
        req.price = Decimal::ZERO;
        assert!(validate_product(&req).is_err());

        let mut req = valid_request();
        req.stock_quantity = -1;
        assert!(validate_product(&req).is_err());
    }
}
