//! API request and response types

use crate::models::{OrderStatus, Role};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Paginated response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub per_page: u32,
    pub total_pages: u32,
}

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

/// Generic acknowledgement body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

// ============================================================================
// Auth Types
// ============================================================================

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Signup request
///
/// `admin_code` is the optional provisioning secret; when it matches the
/// configured value the account is created with the ADMIN role.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    #[serde(default)]
    pub admin_code: Option<String>,
}

/// Successful login response: the bearer token plus an identity summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub token: String,
}

/// Public view of a user account (never carries the password hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Profile update request; only supplied fields change, and a new password
/// is re-hashed before it reaches the store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

// ============================================================================
// Catalog Types
// ============================================================================

/// Product payload for create/update (the image travels as a separate
/// multipart part)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRequest {
    pub name: String,
    pub description: String,
    pub brand: String,
    pub price: Decimal,
    pub category: String,
    #[serde(default)]
    pub release_date: Option<NaiveDate>,
    #[serde(default = "default_true")]
    pub available: bool,
    pub stock_quantity: i32,
}

fn default_true() -> bool {
    true
}

/// Full product view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductResponse {
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

/// Lightweight projection returned by keyword search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSummary {
    pub id: Uuid,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub price: Decimal,
}

/// Query parameters for the catalog listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductListQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub category: Option<String>,
    pub keyword: Option<String>,
}

impl ProductListQuery {
    pub const DEFAULT_PAGE_SIZE: u32 = 8;
    pub const MAX_PAGE_SIZE: u32 = 100;

    /// Page size clamped to [1, MAX_PAGE_SIZE]
    pub fn page_size(&self) -> u32 {
        self.size
            .unwrap_or(Self::DEFAULT_PAGE_SIZE)
            .clamp(1, Self::MAX_PAGE_SIZE)
    }
}

/// Keyword search query
#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
    pub keyword: String,
}

// ============================================================================
// Order Types
// ============================================================================

/// One line of an order being placed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemRequest {
    pub product_id: Uuid,
    pub quantity: i32,
}

/// Order placement request; the total is computed server-side from current
/// product prices
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceOrderRequest {
    pub items: Vec<OrderItemRequest>,
    pub shipping_address: String,
    pub payment_method: String,
}

/// One line of a stored order, with the unit price captured at purchase
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemResponse {
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_price: Decimal,
}

/// Stored order view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub order_date: DateTime<Utc>,
    pub total_amount: Decimal,
    pub status: OrderStatus,
    pub shipping_address: String,
    pub payment_method: String,
    pub items: Vec<OrderItemResponse>,
}

// ============================================================================
// Review Types
// ============================================================================

/// Review submission; reviews are open to anonymous visitors, so the
/// display name travels in the body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRequest {
    pub user_name: String,
    pub rating: i32,
    pub comment: String,
}

/// Stored review view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewResponse {
    pub id: Uuid,
    pub user_name: String,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Newsletter and Statistics
// ============================================================================

/// Newsletter subscription request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscribeRequest {
    pub email: String,
}

/// Admin dashboard aggregates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsResponse {
    pub total_products: i64,
    pub total_sales: Decimal,
    pub low_stock_count: i64,
    pub stock_status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signup_request_admin_code_defaults_to_none() {
        let req: SignupRequest =
            serde_json::from_str(r#"{"email":"a@b.com","password":"pw","name":"A"}"#).unwrap();
        assert!(req.admin_code.is_none());
    }

    #[test]
    fn product_request_defaults_available() {
        let req: ProductRequest = serde_json::from_str(
            r#"{"name":"n","description":"d","brand":"b","price":"9.99","category":"c","stock_quantity":3}"#,
        )
        .unwrap();
        assert!(req.available);
        assert!(req.release_date.is_none());
    }

    #[test]
    fn list_query_page_size_is_clamped() {
        let q = ProductListQuery::default();
        assert_eq!(q.page_size(), ProductListQuery::DEFAULT_PAGE_SIZE);

        let q = ProductListQuery {
            size: Some(0),
            ..Default::default()
        };
        assert_eq!(q.page_size(), 1);

        let q = ProductListQuery {
            size: Some(10_000),
            ..Default::default()
        };
        assert_eq!(q.page_size(), ProductListQuery::MAX_PAGE_SIZE);
    }
}
