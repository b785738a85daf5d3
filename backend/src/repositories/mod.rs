//! Database repositories
//!
//! Data access layer. Repositories return raw `sqlx::Error` so the service
//! layer can surface store failures distinctly from domain errors.

pub mod order;
pub mod product;
pub mod review;
pub mod user;

pub use order::{NewOrderItem, OrderItemRecord, OrderRecord, OrderRepository};
pub use product::{NewProduct, ProductRecord, ProductRepository, ProductSummaryRecord};
pub use review::{ReviewRecord, ReviewRepository};
pub use user::{UpdateUserProfile, UserRecord, UserRepository};

/// An image blob stored alongside a record
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StoredImage {
    pub image_name: String,
    pub image_type: String,
    pub image_data: Vec<u8>,
}
