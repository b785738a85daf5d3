//! Admin dashboard statistics

use crate::error::ApiError;
use crate::repositories::{OrderRepository, ProductRepository};
use nexuskart_shared::types::StatsResponse;
use sqlx::PgPool;

/// Stock level at or below which a product counts as low
const LOW_STOCK_THRESHOLD: i32 = 5;

/// Statistics service
pub struct StatsService;

impl StatsService {
    /// Aggregate the admin dashboard numbers
    pub async fn dashboard(pool: &PgPool) -> Result<StatsResponse, ApiError> {
        let total_products = ProductRepository::count(pool).await?;
        let total_sales = OrderRepository::total_sales(pool).await?;
        let low_stock_count = ProductRepository::low_stock_count(pool, LOW_STOCK_THRESHOLD).await?;

        let stock_status = if low_stock_count > 0 {
            format!("Alert ({} Low)", low_stock_count)
        } else {
            "Healthy".to_string()
        };

        Ok(StatsResponse {
            total_products,
            total_sales,
            low_stock_count,
            stock_status,
        })
    }
}
