//! Order repository for database operations

use chrono::{DateTime, Utc};
use nexuskart_shared::OrderStatus;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

/// Order record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OrderRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub order_date: DateTime<Utc>,
    pub total_amount: Decimal,
    pub status: String,
    pub shipping_address: String,
    pub payment_method: String,
}

/// Order line record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OrderItemRecord {
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_price: Decimal,
}

/// One line of an order being inserted
#[derive(Debug, Clone)]
pub struct NewOrderItem {
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_price: Decimal,
}

/// Order repository for database operations
pub struct OrderRepository;

impl OrderRepository {
    /// Insert an order and its line items in a single transaction
    pub async fn create(
        pool: &PgPool,
        user_id: Uuid,
        total_amount: Decimal,
        status: OrderStatus,
        shipping_address: &str,
        payment_method: &str,
        items: &[NewOrderItem],
    ) -> Result<OrderRecord, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let order = sqlx::query_as::<_, OrderRecord>(
            r#"
            INSERT INTO orders (user_id, total_amount, status, shipping_address, payment_method)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, order_date, total_amount, status,
                      shipping_address, payment_method
            "#,
        )
        .bind(user_id)
        .bind(total_amount)
        .bind(status.as_str())
        .bind(shipping_address)
        .bind(payment_method)
        .fetch_one(&mut *tx)
        .await?;

        for item in items {
            sqlx::query(
                r#"
                INSERT INTO order_items (order_id, product_id, quantity, unit_price)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(order.id)
            .bind(item.product_id)
            .bind(item.quantity)
            .bind(item.unit_price)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(order)
    }

    /// All orders, newest first
    pub async fn list_all(pool: &PgPool) -> Result<Vec<OrderRecord>, sqlx::Error> {
        sqlx::query_as::<_, OrderRecord>(
            r#"
            SELECT id, user_id, order_date, total_amount, status,
                   shipping_address, payment_method
            FROM orders
            ORDER BY order_date DESC
            "#,
        )
        .fetch_all(pool)
        .await
    }

    /// Orders placed by one user, newest first
    pub async fn list_by_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<OrderRecord>, sqlx::Error> {
        sqlx::query_as::<_, OrderRecord>(
            r#"
            SELECT id, user_id, order_date, total_amount, status,
                   shipping_address, payment_method
            FROM orders
            WHERE user_id = $1
            ORDER BY order_date DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Line items for a set of orders
    pub async fn items_for_orders(
        pool: &PgPool,
        order_ids: &[Uuid],
    ) -> Result<Vec<OrderItemRecord>, sqlx::Error> {
        sqlx::query_as::<_, OrderItemRecord>(
            r#"
            SELECT order_id, product_id, quantity, unit_price
            FROM order_items
            WHERE order_id = ANY($1)
            "#,
        )
        .bind(order_ids)
        .fetch_all(pool)
        .await
    }

    /// Sum of all order totals
    pub async fn total_sales(pool: &PgPool) -> Result<Decimal, sqlx::Error> {
        sqlx::query_scalar::<_, Decimal>(
            "SELECT COALESCE(SUM(total_amount), 0) FROM orders",
        )
        .fetch_one(pool)
        .await
    }
}
