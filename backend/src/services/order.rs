//! Order service

use crate::error::ApiError;
use crate::repositories::{
    NewOrderItem, OrderItemRecord, OrderRecord, OrderRepository, ProductRepository, UserRepository,
};
use nexuskart_shared::types::{OrderItemResponse, OrderResponse, PlaceOrderRequest};
use nexuskart_shared::{validation, OrderStatus};
use rust_decimal::Decimal;
use sqlx::PgPool;
use std::collections::HashMap;

/// Order service
pub struct OrderService;

impl OrderService {
    /// Place an order for the authenticated subject
    ///
    /// The total is computed from current catalog prices; each line
    /// captures the unit price at purchase time.
    pub async fn place(
        pool: &PgPool,
        subject_email: &str,
        req: PlaceOrderRequest,
    ) -> Result<OrderResponse, ApiError> {
        if req.items.is_empty() {
            return Err(ApiError::Validation(
                "Order must contain at least one item".to_string(),
            ));
        }
        if req.shipping_address.trim().is_empty() {
            return Err(ApiError::Validation(
                "Shipping address is required".to_string(),
            ));
        }

        // The token was already verified; a missing record means the
        // account vanished after issuance.
        let user = UserRepository::find_by_email(pool, subject_email)
            .await?
            .ok_or_else(|| ApiError::Unauthorized("Account no longer exists".to_string()))?;

        let mut items = Vec::with_capacity(req.items.len());
        let mut total = Decimal::ZERO;
        for line in &req.items {
            validation::validate_order_quantity(line.quantity).map_err(ApiError::Validation)?;

            let product = ProductRepository::find_by_id(pool, line.product_id)
                .await?
                .ok_or_else(|| {
                    ApiError::BadRequest(format!("Unknown product: {}", line.product_id))
                })?;

            total += product.price * Decimal::from(line.quantity);
            items.push(NewOrderItem {
                product_id: product.id,
                quantity: line.quantity,
                unit_price: product.price,
            });
        }

        let order = OrderRepository::create(
            pool,
            user.id,
            total,
            OrderStatus::Completed,
            req.shipping_address.trim(),
            req.payment_method.trim(),
            &items,
        )
        .await?;

        let item_responses = items
            .into_iter()
            .map(|item| OrderItemResponse {
                product_id: item.product_id,
                quantity: item.quantity,
                unit_price: item.unit_price,
            })
            .collect();

        to_response(order, item_responses)
    }

    /// All orders (admin view)
    pub async fn list_all(pool: &PgPool) -> Result<Vec<OrderResponse>, ApiError> {
        let orders = OrderRepository::list_all(pool).await?;
        attach_items(pool, orders).await
    }

    /// Orders placed by the authenticated subject
    pub async fn list_for_user(
        pool: &PgPool,
        subject_email: &str,
    ) -> Result<Vec<OrderResponse>, ApiError> {
        let user = UserRepository::find_by_email(pool, subject_email)
            .await?
            .ok_or_else(|| ApiError::Unauthorized("Account no longer exists".to_string()))?;

        let orders = OrderRepository::list_by_user(pool, user.id).await?;
        attach_items(pool, orders).await
    }
}

/// Load line items for a batch of orders and assemble responses
async fn attach_items(
    pool: &PgPool,
    orders: Vec<OrderRecord>,
) -> Result<Vec<OrderResponse>, ApiError> {
    let ids: Vec<_> = orders.iter().map(|o| o.id).collect();
    let mut by_order: HashMap<uuid::Uuid, Vec<OrderItemRecord>> = HashMap::new();
    for item in OrderRepository::items_for_orders(pool, &ids).await? {
        by_order.entry(item.order_id).or_default().push(item);
    }

    orders
        .into_iter()
        .map(|order| {
            let items = by_order
                .remove(&order.id)
                .unwrap_or_default()
                .into_iter()
                .map(|item| OrderItemResponse {
                    product_id: item.product_id,
                    quantity: item.quantity,
                    unit_price: item.unit_price,
                })
                .collect();
            to_response(order, items)
        })
        .collect()
}

fn to_response(
    order: OrderRecord,
    items: Vec<OrderItemResponse>,
) -> Result<OrderResponse, ApiError> {
    let status = order.status.parse::<OrderStatus>().map_err(|_| {
        ApiError::Internal(anyhow::anyhow!(
            "order {} has unrecognized status in store",
            order.id
        ))
    })?;

    Ok(OrderResponse {
        id: order.id,
        user_id: order.user_id,
        order_date: order.order_date,
        total_amount: order.total_amount,
        status,
        shipping_address: order.shipping_address,
        payment_method: order.payment_method,
        items,
    })
}
