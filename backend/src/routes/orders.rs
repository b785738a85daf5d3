//! Order routes
//!
//! Placing and reading one's own orders requires any authenticated
//! identity; the full order book is ADMIN only.

use crate::auth::{AdminUser, AuthUser};
use crate::error::ApiResult;
use crate::services::OrderService;
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use nexuskart_shared::types::{OrderResponse, PlaceOrderRequest};

/// Create order routes
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(place_order).get(list_all_orders))
        .route("/mine", get(list_my_orders))
}

/// Place an order for the authenticated caller
///
/// POST /api/v1/orders
async fn place_order(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<PlaceOrderRequest>,
) -> ApiResult<(StatusCode, Json<OrderResponse>)> {
    let order = OrderService::place(&state.db, &auth.email, req).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// All orders (ADMIN only)
///
/// GET /api/v1/orders
async fn list_all_orders(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> ApiResult<Json<Vec<OrderResponse>>> {
    let orders = OrderService::list_all(&state.db).await?;
    Ok(Json(orders))
}

/// Orders placed by the authenticated caller
///
/// GET /api/v1/orders/mine
async fn list_my_orders(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<OrderResponse>>> {
    let orders = OrderService::list_for_user(&state.db, &auth.email).await?;
    Ok(Json(orders))
}
