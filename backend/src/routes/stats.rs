//! Admin statistics routes

use crate::auth::AdminUser;
use crate::error::ApiResult;
use crate::services::StatsService;
use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use nexuskart_shared::types::StatsResponse;

/// Create statistics routes
pub fn stats_routes() -> Router<AppState> {
    Router::new().route("/", get(dashboard))
}

/// Dashboard aggregates (ADMIN only)
///
/// GET /api/v1/statistics
async fn dashboard(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> ApiResult<Json<StatsResponse>> {
    let stats = StatsService::dashboard(&state.db).await?;
    Ok(Json(stats))
}
