//! Dashboard API handlers

use crate::state::{DashboardStats, SharedRegistry};
use axum::{extract::State, response::Json};
use serde::Serialize;

/// Dashboard stats response
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    /// Always true on the success path
    pub success: bool,
    /// The computed aggregation
    pub data: DashboardStats,
}

/// GET /api/dashboard/stats - Compute dashboard statistics
pub async fn stats(State(registry): State<SharedRegistry>) -> Json<StatsResponse> {
    let registry = registry.read().await;
    Json(StatsResponse {
        success: true,
        data: registry.stats(),
    })
}
