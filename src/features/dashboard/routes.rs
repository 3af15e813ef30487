use axum::{routing::get, Router};
use std::sync::Arc;

use crate::core::middleware::cors_ok;
use crate::features::dashboard::handlers::get_dashboard_stats;
use crate::features::dashboard::services::DashboardService;

/// Create routes for the dashboard feature
pub fn routes(dashboard_service: Arc<DashboardService>) -> Router {
    Router::new()
        .route(
            "/get-dashboard-stats",
            get(get_dashboard_stats).options(cors_ok),
        )
        .with_state(dashboard_service)
}
