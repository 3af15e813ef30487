use axum::{routing::post, Router};
use std::sync::Arc;

use crate::core::middleware::cors_ok;
use crate::features::occurrences::handlers::create_occurrence;
use crate::features::occurrences::services::OccurrenceService;

/// Create routes for the occurrences feature
pub fn routes(occurrence_service: Arc<OccurrenceService>) -> Router {
    Router::new()
        .route(
            "/create-occurrence",
            post(create_occurrence).options(cors_ok),
        )
        .with_state(occurrence_service)
}
