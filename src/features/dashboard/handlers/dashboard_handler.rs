use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::core::error::{AppError, ErrorBody};
use crate::core::extractor::BearerToken;
use crate::features::dashboard::dtos::{DashboardStatsDto, StatsQueryParams};
use crate::features::dashboard::services::DashboardService;
use crate::shared::types::ApiResponse;

/// Aggregate dashboard statistics for one municipality
///
/// Returns overall status counts plus a daily series covering the last 30
/// days. The credential is forwarded to the data store but not checked
/// here, mirroring the deployed endpoint.
#[utoipa::path(
    get,
    path = "/get-dashboard-stats",
    tag = "dashboard",
    params(StatsQueryParams),
    responses(
        (status = 200, description = "Aggregated statistics", body = ApiResponse<DashboardStatsDto>),
        (status = 400, description = "Missing prefeitura_id parameter", body = ErrorBody),
        (status = 500, description = "Data store failure", body = ErrorBody)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_dashboard_stats(
    BearerToken(authorization): BearerToken,
    State(service): State<Arc<DashboardService>>,
    Query(params): Query<StatsQueryParams>,
) -> Result<Json<ApiResponse<DashboardStatsDto>>, AppError> {
    let Some(prefeitura_id) = params.prefeitura_id.filter(|id| !id.is_empty()) else {
        return Err(AppError::Validation("prefeitura_id é obrigatório".to_string()));
    };

    let stats = service.stats(authorization, &prefeitura_id).await?;

    Ok(Json(ApiResponse::success(stats, None)))
}
