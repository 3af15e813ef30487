use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Query parameters for the dashboard statistics endpoint
#[derive(Debug, Deserialize, IntoParams)]
pub struct StatsQueryParams {
    /// Municipality to aggregate; forwarded opaquely to the data store
    pub prefeitura_id: Option<String>,
}

/// Aggregate counts over every occurrence of a municipality
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GeneralStatsDto {
    pub total: i64,
    pub recebidas: i64,
    pub em_analise: i64,
    pub em_atendimento: i64,
    pub resolvidas: i64,
    pub rejeitadas: i64,
    /// `round(resolvidas × 100 / total)`, `0` when there are no rows
    pub percentual_resolucao: i64,
}

/// One day of the recent-activity series
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DailyStatsDto {
    pub date: NaiveDate,
    pub total: i64,
    pub resolvidas: i64,
}

/// Full dashboard payload
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardStatsDto {
    pub estatisticas_gerais: GeneralStatsDto,
    /// Per-day buckets of the last `periodo_dias` days; contractually
    /// unordered
    pub estatisticas_diarias: Vec<DailyStatsDto>,
    pub periodo_dias: i64,
}
