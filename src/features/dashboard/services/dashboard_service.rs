use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use std::collections::BTreeMap;

use crate::core::config::BackendConfig;
use crate::core::error::Result;
use crate::features::dashboard::dtos::{DailyStatsDto, DashboardStatsDto, GeneralStatsDto};
use crate::features::occurrences::models::OccurrenceStatus;
use crate::modules::backend::BackendClient;
use crate::shared::constants::STATS_PERIOD_DAYS;

/// Occurrence projection used for aggregation: status and creation time only
#[derive(Debug, Clone, Deserialize)]
pub struct OccurrenceStatusRow {
    pub status: OccurrenceStatus,
    pub created_at: DateTime<Utc>,
}

/// Service computing the municipal dashboard statistics
pub struct DashboardService {
    config: BackendConfig,
}

impl DashboardService {
    pub fn new(config: BackendConfig) -> Self {
        Self { config }
    }

    /// Fetch every occurrence of the municipality and aggregate it.
    ///
    /// The caller's credential is forwarded when present but not gated on;
    /// the data store applies its own row access policy.
    pub async fn stats(
        &self,
        authorization: Option<String>,
        prefeitura_id: &str,
    ) -> Result<DashboardStatsDto> {
        let client = BackendClient::new(&self.config, authorization);

        let rows: Vec<OccurrenceStatusRow> = client
            .from("ocorrencias")
            .select("status,created_at")
            .eq("prefeitura_id", prefeitura_id)
            .fetch()
            .await?;

        Ok(compute_stats(&rows, Utc::now()))
    }
}

/// Aggregate the rows relative to `now`.
///
/// The general block counts every row; the daily series only covers rows
/// created within the last [`STATS_PERIOD_DAYS`] days, bucketed by the UTC
/// calendar date of their creation time.
fn compute_stats(rows: &[OccurrenceStatusRow], now: DateTime<Utc>) -> DashboardStatsDto {
    let total = rows.len() as i64;

    let count_status = |status: OccurrenceStatus| {
        rows.iter().filter(|row| row.status == status).count() as i64
    };

    let recebidas = count_status(OccurrenceStatus::Recebido);
    let em_analise = count_status(OccurrenceStatus::EmAnalise);
    let em_atendimento = count_status(OccurrenceStatus::EmAtendimento);
    let resolvidas = count_status(OccurrenceStatus::Resolvido);
    let rejeitadas = count_status(OccurrenceStatus::Rejeitado);

    let percentual_resolucao = if total > 0 {
        ((resolvidas * 100) as f64 / total as f64).round() as i64
    } else {
        0
    };

    let cutoff = now - Duration::days(STATS_PERIOD_DAYS);
    let mut daily: BTreeMap<chrono::NaiveDate, DailyStatsDto> = BTreeMap::new();

    for row in rows.iter().filter(|row| row.created_at >= cutoff) {
        let date = row.created_at.date_naive();
        let bucket = daily.entry(date).or_insert_with(|| DailyStatsDto {
            date,
            total: 0,
            resolvidas: 0,
        });
        bucket.total += 1;
        if row.status == OccurrenceStatus::Resolvido {
            bucket.resolvidas += 1;
        }
    }

    DashboardStatsDto {
        estatisticas_gerais: GeneralStatsDto {
            total,
            recebidas,
            em_analise,
            em_atendimento,
            resolvidas,
            rejeitadas,
            percentual_resolucao,
        },
        estatisticas_diarias: daily.into_values().collect(),
        periodo_dias: STATS_PERIOD_DAYS,
    }
}
