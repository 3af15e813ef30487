mod dashboard_dto;

pub use dashboard_dto::{DailyStatsDto, DashboardStatsDto, GeneralStatsDto, StatsQueryParams};
