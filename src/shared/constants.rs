/// Municipality every occurrence is currently filed under. The pilot runs
/// in a single city, so the lookup pair is fixed instead of caller-supplied.
pub const DEFAULT_CITY: &str = "Jaú";
pub const DEFAULT_STATE: &str = "SP";

/// Storage bucket holding uploaded occurrence media
pub const MEDIA_BUCKET: &str = "occurrences-media";

/// Window of the dashboard's daily time series, in days
pub const STATS_PERIOD_DAYS: i64 = 30;
