pub mod dashboard;
pub mod media;
pub mod occurrences;
