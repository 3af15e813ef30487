mod occurrence;

pub use occurrence::{NewOccurrence, Occurrence, OccurrenceStatus};
