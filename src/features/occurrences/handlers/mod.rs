mod occurrence_handler;

pub use occurrence_handler::*;
