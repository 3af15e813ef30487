mod occurrence_dto;

pub use occurrence_dto::CreateOccurrenceDto;
