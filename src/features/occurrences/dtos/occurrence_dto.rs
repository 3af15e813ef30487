use serde::Deserialize;
use utoipa::ToSchema;

/// Request body for filing an occurrence.
///
/// Only `titulo` and `descricao` are mandatory; they are modeled as
/// `Option` so that an absent field and an empty string produce the same
/// validation error instead of a deserialization failure.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CreateOccurrenceDto {
    #[schema(example = "Buraco na rua")]
    pub titulo: Option<String>,
    #[schema(example = "Buraco grande na frente do número 123")]
    pub descricao: Option<String>,
    /// Category reference, forwarded opaquely to the data store
    #[schema(value_type = Option<Object>)]
    pub categoria_id: Option<serde_json::Value>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub endereco: Option<String>,
    /// Stored-media URLs; defaults to an empty list
    pub fotos: Option<Vec<String>>,
    pub videos: Option<Vec<String>>,
}

impl CreateOccurrenceDto {
    /// The mandatory fields, when both are present and non-empty
    pub fn required_fields(&self) -> Option<(&str, &str)> {
        match (self.titulo.as_deref(), self.descricao.as_deref()) {
            (Some(titulo), Some(descricao)) if !titulo.is_empty() && !descricao.is_empty() => {
                Some((titulo, descricao))
            }
            _ => None,
        }
    }
}
