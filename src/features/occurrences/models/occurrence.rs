use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Lifecycle of a filed occurrence. Assigned by the data store on insert
/// (`recebido`) and moved along by the municipality's back office.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OccurrenceStatus {
    Recebido,
    EmAnalise,
    EmAtendimento,
    Resolvido,
    Rejeitado,
}

/// A citizen-submitted complaint as stored by the data store
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Occurrence {
    pub id: Uuid,
    /// Owning (authenticated) user
    pub user_id: Uuid,
    /// Municipality the occurrence is filed under
    pub prefeitura_id: Uuid,
    pub titulo: String,
    pub descricao: String,
    /// Caller-supplied category reference, passed through opaquely
    #[schema(value_type = Option<Object>)]
    pub categoria_id: Option<serde_json::Value>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub endereco: Option<String>,
    /// Stored-media URLs attached by the caller
    pub fotos: Vec<String>,
    pub videos: Vec<String>,
    pub status: OccurrenceStatus,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a new occurrence; `id`, `status` and `created_at`
/// are assigned by the data store
#[derive(Debug, Serialize)]
pub struct NewOccurrence {
    pub user_id: Uuid,
    pub prefeitura_id: Uuid,
    pub titulo: String,
    pub descricao: String,
    pub categoria_id: Option<serde_json::Value>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub endereco: Option<String>,
    pub fotos: Vec<String>,
    pub videos: Vec<String>,
}
