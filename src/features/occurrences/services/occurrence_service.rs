use serde::Deserialize;
use uuid::Uuid;

use crate::core::config::BackendConfig;
use crate::core::error::{AppError, Result};
use crate::features::occurrences::dtos::CreateOccurrenceDto;
use crate::features::occurrences::models::{NewOccurrence, Occurrence};
use crate::modules::backend::BackendClient;
use crate::shared::constants::{DEFAULT_CITY, DEFAULT_STATE};

/// Municipality lookup row, `id` projection only
#[derive(Debug, Deserialize)]
struct PrefeituraRow {
    id: Uuid,
}

/// Service for filing new occurrences
pub struct OccurrenceService {
    config: BackendConfig,
}

impl OccurrenceService {
    pub fn new(config: BackendConfig) -> Self {
        Self { config }
    }

    /// Authenticate the caller, validate the payload and insert the
    /// occurrence under the fixed pilot municipality.
    pub async fn create(
        &self,
        authorization: Option<String>,
        dto: CreateOccurrenceDto,
    ) -> Result<Occurrence> {
        let client = BackendClient::new(&self.config, authorization);

        let user = client
            .current_user()
            .await
            .map_err(|_| AppError::Auth("Usuário não está logado".to_string()))?;

        let Some((titulo, descricao)) = dto.required_fields() else {
            return Err(AppError::Validation(
                "Título e descrição são obrigatórios".to_string(),
            ));
        };
        let (titulo, descricao) = (titulo.to_string(), descricao.to_string());

        let prefeitura: Option<PrefeituraRow> = client
            .from("prefeituras")
            .select("id")
            .eq("cidade", DEFAULT_CITY)
            .eq("estado", DEFAULT_STATE)
            .fetch_one()
            .await?;

        let Some(prefeitura) = prefeitura else {
            return Err(AppError::BadRequest("Prefeitura não encontrada".to_string()));
        };

        let row = NewOccurrence {
            user_id: user.id,
            prefeitura_id: prefeitura.id,
            titulo,
            descricao,
            categoria_id: dto.categoria_id,
            latitude: dto.latitude,
            longitude: dto.longitude,
            endereco: dto.endereco,
            fotos: dto.fotos.unwrap_or_default(),
            videos: dto.videos.unwrap_or_default(),
        };

        let occurrence: Occurrence = client.from("ocorrencias").select("*").insert(&row).await?;

        tracing::info!(
            "Occurrence {} created for user {} (prefeitura {})",
            occurrence.id,
            occurrence.user_id,
            occurrence.prefeitura_id
        );

        Ok(occurrence)
    }
}
