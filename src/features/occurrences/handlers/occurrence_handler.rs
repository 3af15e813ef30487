use axum::{extract::State, Json};
use std::sync::Arc;

use crate::core::error::{AppError, ErrorBody};
use crate::core::extractor::{AppJson, BearerToken};
use crate::features::occurrences::dtos::CreateOccurrenceDto;
use crate::features::occurrences::models::Occurrence;
use crate::features::occurrences::services::OccurrenceService;
use crate::shared::types::ApiResponse;

/// File a new occurrence
///
/// Authenticates the caller against the identity provider, validates the
/// mandatory fields and inserts the record under the pilot municipality.
#[utoipa::path(
    post,
    path = "/create-occurrence",
    tag = "occurrences",
    request_body = CreateOccurrenceDto,
    responses(
        (status = 200, description = "Occurrence created", body = ApiResponse<Occurrence>),
        (status = 400, description = "Missing mandatory fields or unknown municipality", body = ErrorBody),
        (status = 401, description = "Caller is not logged in", body = ErrorBody),
        (status = 500, description = "Data store failure", body = ErrorBody)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn create_occurrence(
    BearerToken(authorization): BearerToken,
    State(service): State<Arc<OccurrenceService>>,
    AppJson(dto): AppJson<CreateOccurrenceDto>,
) -> Result<Json<ApiResponse<Occurrence>>, AppError> {
    let occurrence = service.create(authorization, dto).await?;

    Ok(Json(ApiResponse::success(
        occurrence,
        Some("Ocorrência criada com sucesso!".to_string()),
    )))
}
