use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::core::error::ErrorBody;
use crate::features::dashboard::{dtos as dashboard_dtos, handlers as dashboard_handlers};
use crate::features::media::{dtos as media_dtos, handlers as media_handlers};
use crate::features::occurrences::{
    dtos as occurrences_dtos, handlers as occurrences_handlers, models as occurrences_models,
};
use crate::shared::types::ApiResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Occurrences
        occurrences_handlers::create_occurrence,
        // Dashboard
        dashboard_handlers::get_dashboard_stats,
        // Media
        media_handlers::upload_media,
    ),
    components(
        schemas(
            // Shared
            ErrorBody,
            // Occurrences
            occurrences_models::OccurrenceStatus,
            occurrences_models::Occurrence,
            occurrences_dtos::CreateOccurrenceDto,
            ApiResponse<occurrences_models::Occurrence>,
            // Dashboard
            dashboard_dtos::GeneralStatsDto,
            dashboard_dtos::DailyStatsDto,
            dashboard_dtos::DashboardStatsDto,
            ApiResponse<dashboard_dtos::DashboardStatsDto>,
            // Media
            media_dtos::UploadMediaDto,
            media_dtos::MediaResponseDto,
            ApiResponse<media_dtos::MediaResponseDto>,
        )
    ),
    tags(
        (name = "occurrences", description = "Citizen occurrence filing"),
        (name = "dashboard", description = "Municipal dashboard statistics"),
        (name = "media", description = "Occurrence media uploads"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Ocorrências API",
        version = "0.1.0",
        description = "API documentation for the municipal occurrence reporting service",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
