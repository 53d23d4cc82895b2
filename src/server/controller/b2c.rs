use axum::{extract::State, response::IntoResponse, Json};

use crate::{
    model::api::{ErrorDto, ResponseEnvelope},
    server::{error::Error, model::app::AppState, service::crm::CrmMetadataService},
};

pub static B2C_TAG: &str = "b2c-leads";

/// Get the CRM app metadata of the B2C leads workspace
#[utoipa::path(
    get,
    path = "/api/v1/b2c-leads/metadata",
    tag = B2C_TAG,
    responses(
        (status = 200, description = "CRM app metadata", body = serde_json::Value),
        (status = 401, description = "Request origin or API key rejected", body = ResponseEnvelope),
        (status = 502, description = "CRM authentication failed", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_metadata(State(state): State<AppState>) -> Result<impl IntoResponse, Error> {
    let service = CrmMetadataService::new(
        &state.crm_client,
        &state.token_cache,
        &state.metadata_cache,
    );

    let (metadata, status) = service.get(&state.config.b2c_workspace).await?;

    Ok((status, Json(metadata)))
}
