use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use dioxus_logger::tracing;
use serde_json::{json, Value};

use crate::{
    model::{
        api::{ErrorDto, ResponseEnvelope},
        lead::{LeadInput, ValidateTokenParams},
    },
    server::{
        error::Error,
        model::app::AppState,
        service::{
            crm::CrmMetadataService,
            lead::{
                registration::LeadRegistrationService,
                token::{TokenOutcome, TokenValidationService},
                validate::validate_lead,
            },
        },
    },
};

pub static SELECTION_TAG: &str = "selection-process";

/// Register an application to the selection process
///
/// Validates the application content, then creates the lead in the CRM, stores it locally and
/// emails the lead a validation link. Partial writes are undone when any step fails.
#[utoipa::path(
    post,
    path = "/api/v1/selection-process/applications",
    tag = SELECTION_TAG,
    request_body = LeadInput,
    responses(
        (status = 201, description = "Lead registered", body = ResponseEnvelope),
        (status = 400, description = "Content validation failed", body = ResponseEnvelope),
        (status = 401, description = "Request origin or API key rejected", body = ResponseEnvelope),
        (status = 502, description = "CRM did not return an item id", body = ResponseEnvelope),
        (status = 500, description = "Registration failed and was rolled back", body = ResponseEnvelope)
    ),
)]
pub async fn register_lead(
    State(state): State<AppState>,
    Json(input): Json<LeadInput>,
) -> impl IntoResponse {
    let today = Utc::now().date_naive();

    if let Err(e) = validate_lead(&input, today) {
        tracing::debug!("Rejected lead application: {}", e);

        return ResponseEnvelope::error(
            "Content validation failed",
            json!(e.to_string()),
            StatusCode::BAD_REQUEST,
        );
    }

    let (_, envelope) = LeadRegistrationService::new(&state).register(&input).await;

    envelope
}

/// Validate the token emailed to a lead
///
/// # Responses
/// - 301 (Moved Permanently): Token accepted, redirects to the fit survey
/// - 401 (Unauthorized): Token unknown, issued for another lead or expired
/// - 500 (Internal Server Error): The token could not be checked
#[utoipa::path(
    get,
    path = "/api/v1/selection-process/validate-token",
    tag = SELECTION_TAG,
    params(ValidateTokenParams),
    responses(
        (status = 301, description = "Redirect to the fit survey"),
        (status = 401, description = "Token rejected", body = ResponseEnvelope),
        (status = 500, description = "Internal server error", body = ResponseEnvelope)
    ),
)]
pub async fn validate_token(
    State(state): State<AppState>,
    Query(params): Query<ValidateTokenParams>,
) -> impl IntoResponse {
    let service = TokenValidationService::new(&state.db, &state.config.fit_survey_url);
    let now = Utc::now().naive_utc();

    match service
        .validate(params.id, &params.name, &params.token, now)
        .await
    {
        Ok(TokenOutcome::Redirect(url)) => {
            (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, url)]).into_response()
        }
        Ok(TokenOutcome::Rejected(rejection)) => ResponseEnvelope::error(
            rejection.message(),
            Value::Null,
            StatusCode::UNAUTHORIZED,
        )
        .into_response(),
        Err(e) => {
            tracing::error!(crm_id = params.id, "Failed to validate lead token: {}", e);

            ResponseEnvelope::error(
                "Failed to validate token",
                json!(e.to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            )
            .into_response()
        }
    }
}

/// Get the CRM app metadata of the selection process
///
/// Served from the cache while fresh. A fresh fetch answers with the status the CRM returned.
#[utoipa::path(
    get,
    path = "/api/v1/selection-process/metadata",
    tag = SELECTION_TAG,
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

    let (metadata, status) = service.get(&state.config.selection_workspace).await?;

    Ok((status, Json(metadata)))
}
