//! HTTP routing and OpenAPI documentation configuration.
//!
//! This module defines the application's HTTP routes and generates OpenAPI documentation
//! using utoipa. All API endpoints are registered here with their OpenAPI specifications,
//! and Swagger UI is configured to provide interactive API documentation at `/api/docs`.

use axum::{middleware, Router};
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    model::{
        api::{EnvelopeStatus, ErrorDto, ResponseEnvelope},
        lead::{LeadDto, RegistrationDto},
    },
    server::{
        controller,
        middleware::{log_request, require_trusted_origin},
        model::app::AppState,
    },
};

/// Builds the application's HTTP router with all API endpoints and Swagger UI documentation.
///
/// Every route, Swagger UI included, sits behind [`require_trusted_origin`]. [`log_request`]
/// wraps the guard so rejected requests are logged and carry the cache policy too.
///
/// # Registered Endpoints
/// - `POST /api/v1/selection-process/applications` - Register a selection process application
/// - `GET /api/v1/selection-process/validate-token` - Validate an emailed token (public)
/// - `GET /api/v1/selection-process/metadata` - CRM app metadata of the selection process
/// - `GET /api/v1/b2c-leads/metadata` - CRM app metadata of the B2C workspace
///
/// # Returns
/// An Axum `Router<AppState>` ready to receive its state.
///
/// # Example
/// ```ignore
/// let state = AppState::new(db, config)?;
/// let router = routes(state.clone()).with_state(state);
/// ```
pub fn routes(state: AppState) -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(
        info(title = "Intake", description = "Lead intake API"),
        tags(
            (name = controller::selection::SELECTION_TAG, description = "Selection process applications"),
            (name = controller::b2c::B2C_TAG, description = "B2C exchange leads"),
        ),
        components(schemas(EnvelopeStatus, ErrorDto, LeadDto, RegistrationDto, ResponseEnvelope))
    )]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(controller::selection::register_lead))
        .routes(routes!(controller::selection::validate_token))
        .routes(routes!(controller::selection::get_metadata))
        .routes(routes!(controller::b2c::get_metadata))
        .split_for_parts();

    let routes = routes.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api));

    routes
        .layer(middleware::from_fn_with_state(
            state,
            require_trusted_origin,
        ))
        .layer(middleware::from_fn(log_request))
}
