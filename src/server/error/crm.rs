use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dioxus_logger::tracing;
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum CrmError {
    #[error("CRM authentication failed with status {status}: {description}")]
    AuthenticationFailed { status: u16, description: String },
    #[error("CRM {operation} request failed with status {status}: {body}")]
    UnexpectedStatus {
        operation: &'static str,
        status: u16,
        body: String,
    },
    #[error("CRM item response does not contain an item id: {0}")]
    MissingItemId(String),
}

impl IntoResponse for CrmError {
    fn into_response(self) -> Response {
        tracing::error!("{}", self);

        (
            StatusCode::BAD_GATEWAY,
            Json(ErrorDto {
                error: "Failed to communicate with the CRM".to_string(),
            }),
        )
            .into_response()
    }
}
