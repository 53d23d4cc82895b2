use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dioxus_logger::tracing;
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum EmailError {
    #[error("Email trigger returned status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
}

impl IntoResponse for EmailError {
    fn into_response(self) -> Response {
        tracing::error!("{}", self);

        (
            StatusCode::BAD_GATEWAY,
            Json(ErrorDto {
                error: "Failed to trigger the validation email".to_string(),
            }),
        )
            .into_response()
    }
}
