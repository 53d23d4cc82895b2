use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The response when an error occurs with an API request
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorDto {
    /// The error message
    pub error: String,
}

/// Outcome marker of a [`ResponseEnvelope`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeStatus {
    Success,
    Error,
}

/// Uniform body returned by the lead intake endpoints
///
/// `status_code` mirrors the HTTP status the envelope is sent with so clients that only
/// look at the body still see it.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ResponseEnvelope {
    pub status: EnvelopeStatus,
    pub message: String,
    #[schema(value_type = Object)]
    pub data: Value,
    pub status_code: u16,
}

impl ResponseEnvelope {
    /// Creates a success envelope sent with `status`
    pub fn success(message: impl Into<String>, data: Value, status: StatusCode) -> Self {
        Self {
            status: EnvelopeStatus::Success,
            message: message.into(),
            data,
            status_code: status.as_u16(),
        }
    }

    /// Creates an error envelope sent with `status`
    pub fn error(message: impl Into<String>, data: Value, status: StatusCode) -> Self {
        Self {
            status: EnvelopeStatus::Error,
            message: message.into(),
            data,
            status_code: status.as_u16(),
        }
    }

    /// HTTP status carried by the envelope, 500 when the stored code is not a valid status
    pub fn http_status(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for ResponseEnvelope {
    fn into_response(self) -> Response {
        (self.http_status(), Json(self)).into_response()
    }
}
