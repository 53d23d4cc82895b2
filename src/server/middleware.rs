//! Request guard restricting the API to trusted origins and API keys, and the access log.
//!
//! Browser traffic is accepted only from the configured domains, while server-to-server
//! callers present an `X-API-KEY`. The emailed token validation link is public.

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use dioxus_logger::tracing;
use serde_json::Value;

use crate::{
    model::api::ResponseEnvelope,
    server::{config::Config, model::app::AppState, util::url::VALIDATE_TOKEN_PATH},
};

pub static API_KEY_HEADER: &str = "x-api-key";
pub static SEC_FETCH_MODE_HEADER: &str = "sec-fetch-mode";
pub static DOCS_PATH: &str = "/api/docs";
pub static FORWARDED_FOR_HEADER: &str = "x-forwarded-for";
pub static CACHE_CONTROL_POLICY: &str = "public, max-age=7200, must-revalidate";

/// Writes one access log line per request and sets the response cache policy
///
/// The line carries the client address, method, path, protocol and final status, rejected
/// requests included.
pub async fn log_request(request: Request, next: Next) -> Response {
    let client = client_address(&request);
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let version = request.version();

    let mut response = next.run(request).await;

    tracing::info!(
        "{} \"{} {} {:?}\" {}",
        client,
        method,
        path,
        version,
        response.status().as_u16()
    );

    response.headers_mut().insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static(CACHE_CONTROL_POLICY),
    );

    response
}

/// First `X-Forwarded-For` hop, else the peer address, else `-`
fn client_address(request: &Request) -> String {
    let forwarded = request
        .headers()
        .get(FORWARDED_FOR_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty());

    if let Some(forwarded) = forwarded {
        return forwarded.to_string();
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map_or_else(|| "-".to_string(), |ConnectInfo(addr)| addr.ip().to_string())
}

/// Rejects requests that neither come from an allowed domain nor carry a known API key
///
/// # Responses
/// - 401 (Unauthorized): Unknown API key, untrusted host, direct navigation in production or
///   API docs requested in production without a key
pub async fn require_trusted_origin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let checked = check_request(
        &state.config,
        request.method(),
        request.uri().path(),
        request.headers(),
    );

    match checked {
        Ok(()) => next.run(request).await,
        Err(message) => {
            tracing::debug!(path = %request.uri().path(), "Rejected request: {}", message);

            ResponseEnvelope::error(message, Value::Null, StatusCode::UNAUTHORIZED).into_response()
        }
    }
}

/// Decides whether a request may pass, returning the rejection message otherwise
fn check_request(
    config: &Config,
    method: &Method,
    path: &str,
    headers: &HeaderMap,
) -> Result<(), &'static str> {
    if method == Method::OPTIONS || path == VALIDATE_TOKEN_PATH {
        return Ok(());
    }

    let has_known_key = match headers.get(API_KEY_HEADER) {
        Some(api_key) => {
            let api_key = api_key.to_str().unwrap_or_default();
            if !config.api_keys.iter().any(|key| key == api_key) {
                return Err("Invalid API key");
            }

            true
        }
        None => false,
    };

    if path.starts_with(DOCS_PATH) {
        return if config.is_production() && !has_known_key {
            Err("API key required")
        } else {
            Ok(())
        };
    }

    // A known key stands in for the host allow list only
    if !has_known_key {
        let host = headers
            .get(header::HOST)
            .and_then(|value| value.to_str().ok())
            .map(strip_port)
            .unwrap_or_default();

        if !config
            .allowed_domains
            .iter()
            .any(|domain| domain.eq_ignore_ascii_case(host))
        {
            return Err("Unauthorized domain");
        }
    }

    let navigating = headers
        .get(SEC_FETCH_MODE_HEADER)
        .is_some_and(|mode| mode == "navigate");

    if config.is_production() && navigating {
        return Err("Direct requests are not allowed");
    }

    Ok(())
}

fn strip_port(host: &str) -> &str {
    host.rsplit_once(':')
        .filter(|(_, port)| port.chars().all(|c| c.is_ascii_digit()))
        .map_or(host, |(name, _)| name)
}
