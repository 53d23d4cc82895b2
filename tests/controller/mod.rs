//! Tests for HTTP controller endpoints.
//!
//! This module contains integration tests for the application's HTTP controllers, sent through
//! the full router so the request guard runs in front of every handler.

mod guard;
mod metadata;
mod selection;

use axum::{
    body::{to_bytes, Body},
    http::Request,
    response::Response,
    Router,
};
use intake::server::{model::app::AppState, router};
use intake_test_utils::prelude::*;
use serde_json::Value;

use crate::util::TestContextExt;

/// Router with its state, as served by the binary
fn app(state: AppState) -> Router {
    router::routes(state.clone()).with_state(state)
}

/// Request from the allowed domain
fn trusted_request(method: &str, uri: &str, body: Body) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("host", TEST_ALLOWED_DOMAIN)
        .header("content-type", "application/json")
        .body(body)
        .unwrap()
}

async fn json_body(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    serde_json::from_slice(&bytes).unwrap()
}
