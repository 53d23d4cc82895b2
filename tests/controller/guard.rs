//! Tests for the trusted origin guard in front of every route.

use axum::{body::Body, http::StatusCode};
use tower::ServiceExt;

use super::*;

const METADATA: &str = "/api/v1/selection-process/metadata";

/// Expect 401 "Unauthorized domain" for requests from an unlisted host
#[tokio::test]
async fn rejects_unlisted_host() -> Result<(), TestError> {
    let test = TestBuilder::new().with_crm_auth_endpoint(0).build().await?;

    let request = Request::builder()
        .uri(METADATA)
        .header("host", "evil.example.org")
        .body(Body::empty())
        .unwrap();
    let response = app(test.into_app_state()).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let envelope = json_body(response).await;
    assert_eq!(envelope["message"], "Unauthorized domain");

    test.assert_mocks();

    Ok(())
}

/// Expect 401 "Invalid API key" for an unknown key, even from the allowed host
#[tokio::test]
async fn rejects_unknown_api_key() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;

    let request = Request::builder()
        .uri(METADATA)
        .header("host", TEST_ALLOWED_DOMAIN)
        .header("x-api-key", "not-a-key")
        .body(Body::empty())
        .unwrap();
    let response = app(test.into_app_state()).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let envelope = json_body(response).await;
    assert_eq!(envelope["message"], "Invalid API key");

    Ok(())
}

/// Expect direct browser navigation to be rejected in production
#[tokio::test]
async fn rejects_navigation_in_production() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;

    let request = Request::builder()
        .uri(METADATA)
        .header("host", TEST_ALLOWED_DOMAIN)
        .header("sec-fetch-mode", "navigate")
        .body(Body::empty())
        .unwrap();
    let response = app(test.into_production_app_state())
        .oneshot(request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let envelope = json_body(response).await;
    assert_eq!(envelope["message"], "Direct requests are not allowed");

    Ok(())
}

/// Expect a known API key not to allow direct browser navigation in production
#[tokio::test]
async fn rejects_navigation_with_api_key_in_production() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;

    let request = Request::builder()
        .uri(METADATA)
        .header("host", TEST_ALLOWED_DOMAIN)
        .header("x-api-key", TEST_API_KEY)
        .header("sec-fetch-mode", "navigate")
        .body(Body::empty())
        .unwrap();
    let response = app(test.into_production_app_state())
        .oneshot(request)
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let envelope = json_body(response).await;
    assert_eq!(envelope["message"], "Direct requests are not allowed");

    Ok(())
}

/// Expect the cache policy header on served and rejected responses alike
#[tokio::test]
async fn sets_cache_control_on_every_response() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;

    let served = Request::builder()
        .uri("/api/docs/openapi.json")
        .body(Body::empty())
        .unwrap();
    let rejected = Request::builder()
        .uri(METADATA)
        .header("host", "evil.example.org")
        .body(Body::empty())
        .unwrap();

    let served = app(test.into_app_state()).oneshot(served).await.unwrap();
    let rejected = app(test.into_app_state()).oneshot(rejected).await.unwrap();

    assert_eq!(served.status(), StatusCode::OK);
    assert_eq!(rejected.status(), StatusCode::UNAUTHORIZED);
    for response in [served, rejected] {
        assert_eq!(
            response.headers()["cache-control"],
            "public, max-age=7200, must-revalidate"
        );
    }

    Ok(())
}

/// Expect the OpenAPI document to be public in development only
#[tokio::test]
async fn exposes_docs_outside_production() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;

    let request = || {
        Request::builder()
            .uri("/api/docs/openapi.json")
            .body(Body::empty())
            .unwrap()
    };

    let development = app(test.into_app_state()).oneshot(request()).await.unwrap();
    let production = app(test.into_production_app_state())
        .oneshot(request())
        .await
        .unwrap();

    assert_eq!(development.status(), StatusCode::OK);
    assert_eq!(production.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

/// Expect CORS preflight requests to pass the guard
#[tokio::test]
async fn passes_preflight_requests() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/api/v1/selection-process/applications")
        .header("host", "evil.example.org")
        .body(Body::empty())
        .unwrap();
    let response = app(test.into_app_state()).oneshot(request).await.unwrap();

    assert_ne!(response.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}
