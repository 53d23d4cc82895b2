//! Tests for the CRM metadata endpoints.

use axum::{body::Body, http::StatusCode};
use serde_json::json;
use tower::ServiceExt;

use super::*;

/// Expect the selection process metadata to be fetched once for repeated requests
#[tokio::test]
async fn serves_selection_metadata_from_cache() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_crm_auth_endpoint(1).build().await?;
    let metadata = test.crm().create_metadata_endpoint(
        TEST_APP_ID,
        200,
        json!({ "app_id": TEST_APP_ID }),
        1,
    );

    let app = app(test.into_app_state());
    for _ in 0..2 {
        let request = trusted_request("GET", "/api/v1/selection-process/metadata", Body::empty());
        let response = app.clone().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["app_id"], TEST_APP_ID);
    }

    test.assert_mocks();
    metadata.assert();

    Ok(())
}

/// Expect the B2C metadata to be served for a caller with an API key
#[tokio::test]
async fn serves_b2c_metadata_with_api_key() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_crm_auth_endpoint(1).build().await?;
    let metadata = test.crm().create_metadata_endpoint(
        TEST_B2C_APP_ID,
        200,
        json!({ "app_id": TEST_B2C_APP_ID }),
        1,
    );

    let request = Request::builder()
        .uri("/api/v1/b2c-leads/metadata")
        .header("host", "partner.example.org")
        .header("x-api-key", TEST_API_KEY)
        .body(Body::empty())
        .unwrap();
    let response = app(test.into_app_state()).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await["app_id"], TEST_B2C_APP_ID);

    test.assert_mocks();
    metadata.assert();

    Ok(())
}

/// Expect 502 when the CRM rejects the workspace credentials
#[tokio::test]
async fn fails_when_crm_authentication_fails() -> Result<(), TestError> {
    let mut test = TestBuilder::new().build().await?;
    let auth = test.crm().create_auth_endpoint_error(401, 1);

    let request = trusted_request("GET", "/api/v1/b2c-leads/metadata", Body::empty());
    let response = app(test.into_app_state()).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    auth.assert();

    Ok(())
}
