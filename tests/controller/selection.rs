//! Tests for the selection process application and token validation endpoints.

use axum::{
    body::Body,
    http::{header, StatusCode},
};
use chrono::{Duration, Utc};
use tower::ServiceExt;

use super::*;
use crate::util::valid_lead;

const APPLICATIONS: &str = "/api/v1/selection-process/applications";

fn validate_token_uri(id: i64, name: &str, token: &str) -> String {
    format!(
        "/api/v1/selection-process/validate-token?id={}&name={}&token={}",
        id,
        urlencoding::encode(name),
        token
    )
}

/// Expect 400 with the validation reason for an invalid phone, without calling the CRM
#[tokio::test]
async fn rejects_invalid_application() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_lead_tables()
        .with_crm_auth_endpoint(0)
        .build()
        .await?;

    let mut lead = valid_lead();
    lead.phones[0].number = "1133334444".to_string();
    let body = Body::from(serde_json::to_vec(&lead).unwrap());

    let response = app(test.into_app_state())
        .oneshot(trusted_request("POST", APPLICATIONS, body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let envelope = json_body(response).await;
    assert_eq!(envelope["status"], "error");
    assert_eq!(envelope["message"], "Content validation failed");
    assert_eq!(envelope["status_code"], 400);
    assert!(envelope["data"]
        .as_str()
        .unwrap()
        .contains("Invalid phone number"));

    test.assert_mocks();

    Ok(())
}

/// Expect 400 for an applicant older than the age limit
#[tokio::test]
async fn rejects_applicant_over_age_limit() -> Result<(), TestError> {
    let test = TestBuilder::new().with_lead_tables().build().await?;

    let mut lead = valid_lead();
    lead.birth_date = (Utc::now() - Duration::days(40 * 365)).naive_utc();
    let body = Body::from(serde_json::to_vec(&lead).unwrap());

    let response = app(test.into_app_state())
        .oneshot(trusted_request("POST", APPLICATIONS, body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

/// Expect 201 for a valid application sent through the router
#[tokio::test]
async fn registers_valid_application() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_lead_tables()
        .with_crm_auth_endpoint(1)
        .with_email_endpoint(200, 1)
        .build()
        .await?;
    let create = test.crm().create_item_endpoint(9001, 17, 1);
    let update = test.crm().create_update_endpoint(9001, 200, 1);

    let body = Body::from(serde_json::to_vec(&valid_lead()).unwrap());
    let response = app(test.into_app_state())
        .oneshot(trusted_request("POST", APPLICATIONS, body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let envelope = json_body(response).await;
    assert_eq!(envelope["status"], "success");
    assert_eq!(envelope["data"]["database"]["crm_id"], 17);

    test.assert_mocks();
    create.assert();
    update.assert();

    Ok(())
}

/// Expect a 301 redirect to the survey for a valid token, from any host
#[tokio::test]
async fn redirects_valid_token_to_survey() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_lead_tables().build().await?;
    let expires_at = Utc::now().naive_utc() + Duration::hours(1);
    test.lead().insert_lead(17, "valid-token", expires_at).await?;

    let request = Request::builder()
        .uri(validate_token_uri(17, "Maria Silva", "valid-token"))
        .header("host", "mail-client.example.org")
        .body(Body::empty())
        .unwrap();
    let response = app(test.into_app_state()).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(
        response.headers()[header::LOCATION],
        format!("{}#id=17&name=Maria%20Silva", TEST_FIT_SURVEY_URL).as_str()
    );

    Ok(())
}

/// Expect 401 "token expired" once the expiration has passed
#[tokio::test]
async fn rejects_expired_token() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_lead_tables().build().await?;
    let expires_at = Utc::now().naive_utc() - Duration::seconds(1);
    test.lead().insert_lead(17, "old-token", expires_at).await?;

    let request = Request::builder()
        .uri(validate_token_uri(17, "Maria", "old-token"))
        .body(Body::empty())
        .unwrap();
    let response = app(test.into_app_state()).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let envelope = json_body(response).await;
    assert_eq!(envelope["message"], "token expired");

    Ok(())
}

/// Expect 401 "invalid token" for a token no lead holds
#[tokio::test]
async fn rejects_unknown_token() -> Result<(), TestError> {
    let test = TestBuilder::new().with_lead_tables().build().await?;

    let request = Request::builder()
        .uri(validate_token_uri(17, "Maria", "unknown"))
        .body(Body::empty())
        .unwrap();
    let response = app(test.into_app_state()).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let envelope = json_body(response).await;
    assert_eq!(envelope["message"], "invalid token");

    Ok(())
}

/// Expect 401 when the token belongs to another lead
#[tokio::test]
async fn rejects_token_of_other_lead() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_lead_tables().build().await?;
    let expires_at = Utc::now().naive_utc() + Duration::hours(1);
    test.lead().insert_lead(18, "token-of-18", expires_at).await?;

    let request = Request::builder()
        .uri(validate_token_uri(17, "Maria", "token-of-18"))
        .body(Body::empty())
        .unwrap();
    let response = app(test.into_app_state()).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let envelope = json_body(response).await;
    assert_eq!(envelope["message"], "token does not belong to this id");

    Ok(())
}

/// Expect 500 with the error text when the lead tables are missing
#[tokio::test]
async fn fails_token_validation_on_database_error() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;

    let request = Request::builder()
        .uri(validate_token_uri(17, "Maria", "token"))
        .body(Body::empty())
        .unwrap();
    let response = app(test.into_app_state()).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let envelope = json_body(response).await;
    assert_eq!(envelope["status"], "error");
    assert!(envelope["data"].is_string());

    Ok(())
}
