//! Tests for LeadRegistrationService::register.
//!
//! These tests verify the registration steps run in order against the mock CRM and email
//! trigger, that a successful registration commits exactly one lead, and that every failure
//! after the CRM item exists rolls the local insert back and deletes the item exactly once.

use axum::http::StatusCode;
use chrono::Duration;
use intake::{model::api::EnvelopeStatus, server::service::lead::registration::LeadRegistrationService};
use sea_orm::{EntityTrait, PaginatorTrait};

use super::*;
use crate::util::valid_lead;

const ITEM_ID: i64 = 9001;
const APP_ITEM_ID: i64 = 17;

/// Expect 201 with the committed lead and the CRM fields when every step succeeds
#[tokio::test]
async fn registers_lead() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_lead_tables()
        .with_crm_auth_endpoint(1)
        .with_email_endpoint(200, 1)
        .build()
        .await?;
    let create = test.crm().create_item_endpoint(ITEM_ID, APP_ITEM_ID, 1);
    let update = test.crm().create_update_endpoint(ITEM_ID, 200, 1);
    let delete = test.crm().create_delete_endpoint(ITEM_ID, 204, 0);

    let state = test.into_app_state();
    let (status, envelope) = LeadRegistrationService::new(&state)
        .register(&valid_lead())
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(envelope.status, EnvelopeStatus::Success);
    assert_eq!(envelope.status_code, 201);
    assert_eq!(envelope.data["database"]["crm_id"], APP_ITEM_ID);
    assert_eq!(envelope.data["crm"]["fields"]["titulo"], "Maria Silva");
    assert!(envelope.data["database"].get("token").is_none());

    let leads = entity::prelude::Lead::find().all(&test.db).await?;
    assert_eq!(leads.len(), 1);
    assert_eq!(leads[0].crm_id, APP_ITEM_ID);
    assert_eq!(leads[0].token.len(), 86);
    assert_eq!(leads[0].expires_at - leads[0].created_at, Duration::hours(72));
    assert_eq!(entity::prelude::LeadEmail::find().count(&test.db).await?, 1);
    assert_eq!(entity::prelude::LeadPhone::find().count(&test.db).await?, 1);

    test.assert_mocks();
    create.assert();
    update.assert();
    delete.assert();

    Ok(())
}

/// Expect 502 without compensation when the CRM answers without an item id
#[tokio::test]
async fn rejects_crm_response_without_item_id() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_lead_tables()
        .with_crm_auth_endpoint(1)
        .with_email_endpoint(200, 0)
        .build()
        .await?;
    let create = test.crm().create_item_endpoint_without_id(400, 1);
    let delete = test.crm().create_delete_endpoint(ITEM_ID, 204, 0);

    let state = test.into_app_state();
    let (status, envelope) = LeadRegistrationService::new(&state)
        .register(&valid_lead())
        .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(envelope.status, EnvelopeStatus::Error);
    assert_eq!(envelope.data["error"], "invalid_value");
    assert_eq!(entity::prelude::Lead::find().count(&test.db).await?, 0);

    test.assert_mocks();
    create.assert();
    delete.assert();

    Ok(())
}

/// Expect rollback and a single CRM delete when the email trigger fails
#[tokio::test]
async fn compensates_when_email_fails() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_lead_tables()
        .with_crm_auth_endpoint(1)
        .with_email_endpoint(500, 1)
        .build()
        .await?;
    let create = test.crm().create_item_endpoint(ITEM_ID, APP_ITEM_ID, 1);
    let update = test.crm().create_update_endpoint(ITEM_ID, 200, 1);
    let delete = test.crm().create_delete_endpoint(ITEM_ID, 204, 1);

    let state = test.into_app_state();
    let (status, envelope) = LeadRegistrationService::new(&state)
        .register(&valid_lead())
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(envelope.status, EnvelopeStatus::Error);
    assert_eq!(envelope.status_code, 500);
    assert!(envelope.data.is_string());
    assert_eq!(entity::prelude::Lead::find().count(&test.db).await?, 0);
    assert_eq!(entity::prelude::LeadEmail::find().count(&test.db).await?, 0);

    test.assert_mocks();
    create.assert();
    update.assert();
    delete.assert();

    Ok(())
}

/// Expect rollback and a single CRM delete when the status update fails, without sending email
#[tokio::test]
async fn compensates_when_status_update_fails() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_lead_tables()
        .with_crm_auth_endpoint(1)
        .with_email_endpoint(200, 0)
        .build()
        .await?;
    let create = test.crm().create_item_endpoint(ITEM_ID, APP_ITEM_ID, 1);
    let update = test.crm().create_update_endpoint(ITEM_ID, 500, 1);
    let delete = test.crm().create_delete_endpoint(ITEM_ID, 204, 1);

    let state = test.into_app_state();
    let (status, _) = LeadRegistrationService::new(&state)
        .register(&valid_lead())
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(entity::prelude::Lead::find().count(&test.db).await?, 0);

    test.assert_mocks();
    create.assert();
    update.assert();
    delete.assert();

    Ok(())
}

/// Expect the CRM item to be deleted when the local insert fails
#[tokio::test]
async fn compensates_when_insert_fails() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_crm_auth_endpoint(1)
        .with_email_endpoint(200, 0)
        .build()
        .await?;
    let create = test.crm().create_item_endpoint(ITEM_ID, APP_ITEM_ID, 1);
    let update = test.crm().create_update_endpoint(ITEM_ID, 200, 0);
    let delete = test.crm().create_delete_endpoint(ITEM_ID, 204, 1);

    let state = test.into_app_state();
    let (status, _) = LeadRegistrationService::new(&state)
        .register(&valid_lead())
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    test.assert_mocks();
    create.assert();
    update.assert();
    delete.assert();

    Ok(())
}

/// Expect the original failure to be reported even when the compensating delete fails
#[tokio::test]
async fn reports_failure_when_crm_delete_fails() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_lead_tables()
        .with_crm_auth_endpoint(1)
        .with_email_endpoint(500, 1)
        .build()
        .await?;
    let create = test.crm().create_item_endpoint(ITEM_ID, APP_ITEM_ID, 1);
    let update = test.crm().create_update_endpoint(ITEM_ID, 200, 1);
    let delete = test.crm().create_delete_endpoint(ITEM_ID, 500, 1);

    let state = test.into_app_state();
    let (status, envelope) = LeadRegistrationService::new(&state)
        .register(&valid_lead())
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(envelope.data.as_str().unwrap_or_default().contains("500"));
    assert_eq!(entity::prelude::Lead::find().count(&test.db).await?, 0);

    create.assert();
    update.assert();
    delete.assert();

    Ok(())
}

/// Expect 500 before anything is written when CRM authentication fails
#[tokio::test]
async fn fails_when_crm_authentication_fails() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_lead_tables().build().await?;
    let auth = test.crm().create_auth_endpoint_error(401, 1);
    let create = test.crm().create_item_endpoint(ITEM_ID, APP_ITEM_ID, 0);

    let state = test.into_app_state();
    let (status, envelope) = LeadRegistrationService::new(&state)
        .register(&valid_lead())
        .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(envelope
        .data
        .as_str()
        .unwrap_or_default()
        .contains("Invalid app token"));
    assert_eq!(entity::prelude::Lead::find().count(&test.db).await?, 0);

    auth.assert();
    create.assert();

    Ok(())
}
