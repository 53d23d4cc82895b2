//! Lead registration across the CRM, the local database and the email trigger.
//!
//! The steps run strictly in order:
//! 1. Create the CRM item (token served by the TTL cache)
//! 2. Insert the lead in an open, uncommitted local transaction
//! 3. Move the CRM item to the "fit sent" status
//! 4. Trigger the validation email
//! 5. Commit the local transaction
//!
//! A CRM answer without an item id ends the registration with 502 before anything else is
//! written. Any failure after the item exists rolls back the transaction and deletes the item.

use axum::http::StatusCode;
use chrono::{NaiveDateTime, Utc};
use dioxus_logger::tracing;
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};

use crate::{
    model::{
        api::ResponseEnvelope,
        lead::{LeadInput, RegistrationDto},
    },
    server::{
        client::{
            crm::CrmClient,
            email::{EmailClient, EmailTrigger},
        },
        config::Config,
        data::lead::LeadRepository,
        error::Error,
        model::{
            app::AppState,
            crm::{CrmFields, CrmToken, FIT_SENT_STATUS},
            lead::{LeadRecord, NewLead},
        },
        service::{cache::TtlCache, crm::CrmTokenService, lead::saga::RegistrationSaga},
        util::{token::generate_token, url::validation_url},
    },
};

/// Result of a registration that did not raise an error
#[derive(Debug)]
pub enum Registration {
    Created(RegistrationDto),
    /// CRM answered without an item id, nothing was written anywhere
    CrmRejected(Value),
}

pub struct LeadRegistrationService<'a> {
    db: &'a DatabaseConnection,
    config: &'a Config,
    crm_client: &'a CrmClient,
    email_client: &'a EmailClient,
    token_cache: &'a TtlCache<CrmToken>,
}

impl<'a> LeadRegistrationService<'a> {
    /// Creates a new instance of [`LeadRegistrationService`]
    pub fn new(state: &'a AppState) -> Self {
        Self {
            db: &state.db,
            config: &state.config,
            crm_client: &state.crm_client,
            email_client: &state.email_client,
            token_cache: &state.token_cache,
        }
    }

    /// Registers a validated application and builds the response envelope
    ///
    /// # Returns
    /// - `201` - Lead committed locally, CRM item created and advanced, email triggered
    /// - `502` - CRM did not return an item id
    /// - `500` - Any other failure, after compensation ran
    pub async fn register(&self, input: &LeadInput) -> (StatusCode, ResponseEnvelope) {
        match self.run(input, Utc::now().naive_utc()).await {
            Ok(Registration::Created(registration)) => created(&registration),
            Ok(Registration::CrmRejected(crm_response)) => (
                StatusCode::BAD_GATEWAY,
                ResponseEnvelope::error(
                    "Failed to create the lead in the CRM",
                    crm_response,
                    StatusCode::BAD_GATEWAY,
                ),
            ),
            Err(e) => {
                tracing::error!("Lead registration failed: {}", e);

                failed(e.to_string())
            }
        }
    }

    /// Runs the registration steps with `now` as the registration time
    pub async fn run(&self, input: &LeadInput, now: NaiveDateTime) -> Result<Registration, Error> {
        let workspace = &self.config.selection_workspace;

        let crm_token = CrmTokenService::new(self.crm_client, self.token_cache)
            .access_token(workspace)
            .await?;

        let fields = CrmFields::from_lead(input);
        let (crm_item, app_item_id) = self
            .crm_client
            .create_item(&crm_token, workspace.app_id, &fields)
            .await?;

        let Some(crm_id) = app_item_id else {
            tracing::warn!("CRM create item response did not contain an item id");

            return Ok(Registration::CrmRejected(crm_item));
        };

        tracing::info!(crm_id = crm_id, "Created CRM item for lead");

        let mut saga = RegistrationSaga::new(self.crm_client, crm_token);
        saga.record_crm_item(crm_item, crm_id);

        match self.complete(&mut saga, input, crm_id, now).await {
            Ok(record) => {
                tracing::info!(crm_id = crm_id, lead_id = record.lead.id, "Lead registered");

                Ok(Registration::Created(RegistrationDto {
                    database: record.into(),
                    crm: fields.envelope(),
                }))
            }
            Err(e) => {
                tracing::warn!(crm_id = crm_id, "Compensating failed lead registration: {}", e);
                saga.compensate().await;

                Err(e)
            }
        }
    }

    /// Steps following the CRM item creation, all compensated on failure
    async fn complete(
        &self,
        saga: &mut RegistrationSaga<'_>,
        input: &LeadInput,
        crm_id: i64,
        now: NaiveDateTime,
    ) -> Result<LeadRecord, Error> {
        saga.begin(self.db).await?;

        let new_lead = NewLead::new(input, crm_id, generate_token(), now);
        let record = LeadRepository::new(saga.transaction()?)
            .create(new_lead)
            .await?;

        self.crm_client
            .update_item(
                saga.crm_token(),
                saga.crm_item()?,
                &CrmFields::stage(FIT_SENT_STATUS),
            )
            .await?;

        let trigger = EmailTrigger {
            url: validation_url(
                &self.config.public_url,
                crm_id,
                &record.lead.name,
                &record.lead.token,
            ),
            emails: record.emails.iter().map(|e| e.address.clone()).collect(),
            name: record.lead.name.clone(),
        };
        self.email_client.send(&trigger).await?;

        saga.commit().await?;

        Ok(record)
    }
}

/// 201 envelope carrying the registration, 500 if it cannot be serialized
fn created(registration: &RegistrationDto) -> (StatusCode, ResponseEnvelope) {
    match serde_json::to_value(registration) {
        Ok(data) => (
            StatusCode::CREATED,
            ResponseEnvelope::success("Lead registered successfully", data, StatusCode::CREATED),
        ),
        Err(e) => {
            tracing::error!("Failed to serialize registered lead: {}", e);

            failed(e.to_string())
        }
    }
}

fn failed(reason: String) -> (StatusCode, ResponseEnvelope) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        ResponseEnvelope::error(
            "Failed to register lead",
            json!(reason),
            StatusCode::INTERNAL_SERVER_ERROR,
        ),
    )
}
