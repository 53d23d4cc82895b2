use std::time::Duration;

use dioxus_logger::tracing;
use serde::Serialize;

use crate::server::error::{email::EmailError, Error};

/// Body of the email trigger script
#[derive(Debug, Clone, Serialize)]
pub struct EmailTrigger {
    /// Validation link the lead has to open
    pub url: String,
    pub emails: Vec<String>,
    #[serde(rename = "nome")]
    pub name: String,
}

/// Client of the deployed email trigger script
#[derive(Clone)]
pub struct EmailClient {
    http: reqwest::Client,
    endpoint: String,
}

impl EmailClient {
    /// Creates a new instance of [`EmailClient`] posting to `{base_url}/macros/s/{script_id}/exec`
    pub fn new(base_url: &str, script_id: &str, timeout: Duration) -> Result<Self, Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            endpoint: format!(
                "{}/macros/s/{}/exec",
                base_url.trim_end_matches('/'),
                script_id
            ),
        })
    }

    /// Triggers the validation email, any non-2xx response is an error
    pub async fn send(&self, trigger: &EmailTrigger) -> Result<(), Error> {
        let response = self.http.post(&self.endpoint).json(trigger).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();

            return Err(EmailError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        tracing::debug!(recipients = trigger.emails.len(), "Validation email triggered");

        Ok(())
    }
}
