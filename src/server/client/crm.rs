use std::time::Duration;

use axum::http::StatusCode;
use serde_json::Value;

use crate::server::{
    error::{crm::CrmError, Error},
    model::crm::{self, CrmFields, CrmToken, CrmWorkspace},
};

/// Client of the CRM REST API
#[derive(Clone)]
pub struct CrmClient {
    http: reqwest::Client,
    base_url: String,
}

impl CrmClient {
    /// Creates a new instance of [`CrmClient`]
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Authenticates as the workspace app
    ///
    /// # Returns
    /// - `Ok(CrmToken)` - Access token granted by the CRM
    /// - `Err(Error::CrmError)` - CRM answered with anything other than 200
    /// - `Err(Error::HttpError)` - Transport failure or malformed token body
    pub async fn authenticate(&self, workspace: &CrmWorkspace) -> Result<CrmToken, Error> {
        let app_id = workspace.app_id.to_string();
        let form = [
            ("grant_type", "app"),
            ("client_id", workspace.client_id.as_str()),
            ("client_secret", workspace.client_secret.as_str()),
            ("app_id", app_id.as_str()),
            ("app_token", workspace.app_token.as_str()),
        ];

        let response = self
            .http
            .post(format!("{}/oauth/token", self.base_url))
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body: Value = response.json().await.unwrap_or_default();
            let description = body
                .get("error_description")
                .and_then(Value::as_str)
                .unwrap_or("unknown CRM authentication error")
                .to_string();

            return Err(CrmError::AuthenticationFailed {
                status: status.as_u16(),
                description,
            }
            .into());
        }

        Ok(response.json().await?)
    }

    /// Fetches the field layout of an app, returning the body with the status it came with
    pub async fn app_metadata(
        &self,
        token: &CrmToken,
        app_id: i64,
    ) -> Result<(Value, StatusCode), Error> {
        let response = self
            .http
            .get(format!("{}/app/{}", self.base_url, app_id))
            .bearer_auth(&token.access_token)
            .send()
            .await?;

        let status = response.status();
        let body = read_body(response).await?;

        Ok((body, status))
    }

    /// Creates an item in the app
    ///
    /// # Returns
    /// - `Ok((item, Some(app_item_id)))` - Item created
    /// - `Ok((body, None))` - CRM answered without an item id, `body` holds its answer
    pub async fn create_item(
        &self,
        token: &CrmToken,
        app_id: i64,
        fields: &CrmFields,
    ) -> Result<(Value, Option<i64>), Error> {
        let response = self
            .http
            .post(format!("{}/item/app/{}", self.base_url, app_id))
            .bearer_auth(&token.access_token)
            .json(&fields.envelope())
            .send()
            .await?;

        let body = read_body(response).await?;
        let app_item_id = crm::app_item_id(&body);

        Ok((body, app_item_id))
    }

    /// Updates the item described by a previous create response
    ///
    /// Returns the item id that was updated together with the CRM answer.
    pub async fn update_item(
        &self,
        token: &CrmToken,
        item: &Value,
        fields: &CrmFields,
    ) -> Result<(i64, Value), Error> {
        let item_id = require_item_id(item)?;

        let response = self
            .http
            .put(format!("{}/item/{}", self.base_url, item_id))
            .bearer_auth(&token.access_token)
            .json(&fields.envelope())
            .send()
            .await?;

        let status = response.status();
        let body = read_body(response).await?;

        if !status.is_success() {
            return Err(CrmError::UnexpectedStatus {
                operation: "update item",
                status: status.as_u16(),
                body: body.to_string(),
            }
            .into());
        }

        Ok((item_id, body))
    }

    /// Deletes the item described by a previous create response
    ///
    /// Returns `true` only when the CRM confirms the deletion with 204.
    pub async fn delete_item(&self, token: &CrmToken, item: &Value) -> Result<bool, Error> {
        let item_id = require_item_id(item)?;

        let response = self
            .http
            .delete(format!("{}/item/{}", self.base_url, item_id))
            .bearer_auth(&token.access_token)
            .send()
            .await?;

        Ok(response.status() == StatusCode::NO_CONTENT)
    }
}

fn require_item_id(item: &Value) -> Result<i64, Error> {
    crm::item_id(item).ok_or_else(|| CrmError::MissingItemId(item.to_string()).into())
}

/// Reads a response body as JSON, keeping non-JSON bodies as a string value
async fn read_body(response: reqwest::Response) -> Result<Value, Error> {
    let text = response.text().await?;
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }

    Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)))
}
