//! Cached access to CRM tokens and app metadata.

use axum::http::StatusCode;
use serde_json::Value;

use crate::server::{
    client::crm::CrmClient,
    error::Error,
    model::crm::{CrmToken, CrmWorkspace},
    service::cache::TtlCache,
};

pub struct CrmTokenService<'a> {
    crm_client: &'a CrmClient,
    cache: &'a TtlCache<CrmToken>,
}

impl<'a> CrmTokenService<'a> {
    /// Creates a new instance of [`CrmTokenService`]
    pub fn new(crm_client: &'a CrmClient, cache: &'a TtlCache<CrmToken>) -> Self {
        Self { crm_client, cache }
    }

    /// Returns the workspace access token, authenticating only when the cached one is stale
    ///
    /// Failed authentications are returned as errors and never cached.
    pub async fn access_token(&self, workspace: &CrmWorkspace) -> Result<CrmToken, Error> {
        let (token, _) = self
            .cache
            .get_or_set(&workspace.cache_key, move || async move {
                let token = self.crm_client.authenticate(workspace).await?;

                Ok::<_, Error>((token, StatusCode::OK))
            })
            .await?;

        Ok(token)
    }
}

pub struct CrmMetadataService<'a> {
    tokens: CrmTokenService<'a>,
    crm_client: &'a CrmClient,
    cache: &'a TtlCache<Value>,
}

impl<'a> CrmMetadataService<'a> {
    /// Creates a new instance of [`CrmMetadataService`]
    pub fn new(
        crm_client: &'a CrmClient,
        token_cache: &'a TtlCache<CrmToken>,
        cache: &'a TtlCache<Value>,
    ) -> Self {
        Self {
            tokens: CrmTokenService::new(crm_client, token_cache),
            crm_client,
            cache,
        }
    }

    /// Gets the app metadata of a workspace through the cache
    ///
    /// # Returns
    /// - `Ok((metadata, 200))` - Served from a fresh cache entry
    /// - `Ok((body, status))` - Fetched now, with the status the CRM answered
    /// - `Err(Error)` - Authentication or transport failure
    pub async fn get(&self, workspace: &CrmWorkspace) -> Result<(Value, StatusCode), Error> {
        self.cache
            .get_or_set(&workspace.cache_key, move || async move {
                let token = self.tokens.access_token(workspace).await?;

                self.crm_client.app_metadata(&token, workspace.app_id).await
            })
            .await
    }
}
