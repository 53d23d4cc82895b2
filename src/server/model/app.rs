use std::sync::Arc;

use sea_orm::DatabaseConnection;
use serde_json::Value;

use crate::server::{
    client::{crm::CrmClient, email::EmailClient},
    config::Config,
    error::Error,
    model::crm::CrmToken,
    service::cache::TtlCache,
};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Arc<Config>,
    pub crm_client: CrmClient,
    pub email_client: EmailClient,
    /// CRM access tokens keyed by workspace
    pub token_cache: Arc<TtlCache<CrmToken>>,
    /// CRM app metadata keyed by workspace
    pub metadata_cache: Arc<TtlCache<Value>>,
}

impl AppState {
    /// Builds the HTTP clients and caches described by `config`
    pub fn new(db: DatabaseConnection, config: Config) -> Result<Self, Error> {
        let crm_client = CrmClient::new(&config.crm_url, config.http_timeout)?;
        let email_client = EmailClient::new(
            &config.email_url,
            &config.email_script_id,
            config.http_timeout,
        )?;

        let token_cache = TtlCache::new(config.cache_ttl).cache_non_success(config.cache_non_success);
        let metadata_cache =
            TtlCache::new(config.cache_ttl).cache_non_success(config.cache_non_success);

        Ok(Self {
            db,
            config: Arc::new(config),
            crm_client,
            email_client,
            token_cache: Arc::new(token_cache),
            metadata_cache: Arc::new(metadata_cache),
        })
    }
}
