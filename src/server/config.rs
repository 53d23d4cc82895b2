//! Environment-driven configuration.

use std::time::Duration;

use crate::server::{error::config::ConfigError, model::crm::CrmWorkspace};

static DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:5000";
static DEFAULT_CRM_URL: &str = "https://api.podio.com";
static DEFAULT_EMAIL_URL: &str = "https://script.google.com";
static DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Cache key of the selection process workspace
pub static SELECTION_CACHE_KEY: &str = "selection";
/// Cache key of the B2C exchange workspace
pub static B2C_CACHE_KEY: &str = "b2c";

/// Deployment environment, controls how strict the request guard is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Production,
    Development,
}

impl Environment {
    fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            "development" | "dev" | "test" | "testing" => Ok(Self::Development),
            other => Err(ConfigError::InvalidEnvValue {
                var: "APP_ENV".to_string(),
                reason: format!("unknown environment '{}'", other),
            }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub environment: Environment,
    pub bind_address: String,
    pub log_level: String,
    pub database_url: String,
    /// Base URL of this service, used to build the emailed validation link
    pub public_url: String,
    /// Survey the lead is redirected to once their token is validated
    pub fit_survey_url: String,
    pub allowed_domains: Vec<String>,
    pub api_keys: Vec<String>,
    pub cache_ttl: Duration,
    /// Whether non-2xx fetch results are stored by the TTL caches
    pub cache_non_success: bool,
    pub http_timeout: Duration,
    pub crm_url: String,
    pub email_url: String,
    pub email_script_id: String,
    pub selection_workspace: CrmWorkspace,
    pub b2c_workspace: CrmWorkspace,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from any variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars { lookup };

        Ok(Self {
            environment: Environment::parse(&vars.required("APP_ENV")?)?,
            bind_address: vars.or("BIND_ADDRESS", DEFAULT_BIND_ADDRESS),
            log_level: vars.or("LOG_LEVEL", "info"),
            database_url: vars.required("DATABASE_URL")?,
            public_url: trim_url(vars.required("PUBLIC_URL")?),
            fit_survey_url: vars.required("FIT_SURVEY_URL")?,
            allowed_domains: split_list(&vars.required("ALLOWED_DOMAINS")?),
            api_keys: split_list(&vars.required("API_KEYS")?),
            cache_ttl: Duration::from_secs(vars.parsed("CACHE_TTL", None)?),
            cache_non_success: vars.parsed("CACHE_NON_SUCCESS", Some(true))?,
            http_timeout: Duration::from_secs(
                vars.parsed("HTTP_TIMEOUT_SECS", Some(DEFAULT_HTTP_TIMEOUT_SECS))?,
            ),
            crm_url: trim_url(vars.or("PODIO_API_URL", DEFAULT_CRM_URL)),
            email_url: trim_url(vars.or("APPS_SCRIPT_URL", DEFAULT_EMAIL_URL)),
            email_script_id: vars.required("APPS_SCRIPT_EMAIL_ID")?,
            selection_workspace: vars.workspace("SELECTION", SELECTION_CACHE_KEY)?,
            b2c_workspace: vars.workspace("B2C", B2C_CACHE_KEY)?,
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }
}

struct Vars<F> {
    lookup: F,
}

impl<F> Vars<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, name: &str) -> Option<String> {
        (self.lookup)(name).filter(|value| !value.trim().is_empty())
    }

    fn required(&self, name: &str) -> Result<String, ConfigError> {
        self.get(name)
            .ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
    }

    fn or(&self, name: &str, default: &str) -> String {
        self.get(name).unwrap_or_else(|| default.to_string())
    }

    fn parsed<T>(&self, name: &str, default: Option<T>) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        match (self.get(name), default) {
            (Some(value), _) => {
                value
                    .trim()
                    .parse()
                    .map_err(|e: T::Err| ConfigError::InvalidEnvValue {
                        var: name.to_string(),
                        reason: e.to_string(),
                    })
            }
            (None, Some(default)) => Ok(default),
            (None, None) => Err(ConfigError::MissingEnvVar(name.to_string())),
        }
    }

    fn workspace(&self, prefix: &str, cache_key: &str) -> Result<CrmWorkspace, ConfigError> {
        Ok(CrmWorkspace {
            cache_key: cache_key.to_string(),
            client_id: self.required(&format!("{}_CLIENT_ID", prefix))?,
            client_secret: self.required(&format!("{}_CLIENT_SECRET", prefix))?,
            app_id: self.parsed(&format!("{}_APP_ID", prefix), None)?,
            app_token: self.required(&format!("{}_APP_TOKEN", prefix))?,
        })
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn trim_url(value: String) -> String {
    value.trim().trim_end_matches('/').to_string()
}
