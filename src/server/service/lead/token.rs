use std::fmt;

use chrono::NaiveDateTime;
use dioxus_logger::tracing;
use sea_orm::DatabaseConnection;

use crate::server::{data::lead::LeadRepository, error::Error, util::url::fit_survey_url};

/// Reason an emailed token was not accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenRejection {
    /// No lead holds the token
    Invalid,
    /// The token belongs to a lead with another CRM id
    NotOwned,
    /// The token's lifetime has passed
    Expired,
}

impl TokenRejection {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Invalid => "invalid token",
            Self::NotOwned => "token does not belong to this id",
            Self::Expired => "token expired",
        }
    }
}

impl fmt::Display for TokenRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenOutcome {
    /// Token accepted, redirect the lead to this survey URL
    Redirect(String),
    Rejected(TokenRejection),
}

pub struct TokenValidationService<'a> {
    db: &'a DatabaseConnection,
    survey_url: &'a str,
}

impl<'a> TokenValidationService<'a> {
    /// Creates a new instance of [`TokenValidationService`]
    pub fn new(db: &'a DatabaseConnection, survey_url: &'a str) -> Self {
        Self { db, survey_url }
    }

    /// Checks a token emailed to the lead with `crm_id`
    ///
    /// The token must exist, belong to `crm_id` and `now` must not be past its expiration.
    /// A lead without a stored expiration is treated as expired.
    pub async fn validate(
        &self,
        crm_id: i64,
        name: &str,
        token: &str,
        now: NaiveDateTime,
    ) -> Result<TokenOutcome, Error> {
        let lead_repo = LeadRepository::new(self.db);

        if lead_repo.find_by_token(token).await?.is_none() {
            return Ok(TokenOutcome::Rejected(TokenRejection::Invalid));
        }

        if lead_repo
            .find_by_crm_id_and_token(crm_id, token)
            .await?
            .is_none()
        {
            tracing::debug!(crm_id = crm_id, "Token presented for another lead");

            return Ok(TokenOutcome::Rejected(TokenRejection::NotOwned));
        }

        match lead_repo.find_expiration(crm_id).await? {
            Some(expires_at) if now <= expires_at => Ok(TokenOutcome::Redirect(fit_survey_url(
                self.survey_url,
                crm_id,
                name,
            ))),
            _ => Ok(TokenOutcome::Rejected(TokenRejection::Expired)),
        }
    }
}
