use chrono::{Duration, NaiveDateTime};

use crate::{
    model::lead::{LeadDto, LeadInput},
    server::model::db::{LeadEmailModel, LeadModel, LeadPhoneModel},
};

/// How long an emailed validation token is accepted
pub const TOKEN_LIFETIME_HOURS: i64 = 72;

/// Lead about to be inserted by the registration saga
///
/// Built explicitly from the validated input so nothing is persisted until the repository
/// writes it inside the saga's transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLead {
    pub crm_id: i64,
    pub name: String,
    pub committee: String,
    pub created_at: NaiveDateTime,
    pub expires_at: NaiveDateTime,
    pub token: String,
    pub emails: Vec<String>,
    pub phones: Vec<String>,
}

impl NewLead {
    pub fn new(input: &LeadInput, crm_id: i64, token: String, now: NaiveDateTime) -> Self {
        Self {
            crm_id,
            name: input.name.clone(),
            committee: input.committee.name.clone(),
            created_at: now,
            expires_at: now + Duration::hours(TOKEN_LIFETIME_HOURS),
            token,
            emails: input.emails.iter().map(|e| e.address.clone()).collect(),
            phones: input.phones.iter().map(|p| p.number.clone()).collect(),
        }
    }
}

/// Lead with its contact rows as written to the database
#[derive(Debug, Clone)]
pub struct LeadRecord {
    pub lead: LeadModel,
    pub emails: Vec<LeadEmailModel>,
    pub phones: Vec<LeadPhoneModel>,
}

impl From<LeadRecord> for LeadDto {
    fn from(record: LeadRecord) -> Self {
        Self {
            id: record.lead.id,
            crm_id: record.lead.crm_id,
            name: record.lead.name,
            committee: record.lead.committee,
            created_at: record.lead.created_at,
            expires_at: record.lead.expires_at,
            emails: record.emails.into_iter().map(|e| e.address).collect(),
            phones: record.phones.into_iter().map(|p| p.number).collect(),
        }
    }
}
