use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Format used for birth dates on the wire and in CRM payloads
pub const BIRTH_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Application submitted to the selection process
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeadInput {
    /// Full name of the applicant
    pub name: String,
    /// Accepts `YYYY-MM-DD HH:MM:SS` or `YYYY-MM-DD`
    #[serde(
        serialize_with = "serialize_birth_date",
        deserialize_with = "deserialize_birth_date"
    )]
    #[schema(value_type = String, example = "2001-04-12")]
    pub birth_date: NaiveDateTime,
    pub emails: Vec<ContactEmail>,
    pub phones: Vec<ContactPhone>,
    /// Nearest local committee chosen by the applicant
    pub committee: Committee,
    /// CRM option id of the communication consent the applicant agreed to
    pub authorization_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ContactEmail {
    #[serde(rename = "type", default = "default_contact_kind")]
    pub kind: String,
    pub address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ContactPhone {
    #[serde(rename = "type", default = "default_contact_kind")]
    pub kind: String,
    pub number: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Committee {
    /// CRM option id of the committee
    pub id: i64,
    pub name: String,
}

/// Lead as stored in the local database
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct LeadDto {
    pub id: i32,
    pub crm_id: i64,
    pub name: String,
    pub committee: String,
    pub created_at: NaiveDateTime,
    pub expires_at: NaiveDateTime,
    pub emails: Vec<String>,
    pub phones: Vec<String>,
}

/// Payload of a successful registration
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct RegistrationDto {
    /// Lead committed to the local database
    pub database: LeadDto,
    /// Fields sent to the CRM when creating the item
    #[schema(value_type = Object)]
    pub crm: Value,
}

/// Query parameters of the emailed validation link
#[derive(Debug, Clone, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ValidateTokenParams {
    /// CRM item id of the lead
    pub id: i64,
    pub name: String,
    pub token: String,
}

fn default_contact_kind() -> String {
    "other".to_string()
}

/// Parses a birth date, falling back to a date without time of day
pub fn parse_birth_date(value: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    let value = value.trim();

    NaiveDateTime::parse_from_str(value, BIRTH_DATE_FORMAT).or_else(|_| {
        NaiveDate::parse_from_str(value, "%Y-%m-%d").map(|date| date.and_time(Default::default()))
    })
}

fn serialize_birth_date<S: Serializer>(
    value: &NaiveDateTime,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&value.format(BIRTH_DATE_FORMAT).to_string())
}

fn deserialize_birth_date<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<NaiveDateTime, D::Error> {
    let value = String::deserialize(deserializer)?;

    parse_birth_date(&value).map_err(serde::de::Error::custom)
}
