//! Content validation of submitted applications.

use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use thiserror::Error;

use crate::model::lead::LeadInput;

/// Oldest accepted applicant age in whole years
pub const MAX_AGE: i32 = 31;

/// Phone types accepted by the CRM phone field
pub const PHONE_TYPES: [&str; 7] = [
    "home",
    "main",
    "mobile",
    "other",
    "private_fax",
    "work",
    "work_fax",
];

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-zÀ-ÖØ-öø-ÿ\s]+$").expect("Invalid name regex"));

// Brazilian mobile: area code followed by a 9 digit number starting with 9
static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[1-9][0-9]9\d{8}$").expect("Invalid phone regex"));

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("Invalid email regex"));

#[derive(Error, Debug, PartialEq, Eq)]
pub enum LeadValidationError {
    #[error("Invalid name: only letters and spaces are allowed")]
    InvalidName,
    #[error("Invalid birth date: the date is in the future")]
    BirthDateInFuture,
    #[error("Applicant must be at most {MAX_AGE} years old")]
    AgeLimitExceeded,
    #[error("At least one email address is required")]
    MissingEmail,
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),
    #[error("Invalid phone number: {0}")]
    InvalidPhone(String),
    #[error("Invalid phone type: {0}")]
    InvalidPhoneType(String),
}

/// Checks an application against the content rules of the selection process
///
/// `today` is the current date in UTC.
pub fn validate_lead(input: &LeadInput, today: NaiveDate) -> Result<(), LeadValidationError> {
    let name = input.name.trim();
    if name.is_empty() || !NAME_PATTERN.is_match(name) {
        return Err(LeadValidationError::InvalidName);
    }

    let birth_date = input.birth_date.date();
    if birth_date > today {
        return Err(LeadValidationError::BirthDateInFuture);
    }
    if age_on(birth_date, today) > MAX_AGE {
        return Err(LeadValidationError::AgeLimitExceeded);
    }

    if input.emails.is_empty() {
        return Err(LeadValidationError::MissingEmail);
    }
    for email in &input.emails {
        if !EMAIL_PATTERN.is_match(email.address.trim()) {
            return Err(LeadValidationError::InvalidEmail(email.address.clone()));
        }
    }

    for phone in &input.phones {
        if !PHONE_PATTERN.is_match(&phone.number) {
            return Err(LeadValidationError::InvalidPhone(phone.number.clone()));
        }
        if !PHONE_TYPES.contains(&phone.kind.as_str()) {
            return Err(LeadValidationError::InvalidPhoneType(phone.kind.clone()));
        }
    }

    Ok(())
}

/// Age in completed years on `today`
fn age_on(birth_date: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth_date.year();
    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }

    age
}
