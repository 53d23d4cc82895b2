//! Lead services.
//!
//! - `validate` - Content checks run before a registration starts
//! - `saga` - Compensation stack shared by the registration steps
//! - `registration` - Registration across the CRM, the local database and the email trigger
//! - `token` - Validation of the token emailed to a lead

pub mod registration;
pub mod saga;
pub mod token;
pub mod validate;
