//! Service layer for business logic and orchestration.
//!
//! This module contains the TTL cache shielding the CRM, the services reading CRM tokens and
//! app metadata through it, and the lead services: the registration saga spanning the CRM, the
//! local database and the email trigger, plus validation of emailed tokens.

pub mod cache;
pub mod crm;
pub mod lead;
