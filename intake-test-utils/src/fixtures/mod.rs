//! Test fixture modules for database and HTTP mock creation.
//!
//! - `crm` - CRM authentication, metadata and item endpoints
//! - `email` - Email trigger script endpoint
//! - `lead` - Lead records in the local database

pub mod crm;
pub mod email;
pub mod lead;
