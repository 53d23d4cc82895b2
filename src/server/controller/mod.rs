//! HTTP controller endpoints for the lead intake API.
//!
//! This module contains Axum handlers for the selection process (application registration,
//! token validation, CRM metadata) and the B2C leads workspace. Controllers validate inputs,
//! call into services and turn their results into envelopes or redirects. They use utoipa for
//! OpenAPI documentation.

pub mod b2c;
pub mod selection;
