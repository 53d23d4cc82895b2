//! HTTP clients for the external systems a lead registration touches.
//!
//! Each client owns a `reqwest::Client` configured with the request timeout from
//! [`Config`](crate::server::config::Config). A timeout surfaces as an
//! [`Error::HttpError`](crate::server::error::Error::HttpError) like any other transport failure.

pub mod crm;
pub mod email;
