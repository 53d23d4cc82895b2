//! Request and response types exposed by the HTTP API.

pub mod api;
pub mod lead;
