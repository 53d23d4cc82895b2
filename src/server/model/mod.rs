//! Server application models and type definitions.
//!
//! This module contains data models for the server application, including application state,
//! database model type aliases, CRM payloads and the lead records written by the registration
//! saga.

pub mod app;
pub mod crm;
pub mod db;
pub mod lead;
