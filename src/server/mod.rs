//! Server application core modules.
//!
//! This module contains the backend of the lead intake service: HTTP routing and middleware,
//! configuration, the local database repositories, the CRM and email trigger clients, and the
//! services that register leads across those systems and validate their emailed tokens.

#![warn(rustdoc::missing_crate_level_docs)]

pub mod client;
pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod middleware;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
pub mod util;
