//! Utility functions and helpers for server operations.
//!
//! This module provides small reusable helpers: validation token generation and the links
//! sent to or followed by leads.

pub mod token;
pub mod url;
