//! Data access layer repositories.
//!
//! Repositories are generic over [`sea_orm::ConnectionTrait`] so the same queries run on a
//! pooled connection or inside an open transaction.

pub mod lead;
