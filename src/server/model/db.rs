//! Database model type aliases.
//!
//! These aliases give the rest of the server short names for the SeaORM models generated in
//! the `entity` crate.

/// Type alias for the lead database model.
///
/// # Fields (from `entity::lead::Model`)
/// - `id` - Primary key
/// - `crm_id` - CRM item id, unique
/// - `name` - Applicant name
/// - `committee` - Name of the nearest local committee
/// - `created_at` - Registration timestamp (UTC)
/// - `expires_at` - Moment the validation token stops being accepted
/// - `token` - URL-safe validation token, unique
pub type LeadModel = entity::lead::Model;

/// Type alias for a lead email address model.
pub type LeadEmailModel = entity::lead_email::Model;

/// Type alias for a lead phone number model.
pub type LeadPhoneModel = entity::lead_phone::Model;
