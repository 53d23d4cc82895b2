//! Test configuration constants for the CRM and email trigger clients.
//!
//! These values are not real credentials but placeholder values for testing purposes.

/// Mock CRM client id of the selection process workspace.
pub static TEST_CLIENT_ID: &str = "crm_client_id";

/// Mock CRM client secret of the selection process workspace.
pub static TEST_CLIENT_SECRET: &str = "crm_client_secret";

/// Mock CRM app token of the selection process workspace.
pub static TEST_APP_TOKEN: &str = "crm_app_token";

/// App id of the selection process workspace.
pub const TEST_APP_ID: i64 = 100;

/// App id of the B2C exchange workspace.
pub const TEST_B2C_APP_ID: i64 = 200;

/// Access token returned by the mock CRM authentication endpoint.
pub static TEST_ACCESS_TOKEN: &str = "crm_access_token";

/// Deployment id of the mock email trigger script.
pub static TEST_SCRIPT_ID: &str = "email_script_id";

/// Public URL the service advertises in validation links.
pub static TEST_PUBLIC_URL: &str = "https://intake.example.com";

/// Survey validated leads are redirected to.
pub static TEST_FIT_SURVEY_URL: &str = "https://survey.example.com/fit";

/// Host accepted by the request guard.
pub static TEST_ALLOWED_DOMAIN: &str = "intake.example.com";

/// API key accepted by the request guard.
pub static TEST_API_KEY: &str = "test-api-key";
