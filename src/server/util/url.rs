//! Links exchanged with leads.

/// Path of the public token validation route
pub static VALIDATE_TOKEN_PATH: &str = "/api/v1/selection-process/validate-token";

/// Builds the validation link emailed to a newly registered lead
pub fn validation_url(public_url: &str, crm_id: i64, name: &str, token: &str) -> String {
    format!(
        "{}{}?name={}&id={}&token={}",
        public_url.trim_end_matches('/'),
        VALIDATE_TOKEN_PATH,
        urlencoding::encode(name),
        crm_id,
        urlencoding::encode(token)
    )
}

/// Builds the survey redirect target, passing the lead in the URL fragment
pub fn fit_survey_url(survey_url: &str, crm_id: i64, name: &str) -> String {
    format!(
        "{}#id={}&name={}",
        survey_url,
        crm_id,
        urlencoding::encode(name)
    )
}
