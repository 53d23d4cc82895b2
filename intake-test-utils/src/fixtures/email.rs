use mockito::{Matcher, Mock};
use serde_json::json;

use crate::{constant::TEST_SCRIPT_ID, TestContext};

impl TestContext {
    pub fn email<'a>(&'a mut self) -> EmailFixtures<'a> {
        EmailFixtures { context: self }
    }
}

pub struct EmailFixtures<'a> {
    context: &'a mut TestContext,
}

impl<'a> EmailFixtures<'a> {
    /// Create a mock `POST /macros/s/{TEST_SCRIPT_ID}/exec` endpoint answering with `status_code`.
    ///
    /// The request body must carry the validation url, recipients and lead name.
    pub fn create_email_endpoint(&mut self, status_code: usize, expected_requests: usize) -> Mock {
        let url = format!("/macros/s/{}/exec", TEST_SCRIPT_ID);

        self.context
            .server
            .mock("POST", url.as_str())
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex("\"url\"".to_string()),
                Matcher::Regex("\"emails\"".to_string()),
                Matcher::Regex("\"nome\"".to_string()),
            ]))
            .with_status(status_code)
            .with_header("content-type", "application/json")
            .with_body(json!({ "result": "ok" }).to_string())
            .expect(expected_requests)
            .create()
    }
}
