//! CRM HTTP mock endpoint creation utilities.
//!
//! Each method registers a mock with the mockito server that verifies it was called the
//! expected number of times when asserted.

use mockito::{Matcher, Mock};
use serde_json::{json, Value};

use crate::{
    constant::{TEST_ACCESS_TOKEN, TEST_APP_ID},
    TestContext,
};

impl TestContext {
    pub fn crm<'a>(&'a mut self) -> CrmFixtures<'a> {
        CrmFixtures { context: self }
    }
}

pub struct CrmFixtures<'a> {
    context: &'a mut TestContext,
}

impl<'a> CrmFixtures<'a> {
    /// Create a mock `POST /oauth/token` endpoint granting [`TEST_ACCESS_TOKEN`].
    pub fn create_auth_endpoint(&mut self, expected_requests: usize) -> Mock {
        self.context
            .server
            .mock("POST", "/oauth/token")
            .match_body(Matcher::UrlEncoded("grant_type".into(), "app".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "access_token": TEST_ACCESS_TOKEN,
                    "token_type": "bearer",
                    "expires_in": 28800,
                    "refresh_token": "crm_refresh_token",
                })
                .to_string(),
            )
            .expect(expected_requests)
            .create()
    }

    /// Create a mock `POST /oauth/token` endpoint rejecting the app credentials.
    pub fn create_auth_endpoint_error(
        &mut self,
        status_code: usize,
        expected_requests: usize,
    ) -> Mock {
        self.context
            .server
            .mock("POST", "/oauth/token")
            .with_status(status_code)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "error": "unauthorized",
                    "error_description": "Invalid app token",
                })
                .to_string(),
            )
            .expect(expected_requests)
            .create()
    }

    /// Create a mock `GET /app/{app_id}` endpoint answering `body` with `status_code`.
    pub fn create_metadata_endpoint(
        &mut self,
        app_id: i64,
        status_code: usize,
        body: Value,
        expected_requests: usize,
    ) -> Mock {
        let url = format!("/app/{}", app_id);

        self.context
            .server
            .mock("GET", url.as_str())
            .match_header("authorization", format!("Bearer {}", TEST_ACCESS_TOKEN).as_str())
            .with_status(status_code)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .expect(expected_requests)
            .create()
    }

    /// Create a mock `POST /item/app/{TEST_APP_ID}` endpoint creating an item.
    pub fn create_item_endpoint(
        &mut self,
        item_id: i64,
        app_item_id: i64,
        expected_requests: usize,
    ) -> Mock {
        let url = format!("/item/app/{}", TEST_APP_ID);

        self.context
            .server
            .mock("POST", url.as_str())
            .match_header("authorization", format!("Bearer {}", TEST_ACCESS_TOKEN).as_str())
            .match_body(Matcher::PartialJson(json!({ "fields": {} })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "item_id": item_id,
                    "app_item_id": app_item_id,
                    "title": "Lead",
                    "link": format!("https://crm.example.com/items/{}", item_id),
                })
                .to_string(),
            )
            .expect(expected_requests)
            .create()
    }

    /// Create a mock `POST /item/app/{TEST_APP_ID}` endpoint that answers without an item id.
    pub fn create_item_endpoint_without_id(
        &mut self,
        status_code: usize,
        expected_requests: usize,
    ) -> Mock {
        let url = format!("/item/app/{}", TEST_APP_ID);

        self.context
            .server
            .mock("POST", url.as_str())
            .with_status(status_code)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "error": "invalid_value",
                    "error_description": "Invalid value for field titulo",
                })
                .to_string(),
            )
            .expect(expected_requests)
            .create()
    }

    /// Create a mock `PUT /item/{item_id}` endpoint expecting the fit sent status payload.
    pub fn create_update_endpoint(
        &mut self,
        item_id: i64,
        status_code: usize,
        expected_requests: usize,
    ) -> Mock {
        let url = format!("/item/{}", item_id);

        self.context
            .server
            .mock("PUT", url.as_str())
            .match_body(Matcher::Json(json!({ "fields": { "status": 203 } })))
            .with_status(status_code)
            .with_header("content-type", "application/json")
            .with_body(json!({ "revision": 2 }).to_string())
            .expect(expected_requests)
            .create()
    }

    /// Create a mock `DELETE /item/{item_id}` endpoint answering with `status_code`.
    pub fn create_delete_endpoint(
        &mut self,
        item_id: i64,
        status_code: usize,
        expected_requests: usize,
    ) -> Mock {
        let url = format!("/item/{}", item_id);

        self.context
            .server
            .mock("DELETE", url.as_str())
            .with_status(status_code)
            .expect(expected_requests)
            .create()
    }
}
