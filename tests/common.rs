#![allow(unused, dead_code)]

use std::path::Path;

use cnheat_api::{config::Config, Client};
use httpmock::{prelude::*, Mock};

pub type TestResult = std::result::Result<(), Box<dyn std::error::Error + 'static + Send + Sync>>;

pub const TOKEN: &str = "test-token";
pub const BEARER: &str = "Bearer test-token";

pub struct TestingEnv {
    server: MockServer,
}

impl std::fmt::Debug for TestingEnv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestingEnv").finish()
    }
}

impl TestingEnv {
    pub fn new() -> Self {
        let server = MockServer::start();
        Self { server }
    }

    pub fn config(&self) -> Config {
        Config::builder()
            .entrypoint(self.server.base_url())
            .client_id("client")
            .client_secret("secret")
            .build()
            .unwrap()
    }

    /// An unauthenticated client pointed at the mock server
    pub fn client(&self) -> Client {
        Client::from_config(self.config())
    }

    pub fn mock_auth(&self) -> Mock {
        self.mock(|when, then| {
            when.method(POST)
                .path("/oauth/token")
                .body_contains("client_id=client")
                .body_contains("client_secret=secret");
            then.status(200)
                .json_body(serde_json::json!({"access_token": TOKEN, "expires_in": 3600}));
        })
    }

    pub fn get_json_from_file(
        &self,
        path: &str,
        query: Vec<(&str, &str)>,
        file: impl AsRef<Path>,
    ) -> Mock {
        let file = std::fs::read_to_string(file).unwrap();
        self.mock(|mut when, then| {
            when = when.method(GET).path(path).header("Authorization", BEARER);
            for (name, value) in query {
                when = when.query_param(name, value);
            }

            then.status(200)
                .header("content-type", "application/json")
                .body(file);
        })
    }

    /// Respond to any request on `path` with the provided status and a short error body
    pub fn fail(&self, method: httpmock::Method, path: &str, status: u16) -> Mock {
        self.mock(|when, then| {
            when.method(method).path(path);
            then.status(status)
                .json_body(serde_json::json!({"error": "request rejected"}));
        })
    }
}

impl std::ops::Deref for TestingEnv {
    type Target = MockServer;

    fn deref(&self) -> &Self::Target {
        &self.server
    }
}

impl From<&TestingEnv> for Client {
    fn from(value: &TestingEnv) -> Self {
        value.client().with_access_token(TOKEN)
    }
}

impl Default for TestingEnv {
    fn default() -> Self {
        Self::new()
    }
}
