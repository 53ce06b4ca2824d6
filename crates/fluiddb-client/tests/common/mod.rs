//! Common test utilities and harness for the FluidDB client integration tests.

use fluiddb_client::{ClientConfig, Connector, FluidDb};
use fluiddb_core::VALUE_CONTENT_TYPE;
use serde_json::Value;
use wiremock::{MockServer, ResponseTemplate};

/// Username used by authenticated tests.
pub const USERNAME: &str = "alice";
/// Password used by authenticated tests.
pub const PASSWORD: &str = "secret";
/// `Authorization` header expected for [`USERNAME`]/[`PASSWORD`].
pub const AUTH_HEADER: &str = "Basic YWxpY2U6c2VjcmV0";

/// Test harness wrapping a mock FluidDB instance.
pub struct TestHarness {
    /// The mock server; mocks are mounted on it per test.
    pub server: MockServer,
}

impl TestHarness {
    /// Starts a fresh mock server.
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Anonymous configuration pointing at the mock server.
    pub fn config(&self) -> ClientConfig {
        ClientConfig::default().with_base_url(self.server.uri())
    }

    /// Anonymous connector.
    pub fn connector(&self) -> Connector {
        Connector::new(self.config()).expect("connector")
    }

    /// Connector logged in as alice.
    pub fn logged_in_connector(&self) -> Connector {
        Connector::new(self.config().with_credentials(USERNAME, PASSWORD)).expect("connector")
    }

    /// Anonymous facade.
    pub fn db(&self) -> FluidDb {
        FluidDb::from_config(self.config()).expect("client")
    }

    /// Facade logged in as alice.
    pub fn logged_in_db(&self) -> FluidDb {
        let mut db = self.db();
        db.login(USERNAME, PASSWORD);
        db
    }

    /// Number of requests the server has seen so far.
    pub async fn request_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map(|requests| requests.len())
            .unwrap_or_default()
    }
}

/// A JSON reply with the given status.
pub fn json_response(status: u16, body: Value) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(body)
}

/// A tag-value reply carrying raw JSON text.
pub fn value_response(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.to_string(), VALUE_CONTENT_TYPE)
}

/// An error reply carrying FluidDB's vendor headers.
pub fn error_response(status: u16, error_class: &str, request_id: &str) -> ResponseTemplate {
    ResponseTemplate::new(status)
        .insert_header("X-FluidDB-Error-Class", error_class)
        .insert_header("X-FluidDB-Request-Id", request_id)
}
