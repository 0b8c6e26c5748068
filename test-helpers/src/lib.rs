pub mod backend;
pub mod mock;
pub mod telemetry;

pub use backend::{MockBackend, RecordedRequest, REFERENCED_MESSAGE};

use payloads::{APIClient, ClientError, Session, session::UserProfile};
use reqwest::StatusCode;

/// Secret key the mock backend accepts from test clients.
pub const TEST_SECRET_KEY: &str = "test-secret-key";

pub struct TestApp {
    #[allow(unused)]
    pub port: u16,
    pub address: String,
    pub client: APIClient,
    pub backend: MockBackend,
}

impl TestApp {
    /// A client for the same backend with no secret key.
    pub fn anonymous_client(&self) -> APIClient {
        APIClient::new(self.address.clone(), Session::anonymous())
    }

    /// A client for the same backend carrying the wrong secret key.
    pub fn client_with_key(&self, secret_key: &str) -> APIClient {
        APIClient::new(self.address.clone(), Session::new(secret_key, None))
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.backend.requests()
    }

    /// The recorded requests as `"METHOD path"` strings, which reads well in
    /// assertions.
    pub fn request_lines(&self) -> Vec<String> {
        self.backend
            .requests()
            .into_iter()
            .map(|request| format!("{} {}", request.method, request.path))
            .collect()
    }

    pub fn clear_requests(&self) {
        self.backend.clear_requests();
    }
}

pub fn test_user() -> UserProfile {
    UserProfile {
        id: payloads::UserId(1),
        name: "Test Admin".into(),
        email: Some("admin@example.com".into()),
        role: Some("ADMIN".into()),
    }
}

/// Assert that an API call failed with `expected`, returning the server's
/// message.
#[track_caller]
pub fn assert_status_code<T: std::fmt::Debug>(
    result: Result<T, ClientError>,
    expected: StatusCode,
) -> String {
    match result {
        Err(ClientError::APIError(code, text)) => {
            assert_eq!(code, expected, "unexpected status, message: {text}");
            text
        }
        other => panic!("Expected APIError({expected}), got {other:?}"),
    }
}

pub async fn spawn_app_on_port(port: u16) -> TestApp {
    let subscriber = telemetry::get_subscriber("error", true);
    telemetry::try_init_subscriber(subscriber);

    let backend = MockBackend::new(TEST_SECRET_KEY);
    let (server, port) = backend.serve("127.0.0.1", port).unwrap();
    tokio::spawn(server);

    let address = format!("http://127.0.0.1:{port}");
    TestApp {
        port,
        address: address.clone(),
        client: APIClient::new(
            address,
            Session::new(TEST_SECRET_KEY, Some(test_user())),
        ),
        backend,
    }
}

/// Use OS-assigned port for parallel testing.
pub async fn spawn_app() -> TestApp {
    spawn_app_on_port(0).await
}
