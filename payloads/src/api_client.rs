use crate::{Session, responses, session::SECRET_KEY_HEADER};
use base64::Engine;
use reqwest::{Method, StatusCode, header::CONTENT_TYPE};
use serde::Serialize;
use serde_json::Value;

type ReqwestResult = Result<reqwest::Response, reqwest::Error>;

/// An API client for interfacing with the back-office REST backend.
///
/// Every call except the health check carries the session's secret key. A
/// session without one fails before anything is sent.
#[derive(Debug, Clone)]
pub struct APIClient {
    pub address: String,
    pub inner_client: reqwest::Client,
    pub session: Session,
}

/// Helper methods for http actions
impl APIClient {
    pub fn new(address: impl Into<String>, session: Session) -> Self {
        Self {
            address: address.into(),
            inner_client: reqwest::Client::new(),
            session,
        }
    }

    fn format_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.address.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn authorized(
        &self,
        method: Method,
        path: &str,
    ) -> Result<reqwest::RequestBuilder, ClientError> {
        let secret_key = self
            .session
            .secret_key()
            .ok_or(ClientError::MissingCredential)?;
        tracing::debug!(%method, path, "sending request");
        Ok(self
            .inner_client
            .request(method, self.format_url(path))
            .header(SECRET_KEY_HEADER, secret_key))
    }

    async fn empty_request(
        &self,
        method: Method,
        path: &str,
    ) -> Result<reqwest::Response, ClientError> {
        let response: ReqwestResult =
            self.authorized(method, path)?.send().await;
        Ok(response?)
    }

    async fn json_request(
        &self,
        method: Method,
        path: &str,
        body: &impl Serialize,
    ) -> Result<reqwest::Response, ClientError> {
        let response: ReqwestResult =
            self.authorized(method, path)?.json(body).send().await;
        Ok(response?)
    }
}

/// Methods on the backend API
impl APIClient {
    /// Unauthenticated liveness probe.
    pub async fn health_check(&self) -> Result<(), ClientError> {
        let response = self
            .inner_client
            .get(self.format_url("health_check"))
            .send()
            .await?;
        ok_empty(response).await
    }

    /// GET a JSON payload, with any `{ data: .. }` envelope removed.
    pub async fn get_json(&self, path: &str) -> Result<Value, ClientError> {
        let response = self.empty_request(Method::GET, path).await?;
        ok_json(response).await
    }

    /// POST a JSON body, returning the unwrapped response payload.
    pub async fn post_json(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<Value, ClientError> {
        let response = self.json_request(Method::POST, path, body).await?;
        ok_json(response).await
    }

    /// PUT a full replacement record.
    pub async fn put_json(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<Value, ClientError> {
        let response = self.json_request(Method::PUT, path, body).await?;
        ok_json(response).await
    }

    pub async fn delete(&self, path: &str) -> Result<Value, ClientError> {
        let response = self.empty_request(Method::DELETE, path).await?;
        ok_json(response).await
    }

    /// Fetch raw bytes, e.g. a project media file, along with the content
    /// type the server reported.
    pub async fn get_bytes(
        &self,
        path: &str,
    ) -> Result<(Vec<u8>, Option<String>), ClientError> {
        let response = self.empty_request(Method::GET, path).await?;
        if !response.status().is_success() {
            return Err(api_error(response).await);
        }
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let bytes = response.bytes().await?;
        Ok((bytes.to_vec(), content_type))
    }

    /// Fetch a binary resource and wrap it into a `data:` URL that can be
    /// used directly as an image or download source.
    pub async fn media_data_url(
        &self,
        path: &str,
    ) -> Result<String, ClientError> {
        let (bytes, content_type) = self.get_bytes(path).await?;
        Ok(format!(
            "data:{};base64,{}",
            content_type
                .as_deref()
                .unwrap_or("application/octet-stream"),
            base64::engine::general_purpose::STANDARD.encode(bytes)
        ))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// No secret key in the session; nothing was sent.
    #[error("Not signed in: missing secret key")]
    MissingCredential,
    /// An unhandled API error to display, containing the server's message.
    #[error("{1}")]
    APIError(StatusCode, String),
    #[error("Network error. Please check your connection.")]
    Network(#[from] reqwest::Error),
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::APIError(status, _) => Some(*status),
            Self::Network(e) => e.status(),
            Self::MissingCredential => None,
        }
    }
}

async fn api_error(response: reqwest::Response) -> ClientError {
    let status = response.status();
    match response.text().await {
        Ok(body) => ClientError::APIError(status, responses::error_message(&body)),
        Err(e) => ClientError::Network(e),
    }
}

/// Parse a successful response as JSON, or return an appropriate error.
///
/// Empty bodies become `null` and non-JSON text is passed through as a
/// string, since mutation endpoints are inconsistent about what they answer.
pub async fn ok_json(response: reqwest::Response) -> Result<Value, ClientError> {
    if !response.status().is_success() {
        return Err(api_error(response).await);
    }
    let text = response.text().await?;
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    let value = serde_json::from_str(&text).unwrap_or(Value::String(text));
    Ok(responses::unwrap_envelope(value))
}

/// Check that an empty response is OK, returning a ClientError if not.
pub async fn ok_empty(response: reqwest::Response) -> Result<(), ClientError> {
    if !response.status().is_success() {
        return Err(api_error(response).await);
    }
    Ok(())
}
