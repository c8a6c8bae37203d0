//! HTTP transport trait and implementations.

use async_trait::async_trait;
use reqwest::Method;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::config::ClientConfig;
use crate::error::ClientError;

use super::request::{ApiRequest, MultipartForm, RawResponse, RequestBody};

/// Trait for HTTP transports, enabling mockability in tests.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send one request and return the status and body, whatever the status.
    ///
    /// Only transport-level failures (connection refused, timeout) are errors.
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ClientError>;
}

/// Configuration for ReqwestTransport.
#[derive(Clone)]
pub struct ReqwestTransportBuilder {
    base_url: String,
    timeout: Duration,
    user_agent: String,
}

impl Default for ReqwestTransportBuilder {
    fn default() -> Self {
        Self::from_config(&ClientConfig::default())
    }
}

impl ReqwestTransportBuilder {
    /// Create a builder from client configuration.
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            timeout: config.timeout,
            user_agent: config.user_agent.clone(),
        }
    }

    /// Set the backend origin.
    pub fn base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    pub fn user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }

    /// Build the ReqwestTransport.
    pub fn build(self) -> Result<ReqwestTransport, ClientError> {
        let base_url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| ClientError::Validation(format!("Invalid base URL: {}", e)))?;
        if base_url.cannot_be_a_base() {
            return Err(cannot_carry_path(&self.base_url));
        }

        let inner = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .build()?;

        Ok(ReqwestTransport {
            inner: Arc::new(inner),
            base_url,
        })
    }
}

fn cannot_carry_path(base_url: &str) -> ClientError {
    ClientError::Validation(format!("Base URL cannot carry a path: {}", base_url))
}

/// Production transport backed by a pooled reqwest client.
pub struct ReqwestTransport {
    /// Shared reqwest client for connection pooling.
    inner: Arc<reqwest::Client>,
    base_url: reqwest::Url,
}

impl ReqwestTransport {
    /// Create a transport for the given configuration.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        ReqwestTransportBuilder::from_config(config).build()
    }

    /// Get a builder for custom configuration.
    pub fn builder() -> ReqwestTransportBuilder {
        ReqwestTransportBuilder::default()
    }

    /// Resolve the request's segments against the base URL, percent-encoding each one.
    fn url_for(&self, request: &ApiRequest) -> Result<reqwest::Url, ClientError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| cannot_carry_path(self.base_url.as_str()))?;
            path.pop_if_empty().extend(&request.segments);
        }
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&request.query);
        }
        Ok(url)
    }

    fn multipart_form(form: MultipartForm) -> Result<reqwest::multipart::Form, ClientError> {
        let mut multipart = reqwest::multipart::Form::new();
        for (name, value) in form.fields {
            multipart = multipart.text(name, value);
        }
        if let Some(upload) = form.file {
            let part = reqwest::multipart::Part::bytes(upload.bytes)
                .file_name(upload.file_name)
                .mime_str(&upload.content_type)?;
            multipart = multipart.part("file", part);
        }
        Ok(multipart)
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ClientError> {
        let url = self.url_for(&request)?;
        let method = request.method.clone();
        let path = request.path();

        let mut builder = self.inner.request(request.method, url);
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(form) => builder.multipart(Self::multipart_form(form)?),
        };

        tracing::debug!(%method, path = %path, "network: sending request");
        let response = builder.send().await.map_err(|e| {
            tracing::debug!(%method, path = %path, error = %e, "network: request failed");
            ClientError::Network(e)
        })?;

        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        tracing::debug!(
            %method,
            path = %path,
            status,
            bytes = body.len(),
            "network: response received"
        );

        Ok(RawResponse { status, body })
    }
}

/// Mock response for testing.
#[derive(Clone)]
pub enum MockResponse {
    /// Any status with a raw body.
    Status(u16, String),
    /// Transport-level failure.
    Error(String),
}

/// Mock transport for testing. Records every request it receives.
pub struct MockTransport {
    responses: HashMap<(Method, String), MockResponse>,
    calls: Mutex<Vec<ApiRequest>>,
}

impl MockTransport {
    /// Create a new empty mock transport.
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Add a response for a method and unencoded path.
    pub fn with_response(mut self, method: Method, path: &str, response: MockResponse) -> Self {
        self.responses.insert((method, path.to_string()), response);
        self
    }

    /// Add a 200 response wrapping `result` in the backend envelope.
    pub fn with_result(self, method: Method, path: &str, result: serde_json::Value) -> Self {
        let body = serde_json::json!({ "code": 1000, "result": result }).to_string();
        self.with_response(method, path, MockResponse::Status(200, body))
    }

    /// Add a response with an arbitrary status and body.
    pub fn with_status(self, method: Method, path: &str, status: u16, body: &str) -> Self {
        self.with_response(method, path, MockResponse::Status(status, body.to_string()))
    }

    /// Add a transport error for a method and path.
    pub fn with_error(self, method: Method, path: &str, error: &str) -> Self {
        self.with_response(method, path, MockResponse::Error(error.to_string()))
    }

    /// All requests received so far, in order.
    pub fn calls(&self) -> Vec<ApiRequest> {
        self.recorded().clone()
    }

    pub fn call_count(&self) -> usize {
        self.recorded().len()
    }

    /// The most recent request, if any.
    pub fn last_call(&self) -> Option<ApiRequest> {
        self.recorded().last().cloned()
    }

    fn recorded(&self) -> MutexGuard<'_, Vec<ApiRequest>> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ClientError> {
        let key = (request.method.clone(), request.path());
        self.recorded().push(request);

        match self.responses.get(&key) {
            Some(MockResponse::Status(status, body)) => {
                Ok(RawResponse::new(*status, body.as_bytes().to_vec()))
            }
            Some(MockResponse::Error(e)) => Err(ClientError::Transport(e.clone())),
            None => {
                let message = format!("No mock response for {} {}", key.0, key.1);
                Err(ClientError::Transport(message))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport(base: &str) -> ReqwestTransport {
        ReqwestTransport::builder().base_url(base).build().unwrap()
    }

    #[test]
    fn test_url_encodes_segments_and_query() {
        let transport = transport("http://localhost:8080");
        let request = ApiRequest::get(["recipe", "findByKeyWord", "mac & cheese"]);
        let url = transport.url_for(&request).unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/recipe/findByKeyWord/mac%20&%20cheese"
        );

        let request = ApiRequest::get(["recipes"])
            .query("page", 0)
            .query("size", 10);
        let url = transport.url_for(&request).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/recipes?page=0&size=10");
    }

    #[test]
    fn test_url_keeps_base_path() {
        let transport = transport("https://example.com/api/");
        let url = transport
            .url_for(&ApiRequest::get(["ingredients", "getAll"]))
            .unwrap();
        assert_eq!(url.as_str(), "https://example.com/api/ingredients/getAll");
    }

    #[test]
    fn test_builder_rejects_invalid_base() {
        assert!(ReqwestTransport::builder().base_url("nope").build().is_err());
        assert!(ReqwestTransport::builder()
            .base_url("mailto:chef@example.com")
            .build()
            .is_err());
    }

    #[tokio::test]
    async fn test_mock_records_calls() {
        let mock = MockTransport::new().with_status(Method::GET, "/ping", 200, "{}");
        let response = mock.send(ApiRequest::get(["ping"])).await.unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(mock.call_count(), 1);

        let missing = mock.send(ApiRequest::get(["nothing"])).await;
        assert!(matches!(missing, Err(ClientError::Transport(_))));
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_error() {
        let transport = transport("http://127.0.0.1:1");
        let request = ApiRequest::get(["ingredients", "getAll"]);

        let result = transport.send(request).await;

        assert!(matches!(result, Err(ClientError::Network(_))));
    }
}
