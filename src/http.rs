//! Low-level HTTP transport with automatic retry for the jsondb.cloud API.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client as ReqwestClient, Method, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use url::Url;
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::error::{JsonDbError, Result};

const USER_AGENT: &str = concat!("jsondb-cloud-rust/", env!("CARGO_PKG_VERSION"));

/// HTTP status codes that trigger an automatic retry.
const RETRYABLE_STATUSES: [u16; 5] = [429, 500, 502, 503, 504];

fn is_retryable(status: u16) -> bool {
    RETRYABLE_STATUSES.contains(&status)
}

/// Exponential backoff delay for a zero-based retry attempt, capped at `max`.
fn backoff_delay(attempt: u32, base: f64, max: f64) -> Duration {
    let delay = (base * 2f64.powi(attempt as i32)).min(max);
    Duration::from_secs_f64(delay.max(0.0))
}

/// Description of one API call
#[derive(Debug)]
pub struct ApiRequest<T> {
    pub method: Method,
    pub path: String,
    pub body: Option<T>,
    pub query: Vec<(String, String)>,
    /// Override for the `Content-Type` header; defaults to `application/json`.
    pub content_type: Option<&'static str>,
}

impl<T> ApiRequest<T> {
    fn new(method: Method, path: String, body: Option<T>) -> Self {
        Self {
            method,
            path,
            body,
            query: Vec::new(),
            content_type: None,
        }
    }

    /// Create a new GET request
    pub fn get(path: String) -> Self {
        Self::new(Method::GET, path, None)
    }

    /// Create a new DELETE request
    pub fn delete(path: String) -> Self {
        Self::new(Method::DELETE, path, None)
    }

    /// Create a new POST request
    pub fn post(path: String, body: T) -> Self {
        Self::new(Method::POST, path, Some(body))
    }

    /// Create a new PUT request
    pub fn put(path: String, body: T) -> Self {
        Self::new(Method::PUT, path, Some(body))
    }

    /// Create a new PATCH request
    pub fn patch(path: String, body: T) -> Self {
        Self::new(Method::PATCH, path, Some(body))
    }

    /// Add query parameter pairs
    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    /// Override the request `Content-Type`
    pub fn with_content_type(mut self, content_type: &'static str) -> Self {
        self.content_type = Some(content_type);
        self
    }
}

/// HTTP client wrapper around `reqwest::Client`.
///
/// Handles Bearer token auth, extra configured headers, automatic retries on
/// 429/5xx and transport errors with exponential backoff, and translation of
/// error responses into [`JsonDbError`] variants. Cheap to clone; clones
/// share the same connection pool.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Arc<ReqwestClient>,
    config: Arc<ClientConfig>,
    base_url: String,
}

impl HttpClient {
    /// Build a client from configuration. Performs no network I/O.
    pub fn new(config: ClientConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(JsonDbError::config("api_key is required"));
        }
        if !config.timeout.is_finite() || config.timeout <= 0.0 {
            return Err(JsonDbError::config("timeout must be a positive number"));
        }

        let base_url = config.base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url)?;

        let mut headers = HeaderMap::new();
        let bearer = HeaderValue::from_str(&format!("Bearer {}", config.api_key))
            .map_err(|_| JsonDbError::config("api_key contains invalid characters"))?;
        headers.insert(AUTHORIZATION, bearer);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        for (name, value) in &config.headers {
            let name = HeaderName::try_from(name.as_str())
                .map_err(|_| JsonDbError::config(format!("invalid header name: {name}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|_| JsonDbError::config(format!("invalid value for header {name}")))?;
            headers.insert(name, value);
        }

        let client = ReqwestClient::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(Duration::from_secs_f64(config.timeout))
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            config: Arc::new(config),
            base_url,
        })
    }

    /// Project namespace this client is configured for.
    pub fn project(&self) -> &str {
        &self.config.project
    }

    /// Make a request and deserialize the response body.
    pub async fn request<T, R>(&self, req: ApiRequest<T>) -> Result<R>
    where
        T: Serialize,
        R: DeserializeOwned,
    {
        let value = self.request_value(req).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Make a request and return the raw JSON response body.
    ///
    /// 204 responses decode to `Value::Null`. Retryable failures (429 other
    /// than quota exhaustion, 5xx, transport errors) are re-issued up to
    /// `max_retries` times with exponential backoff; each attempt carries the
    /// same `X-Request-Id` so the server can de-duplicate replayed writes.
    pub async fn request_value<T>(&self, req: ApiRequest<T>) -> Result<Value>
    where
        T: Serialize,
    {
        let request_id = Uuid::new_v4();
        let max_attempts = self.config.max_retries.saturating_add(1);
        let mut attempt: u32 = 0;

        loop {
            let outcome = self.attempt(&req, request_id).await;
            let has_budget = attempt + 1 < max_attempts;

            match outcome {
                Ok(value) => return Ok(value),
                Err(err) if has_budget && Self::should_retry(&err) => {
                    let delay = backoff_delay(
                        attempt,
                        self.config.retry_base_delay,
                        self.config.retry_max_delay,
                    );
                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        %request_id,
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "transient failure, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Whether an error is transient and worth retrying.
    ///
    /// Quota exhaustion shares the 429 status with rate limiting but is a
    /// semantic error; retrying it cannot succeed within the billing period.
    fn should_retry(err: &JsonDbError) -> bool {
        match err {
            JsonDbError::QuotaExceeded { .. } => false,
            JsonDbError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            _ => err.status().map(is_retryable).unwrap_or(false),
        }
    }

    /// Issue the request once and decode the outcome.
    async fn attempt<T>(&self, req: &ApiRequest<T>, request_id: Uuid) -> Result<Value>
    where
        T: Serialize,
    {
        #[cfg(feature = "tracing")]
        tracing::debug!(method = %req.method, path = %req.path, %request_id, "dispatching request");

        let response = self.dispatch(req, request_id).await?;
        let status = response.status();

        if status == StatusCode::NO_CONTENT {
            return Ok(Value::Null);
        }

        let text = response.text().await?;

        if status.is_success() {
            if text.is_empty() {
                return Ok(Value::Null);
            }
            return Ok(serde_json::from_str(&text)?);
        }

        // Error bodies may not be JSON at all (proxies, load balancers).
        let body: Value = serde_json::from_str(&text).unwrap_or(Value::Null);
        Err(JsonDbError::from_response(status.as_u16(), &body))
    }

    async fn dispatch<T>(&self, req: &ApiRequest<T>, request_id: Uuid) -> Result<Response>
    where
        T: Serialize,
    {
        // Plain concatenation rather than Url::join so a base URL with a
        // path prefix keeps that prefix.
        let url = Url::parse(&format!("{}{}", self.base_url, req.path))?;

        let mut request_builder = self
            .client
            .request(req.method.clone(), url)
            .header(
                CONTENT_TYPE,
                req.content_type.unwrap_or("application/json"),
            )
            .header("X-Request-Id", request_id.to_string());

        if !req.query.is_empty() {
            request_builder = request_builder.query(&req.query);
        }

        if let Some(body) = &req.body {
            request_builder = request_builder.json(body);
        }

        let response = request_builder.send().await?;
        Ok(response)
    }
}
