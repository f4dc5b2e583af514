//! Client configuration for the jsondb.cloud API.

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.jsondb.cloud";

/// Default project namespace
pub const DEFAULT_PROJECT: &str = "v1";

/// Default request timeout in seconds, applied per attempt
pub const DEFAULT_TIMEOUT: f64 = 30.0;

/// Default number of retries on 429/5xx responses
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default base delay in seconds for exponential backoff
pub const DEFAULT_RETRY_BASE_DELAY: f64 = 1.0;

/// Default maximum delay in seconds for exponential backoff
pub const DEFAULT_RETRY_MAX_DELAY: f64 = 10.0;

/// Configuration for [`JsonDb`](crate::JsonDb) and
/// [`blocking::JsonDb`](crate::blocking::JsonDb).
///
/// Built once and handed to the client constructor; never mutated afterwards.
///
/// ```rust
/// use jsondb_cloud::ClientConfig;
///
/// let config = ClientConfig::new("jdb_sk_test_xxxx")
///     .with_project("staging")
///     .with_timeout(10.0)
///     .with_header("X-Custom", "value");
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API key (`jdb_sk_live_*` or `jdb_sk_test_*`). Required.
    pub api_key: String,
    /// Project namespace, first path segment of every request.
    pub project: String,
    /// API base URL.
    pub base_url: String,
    /// Request timeout in seconds. Each retry attempt gets a fresh budget.
    pub timeout: f64,
    /// Maximum number of retries on 429/5xx and transport errors.
    pub max_retries: u32,
    /// Base delay in seconds for exponential backoff.
    pub retry_base_delay: f64,
    /// Maximum delay in seconds for exponential backoff.
    pub retry_max_delay: f64,
    /// Extra headers merged into every request.
    pub headers: Vec<(String, String)>,
}

impl ClientConfig {
    /// Create a configuration with the given API key and all defaults.
    pub fn new<S: Into<String>>(api_key: S) -> Self {
        Self {
            api_key: api_key.into(),
            project: DEFAULT_PROJECT.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_base_delay: DEFAULT_RETRY_BASE_DELAY,
            retry_max_delay: DEFAULT_RETRY_MAX_DELAY,
            headers: Vec::new(),
        }
    }

    /// Set the project namespace.
    pub fn with_project<S: Into<String>>(mut self, project: S) -> Self {
        self.project = project.into();
        self
    }

    /// Set the API base URL.
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the per-attempt request timeout in seconds.
    pub fn with_timeout(mut self, timeout: f64) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the maximum number of retries on transient failures.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Set the base delay in seconds for exponential backoff.
    pub fn with_retry_base_delay(mut self, delay: f64) -> Self {
        self.retry_base_delay = delay;
        self
    }

    /// Set the maximum delay in seconds for exponential backoff.
    pub fn with_retry_max_delay(mut self, delay: f64) -> Self {
        self.retry_max_delay = delay;
        self
    }

    /// Add an extra header sent with every request.
    pub fn with_header<K: Into<String>, V: Into<String>>(mut self, name: K, value: V) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Add several extra headers sent with every request.
    pub fn with_headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.headers
            .extend(headers.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new("jdb_sk_test_key");

        assert_eq!(config.api_key, "jdb_sk_test_key");
        assert_eq!(config.project, "v1");
        assert_eq!(config.base_url, "https://api.jsondb.cloud");
        assert_eq!(config.timeout, 30.0);
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.retry_base_delay, 1.0);
        assert_eq!(config.retry_max_delay, 10.0);
        assert!(config.headers.is_empty());
    }

    #[test]
    fn test_builder() {
        let config = ClientConfig::new("key")
            .with_project("myns")
            .with_base_url("https://api.example.com")
            .with_timeout(5.0)
            .with_max_retries(1)
            .with_retry_base_delay(0.5)
            .with_retry_max_delay(2.0)
            .with_header("X-Custom", "value")
            .with_headers(vec![("X-Other", "v2")]);

        assert_eq!(config.project, "myns");
        assert_eq!(config.base_url, "https://api.example.com");
        assert_eq!(config.timeout, 5.0);
        assert_eq!(config.max_retries, 1);
        assert_eq!(config.retry_base_delay, 0.5);
        assert_eq!(config.retry_max_delay, 2.0);
        assert_eq!(
            config.headers,
            vec![
                ("X-Custom".to_string(), "value".to_string()),
                ("X-Other".to_string(), "v2".to_string()),
            ]
        );
    }
}
