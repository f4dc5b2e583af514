//! Asynchronous client for the jsondb.cloud API.

use serde_json::Value;

use crate::collection::Collection;
use crate::config::ClientConfig;
use crate::error::Result;
use crate::http::{ApiRequest, HttpClient};

/// Asynchronous client for the jsondb.cloud API.
///
/// Owns the immutable configuration and the pooled HTTP transport; hands out
/// cheap, stateless [`Collection`] references. Cloning shares the connection
/// pool. Dropping the last clone releases the pool, so scoped usage needs no
/// explicit teardown; [`JsonDb::close`] exists for making the release point
/// explicit.
///
/// ```rust,no_run
/// use jsondb_cloud::{ClientConfig, JsonDb};
/// use serde_json::json;
///
/// # async fn run() -> jsondb_cloud::Result<()> {
/// let db = JsonDb::new(ClientConfig::new("jdb_sk_live_xxxx"))?;
/// let users = db.collection("users");
///
/// let alice = users.create(&json!({"name": "Alice"})).await?;
/// let fetched = users.get(alice["_id"].as_str().unwrap()).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct JsonDb {
    http: HttpClient,
}

impl JsonDb {
    /// Create a new client. Performs no network I/O.
    pub fn new(config: ClientConfig) -> Result<Self> {
        Ok(Self {
            http: HttpClient::new(config)?,
        })
    }

    /// Get a reference to a collection by name.
    pub fn collection<S: Into<String>>(&self, name: S) -> Collection {
        Collection::new(self.http.clone(), name.into())
    }

    /// List all collections in the project.
    pub async fn list_collections(&self) -> Result<Vec<String>> {
        let request = ApiRequest::<()>::get(format!("/{}", self.http.project()));
        let response: Value = self.http.request_value(request).await?;

        // The API wraps the list in a `data` envelope; accept a bare array too.
        let list = response.get("data").unwrap_or(&response).clone();
        Ok(serde_json::from_value(list)?)
    }

    /// Release the underlying connection pool.
    ///
    /// Dropping the client has the same effect; this method only makes the
    /// release point explicit.
    pub fn close(self) {}
}
