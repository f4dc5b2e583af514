//! Blocking variants of [`JsonDb`](crate::JsonDb) and
//! [`Collection`](crate::Collection).
//!
//! The blocking client is a thin shell around the async implementation: every
//! method drives the async counterpart to completion on a private
//! current-thread Tokio runtime. There is a single code path for request
//! construction, retries, and error mapping, so the two variants cannot
//! drift apart.
//!
//! ```rust,no_run
//! use jsondb_cloud::{blocking::JsonDb, ClientConfig};
//! use serde_json::json;
//!
//! # fn run() -> jsondb_cloud::Result<()> {
//! let db = JsonDb::new(ClientConfig::new("jdb_sk_live_xxxx"))?;
//! let users = db.collection("users");
//! let alice = users.create(&json!({"name": "Alice"}))?;
//! # Ok(())
//! # }
//! ```
//!
//! Do not use the blocking client inside an async runtime; it will block the
//! executor thread for the full duration of each request.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tokio::runtime::{Builder, Runtime};

use crate::config::ClientConfig;
use crate::error::Result;
use crate::query::ListQuery;
use crate::types::{
    BulkOperation, BulkResult, CreateWebhookParams, DeliveryAttempt, Document, ImportOptions,
    ImportReport, JsonPatchOp, ListResult, UpdateWebhookParams, ValidationReport, VersionDiff,
    VersionList, Webhook,
};

/// Blocking client for the jsondb.cloud API.
#[derive(Debug, Clone)]
pub struct JsonDb {
    inner: crate::JsonDb,
    runtime: Arc<Runtime>,
}

impl JsonDb {
    /// Create a new blocking client. Performs no network I/O.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let runtime = Builder::new_current_thread().enable_all().build()?;
        Ok(Self {
            inner: crate::JsonDb::new(config)?,
            runtime: Arc::new(runtime),
        })
    }

    /// Get a reference to a collection by name.
    pub fn collection<S: Into<String>>(&self, name: S) -> Collection {
        Collection {
            inner: self.inner.collection(name),
            runtime: self.runtime.clone(),
        }
    }

    /// List all collections in the project.
    pub fn list_collections(&self) -> Result<Vec<String>> {
        self.runtime.block_on(self.inner.list_collections())
    }

    /// Release the underlying connection pool. Dropping has the same effect.
    pub fn close(self) {}
}

/// Blocking interface to a single jsondb.cloud collection.
///
/// Obtain instances via [`JsonDb::collection`]. Method for method identical
/// to the async [`Collection`](crate::Collection).
#[derive(Debug, Clone)]
pub struct Collection {
    inner: crate::Collection,
    runtime: Arc<Runtime>,
}

impl Collection {
    /// The collection name.
    pub fn name(&self) -> &str {
        self.inner.name()
    }

    /// Create a new document with a server-assigned id.
    pub fn create<T: Serialize>(&self, data: &T) -> Result<Document> {
        self.runtime.block_on(self.inner.create(data))
    }

    /// Create a new document under an explicit id.
    pub fn create_with_id<T: Serialize>(&self, id: &str, data: &T) -> Result<Document> {
        self.runtime.block_on(self.inner.create_with_id(id, data))
    }

    /// Get a single document by id.
    pub fn get(&self, id: &str) -> Result<Document> {
        self.runtime.block_on(self.inner.get(id))
    }

    /// List documents with optional filtering, sorting, and pagination.
    pub fn list(&self, query: ListQuery) -> Result<ListResult> {
        self.runtime.block_on(self.inner.list(query))
    }

    /// Replace a document entirely.
    pub fn update<T: Serialize>(&self, id: &str, data: &T) -> Result<Document> {
        self.runtime.block_on(self.inner.update(id, data))
    }

    /// Merge-patch a document (partial update, shallow merge).
    pub fn patch<T: Serialize>(&self, id: &str, data: &T) -> Result<Document> {
        self.runtime.block_on(self.inner.patch(id, data))
    }

    /// Apply JSON Patch operations (RFC 6902) to a document atomically.
    pub fn json_patch(&self, id: &str, operations: &[JsonPatchOp]) -> Result<Document> {
        self.runtime.block_on(self.inner.json_patch(id, operations))
    }

    /// Delete a document by id.
    pub fn delete(&self, id: &str) -> Result<()> {
        self.runtime.block_on(self.inner.delete(id))
    }

    /// Create multiple documents in a single request.
    pub fn bulk_create<T: Serialize>(&self, docs: &[T]) -> Result<BulkResult> {
        self.runtime.block_on(self.inner.bulk_create(docs))
    }

    /// Execute mixed bulk operations (create/update/patch/delete).
    pub fn bulk(&self, operations: Vec<BulkOperation>) -> Result<BulkResult> {
        self.runtime.block_on(self.inner.bulk(operations))
    }

    /// Count documents matching an optional filter.
    pub fn count(&self, filter: Option<Value>) -> Result<u64> {
        self.runtime.block_on(self.inner.count(filter))
    }

    /// Get the JSON Schema for this collection, if one is set.
    pub fn get_schema(&self) -> Result<Option<Value>> {
        self.runtime.block_on(self.inner.get_schema())
    }

    /// Set a JSON Schema for this collection.
    pub fn set_schema(&self, schema: &Value) -> Result<()> {
        self.runtime.block_on(self.inner.set_schema(schema))
    }

    /// Remove the schema from this collection.
    pub fn remove_schema(&self) -> Result<()> {
        self.runtime.block_on(self.inner.remove_schema())
    }

    /// Validate a document against the collection schema without storing it.
    pub fn validate<T: Serialize>(&self, data: &T) -> Result<ValidationReport> {
        self.runtime.block_on(self.inner.validate(data))
    }

    /// List all versions of a document, newest first.
    pub fn list_versions(&self, id: &str) -> Result<VersionList> {
        self.runtime.block_on(self.inner.list_versions(id))
    }

    /// Get a document as it was at a specific version.
    pub fn get_version(&self, id: &str, version: u64) -> Result<Document> {
        self.runtime.block_on(self.inner.get_version(id, version))
    }

    /// Restore a document to a prior version, returning the restored document.
    pub fn restore_version(&self, id: &str, version: u64) -> Result<Document> {
        self.runtime
            .block_on(self.inner.restore_version(id, version))
    }

    /// Diff two versions of a document.
    pub fn diff_versions(&self, id: &str, from: u64, to: u64) -> Result<VersionDiff> {
        self.runtime
            .block_on(self.inner.diff_versions(id, from, to))
    }

    /// Register a webhook on this collection.
    pub fn create_webhook(&self, params: CreateWebhookParams) -> Result<Webhook> {
        self.runtime.block_on(self.inner.create_webhook(params))
    }

    /// List all webhooks for this collection.
    pub fn list_webhooks(&self) -> Result<Vec<Webhook>> {
        self.runtime.block_on(self.inner.list_webhooks())
    }

    /// Get webhook details, including recent deliveries.
    pub fn get_webhook(&self, webhook_id: &str) -> Result<Webhook> {
        self.runtime.block_on(self.inner.get_webhook(webhook_id))
    }

    /// Update a webhook registration.
    pub fn update_webhook(&self, webhook_id: &str, params: UpdateWebhookParams) -> Result<Webhook> {
        self.runtime
            .block_on(self.inner.update_webhook(webhook_id, params))
    }

    /// Delete a webhook.
    pub fn delete_webhook(&self, webhook_id: &str) -> Result<()> {
        self.runtime.block_on(self.inner.delete_webhook(webhook_id))
    }

    /// Trigger a synthetic delivery to a webhook.
    pub fn test_webhook(&self, webhook_id: &str) -> Result<DeliveryAttempt> {
        self.runtime.block_on(self.inner.test_webhook(webhook_id))
    }

    /// Bulk-load documents into this collection.
    pub fn import_documents<T: Serialize>(
        &self,
        documents: &[T],
        options: ImportOptions,
    ) -> Result<ImportReport> {
        self.runtime
            .block_on(self.inner.import_documents(documents, options))
    }

    /// Export all documents from this collection, optionally filtered.
    pub fn export_documents(&self, filter: Option<Value>) -> Result<Vec<Document>> {
        self.runtime.block_on(self.inner.export_documents(filter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocking_construction_is_local() {
        let db = JsonDb::new(ClientConfig::new("jdb_sk_test_key"));
        assert!(db.is_ok());
    }

    #[test]
    fn test_blocking_collection_handle() {
        let db = JsonDb::new(ClientConfig::new("jdb_sk_test_key")).unwrap();
        let users = db.collection("users");
        assert_eq!(users.name(), "users");
    }
}
