//! Document operations on a single jsondb.cloud collection.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::http::{ApiRequest, HttpClient};
use crate::query::{filter_pairs, ListQuery};
use crate::types::{
    BulkOperation, BulkResult, CreateWebhookParams, DeliveryAttempt, Document, ImportOptions,
    ImportReport, JsonPatchOp, ListResult, UpdateWebhookParams, ValidationReport, VersionDiff,
    VersionList, Webhook,
};

const MERGE_PATCH: &str = "application/merge-patch+json";
const JSON_PATCH: &str = "application/json-patch+json";

#[derive(Debug, Serialize)]
struct BulkBody {
    operations: Vec<BulkOperation>,
}

#[derive(Debug, Deserialize)]
struct CountResponse {
    count: u64,
}

#[derive(Debug, Deserialize)]
struct SchemaEnvelope {
    #[serde(default)]
    schema: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct WebhookListEnvelope {
    #[serde(default)]
    data: Vec<Webhook>,
}

/// Interface to a single jsondb.cloud collection.
///
/// Obtain instances via [`JsonDb::collection`](crate::JsonDb::collection).
/// Holds only the collection name and a handle to the shared transport, so
/// it is cheap to create, clone, and discard.
#[derive(Debug, Clone)]
pub struct Collection {
    http: HttpClient,
    name: String,
}

impl Collection {
    pub(crate) fn new(http: HttpClient, name: String) -> Self {
        Self { http, name }
    }

    /// The collection name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Build the API path for this collection.
    fn path(&self, suffix: &str) -> String {
        let base = format!("/{}/{}", self.http.project(), self.name);
        if suffix.is_empty() {
            base
        } else {
            format!("{base}/{suffix}")
        }
    }

    // ------------------------------------------------------------------
    // CRUD
    // ------------------------------------------------------------------

    /// Create a new document with a server-assigned id.
    pub async fn create<T: Serialize>(&self, data: &T) -> Result<Document> {
        let request = ApiRequest::post(self.path(""), data);
        self.http.request(request).await
    }

    /// Create a new document under an explicit id.
    pub async fn create_with_id<T: Serialize>(&self, id: &str, data: &T) -> Result<Document> {
        let request = ApiRequest::post(self.path(id), data);
        self.http.request(request).await
    }

    /// Get a single document by id.
    pub async fn get(&self, id: &str) -> Result<Document> {
        let request = ApiRequest::<()>::get(self.path(id));
        self.http.request(request).await
    }

    /// List documents with optional filtering, sorting, and pagination.
    pub async fn list(&self, query: ListQuery) -> Result<ListResult> {
        let request = ApiRequest::<()>::get(self.path("")).with_query(query.to_pairs(false));
        self.http.request(request).await
    }

    /// Replace a document entirely.
    pub async fn update<T: Serialize>(&self, id: &str, data: &T) -> Result<Document> {
        let request = ApiRequest::put(self.path(id), data);
        self.http.request(request).await
    }

    /// Merge-patch a document (partial update, shallow merge).
    pub async fn patch<T: Serialize>(&self, id: &str, data: &T) -> Result<Document> {
        let request = ApiRequest::patch(self.path(id), data).with_content_type(MERGE_PATCH);
        self.http.request(request).await
    }

    /// Apply JSON Patch operations (RFC 6902) to a document atomically.
    pub async fn json_patch(&self, id: &str, operations: &[JsonPatchOp]) -> Result<Document> {
        let request = ApiRequest::patch(self.path(id), operations).with_content_type(JSON_PATCH);
        self.http.request(request).await
    }

    /// Delete a document by id.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let request = ApiRequest::<()>::delete(self.path(id));
        let _: Value = self.http.request_value(request).await?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Bulk operations
    // ------------------------------------------------------------------

    /// Create multiple documents in a single request.
    ///
    /// Returns one result per input document, in input order.
    pub async fn bulk_create<T: Serialize>(&self, docs: &[T]) -> Result<BulkResult> {
        let operations = docs
            .iter()
            .map(|doc| Ok(BulkOperation::create(serde_json::to_value(doc)?)))
            .collect::<Result<Vec<_>>>()?;
        self.bulk(operations).await
    }

    /// Execute mixed bulk operations (create/update/patch/delete).
    ///
    /// Returns one result per input operation, in input order.
    pub async fn bulk(&self, operations: Vec<BulkOperation>) -> Result<BulkResult> {
        let request = ApiRequest::post(self.path("_bulk"), BulkBody { operations });
        self.http.request(request).await
    }

    // ------------------------------------------------------------------
    // Count
    // ------------------------------------------------------------------

    /// Count documents matching an optional filter.
    pub async fn count(&self, filter: Option<Value>) -> Result<u64> {
        let query = match filter {
            Some(filter) => ListQuery::new().with_filter(filter),
            None => ListQuery::new(),
        };
        let request = ApiRequest::<()>::get(self.path("")).with_query(query.to_pairs(true));
        let response: CountResponse = self.http.request(request).await?;
        Ok(response.count)
    }

    // ------------------------------------------------------------------
    // Schema
    // ------------------------------------------------------------------

    /// Get the JSON Schema for this collection, if one is set.
    pub async fn get_schema(&self) -> Result<Option<Value>> {
        let request = ApiRequest::<()>::get(self.path("_schema"));
        let envelope: SchemaEnvelope = self.http.request(request).await?;
        Ok(envelope.schema)
    }

    /// Set a JSON Schema for this collection.
    pub async fn set_schema(&self, schema: &Value) -> Result<()> {
        let request = ApiRequest::put(self.path("_schema"), schema);
        let _: Value = self.http.request_value(request).await?;
        Ok(())
    }

    /// Remove the schema from this collection.
    pub async fn remove_schema(&self) -> Result<()> {
        let request = ApiRequest::<()>::delete(self.path("_schema"));
        let _: Value = self.http.request_value(request).await?;
        Ok(())
    }

    /// Validate a document against the collection schema without storing it.
    pub async fn validate<T: Serialize>(&self, data: &T) -> Result<ValidationReport> {
        let request = ApiRequest::post(self.path("_validate"), data);
        self.http.request(request).await
    }

    // ------------------------------------------------------------------
    // Version history
    // ------------------------------------------------------------------

    /// List all versions of a document, newest first.
    pub async fn list_versions(&self, id: &str) -> Result<VersionList> {
        let request = ApiRequest::<()>::get(self.path(&format!("{id}/versions")));
        self.http.request(request).await
    }

    /// Get a document as it was at a specific version.
    pub async fn get_version(&self, id: &str, version: u64) -> Result<Document> {
        let request = ApiRequest::<()>::get(self.path(&format!("{id}/versions/{version}")));
        self.http.request(request).await
    }

    /// Restore a document to a prior version, returning the restored document.
    pub async fn restore_version(&self, id: &str, version: u64) -> Result<Document> {
        let request =
            ApiRequest::<()>::post(self.path(&format!("{id}/versions/{version}/restore")), ());
        self.http.request(request).await
    }

    /// Diff two versions of a document.
    pub async fn diff_versions(&self, id: &str, from: u64, to: u64) -> Result<VersionDiff> {
        let request = ApiRequest::<()>::get(self.path(&format!("{id}/versions/diff")))
            .with_query(vec![
                ("from".to_string(), from.to_string()),
                ("to".to_string(), to.to_string()),
            ]);
        self.http.request(request).await
    }

    // ------------------------------------------------------------------
    // Webhooks
    // ------------------------------------------------------------------

    /// Register a webhook on this collection.
    pub async fn create_webhook(&self, params: CreateWebhookParams) -> Result<Webhook> {
        let request = ApiRequest::post(self.path("_webhooks"), params);
        self.http.request(request).await
    }

    /// List all webhooks for this collection.
    pub async fn list_webhooks(&self) -> Result<Vec<Webhook>> {
        let request = ApiRequest::<()>::get(self.path("_webhooks"));
        let envelope: WebhookListEnvelope = self.http.request(request).await?;
        Ok(envelope.data)
    }

    /// Get webhook details, including recent deliveries.
    pub async fn get_webhook(&self, webhook_id: &str) -> Result<Webhook> {
        let request = ApiRequest::<()>::get(self.path(&format!("_webhooks/{webhook_id}")));
        self.http.request(request).await
    }

    /// Update a webhook registration.
    pub async fn update_webhook(
        &self,
        webhook_id: &str,
        params: UpdateWebhookParams,
    ) -> Result<Webhook> {
        let request = ApiRequest::put(self.path(&format!("_webhooks/{webhook_id}")), params);
        self.http.request(request).await
    }

    /// Delete a webhook.
    pub async fn delete_webhook(&self, webhook_id: &str) -> Result<()> {
        let request = ApiRequest::<()>::delete(self.path(&format!("_webhooks/{webhook_id}")));
        let _: Value = self.http.request_value(request).await?;
        Ok(())
    }

    /// Trigger a synthetic delivery to a webhook.
    pub async fn test_webhook(&self, webhook_id: &str) -> Result<DeliveryAttempt> {
        let request =
            ApiRequest::<()>::post(self.path(&format!("_webhooks/{webhook_id}/test")), ());
        self.http.request(request).await
    }

    // ------------------------------------------------------------------
    // Import / Export
    // ------------------------------------------------------------------

    /// Bulk-load documents into this collection.
    pub async fn import_documents<T: Serialize>(
        &self,
        documents: &[T],
        options: ImportOptions,
    ) -> Result<ImportReport> {
        let mut query = Vec::new();
        if let Some(policy) = options.on_conflict {
            query.push(("onConflict".to_string(), policy));
        }
        if let Some(field) = options.id_field {
            query.push(("idField".to_string(), field));
        }

        let request = ApiRequest::post(self.path("_import"), documents).with_query(query);
        self.http.request(request).await
    }

    /// Export all documents from this collection, optionally filtered.
    pub async fn export_documents(&self, filter: Option<Value>) -> Result<Vec<Document>> {
        let query = filter.as_ref().map(filter_pairs).unwrap_or_default();
        let request = ApiRequest::<()>::get(self.path("_export")).with_query(query);
        self.http.request(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;

    fn test_collection(project: &str, name: &str) -> Collection {
        let http =
            HttpClient::new(ClientConfig::new("jdb_sk_test_key").with_project(project)).unwrap();
        Collection::new(http, name.to_string())
    }

    #[test]
    fn test_path_building() {
        let users = test_collection("v1", "users");
        assert_eq!(users.path(""), "/v1/users");
        assert_eq!(users.path("abc123"), "/v1/users/abc123");
        assert_eq!(users.path("_bulk"), "/v1/users/_bulk");
        assert_eq!(users.path("doc1/versions/2"), "/v1/users/doc1/versions/2");
    }

    #[test]
    fn test_path_uses_configured_project() {
        let posts = test_collection("staging", "posts");
        assert_eq!(posts.path("_schema"), "/staging/posts/_schema");
    }
}
