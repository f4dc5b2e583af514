//! Request and response models for the jsondb.cloud client.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ValidationIssue;

/// A stored document.
///
/// Documents are opaque JSON objects; the server adds `_id`, `$createdAt`,
/// `$updatedAt`, and `$version` fields on write.
pub type Document = Value;

/// Pagination metadata from a list response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    /// Total number of documents matching the query.
    #[serde(default)]
    pub total: u64,
    /// Maximum number of documents returned per page.
    #[serde(default = "default_page_limit")]
    pub limit: u64,
    /// Number of documents skipped.
    #[serde(default)]
    pub offset: u64,
    /// Whether more documents exist beyond this page.
    #[serde(rename = "hasMore", default)]
    pub has_more: bool,
}

fn default_page_limit() -> u64 {
    25
}

impl Default for Meta {
    fn default() -> Self {
        Self {
            total: 0,
            limit: default_page_limit(),
            offset: 0,
            has_more: false,
        }
    }
}

/// Paginated page of documents returned by [`Collection::list`](crate::Collection::list)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResult {
    /// Documents on this page, in server order.
    #[serde(default)]
    pub data: Vec<Document>,
    /// Pagination metadata.
    #[serde(default)]
    pub meta: Meta,
}

impl ListResult {
    /// Number of documents on this page.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether this page is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterate over the documents on this page.
    pub fn iter(&self) -> std::slice::Iter<'_, Document> {
        self.data.iter()
    }
}

impl IntoIterator for ListResult {
    type Item = Document;
    type IntoIter = std::vec::IntoIter<Document>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.into_iter()
    }
}

/// HTTP method of a single bulk operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BulkMethod {
    Post,
    Put,
    Patch,
    Delete,
}

/// A single operation inside a `_bulk` request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkOperation {
    pub method: BulkMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Document>,
}

impl BulkOperation {
    /// Create a new document.
    pub fn create(body: Document) -> Self {
        Self {
            method: BulkMethod::Post,
            id: None,
            body: Some(body),
        }
    }

    /// Replace a document entirely.
    pub fn update<S: Into<String>>(id: S, body: Document) -> Self {
        Self {
            method: BulkMethod::Put,
            id: Some(id.into()),
            body: Some(body),
        }
    }

    /// Merge-patch a document.
    pub fn patch<S: Into<String>>(id: S, body: Document) -> Self {
        Self {
            method: BulkMethod::Patch,
            id: Some(id.into()),
            body: Some(body),
        }
    }

    /// Delete a document.
    pub fn delete<S: Into<String>>(id: S) -> Self {
        Self {
            method: BulkMethod::Delete,
            id: Some(id.into()),
            body: None,
        }
    }
}

/// Result of a single bulk operation, in input order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkResultItem {
    /// Per-operation HTTP status.
    #[serde(default)]
    pub status: u16,
    /// Identifier of the affected document, when the operation has one.
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    /// Whether the operation succeeded.
    #[serde(default)]
    pub ok: bool,
    /// Error message for failed operations.
    #[serde(default)]
    pub error: Option<String>,
}

/// Summary counts for a bulk operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkSummary {
    pub total: u64,
    pub succeeded: u64,
    pub failed: u64,
}

/// Result of a bulk operation.
///
/// `results` holds exactly one entry per input operation, in input order;
/// partial failure is reported per item, never as an aggregate error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkResult {
    #[serde(default)]
    pub results: Vec<BulkResultItem>,
    pub summary: BulkSummary,
}

/// Kind of a JSON Patch operation (RFC 6902)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchOpKind {
    Add,
    Remove,
    Replace,
    Move,
    Copy,
    Test,
}

/// A single JSON Patch operation per RFC 6902
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonPatchOp {
    pub op: PatchOpKind,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(rename = "from", skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
}

impl JsonPatchOp {
    pub fn add<S: Into<String>>(path: S, value: Value) -> Self {
        Self {
            op: PatchOpKind::Add,
            path: path.into(),
            value: Some(value),
            from: None,
        }
    }

    pub fn remove<S: Into<String>>(path: S) -> Self {
        Self {
            op: PatchOpKind::Remove,
            path: path.into(),
            value: None,
            from: None,
        }
    }

    pub fn replace<S: Into<String>>(path: S, value: Value) -> Self {
        Self {
            op: PatchOpKind::Replace,
            path: path.into(),
            value: Some(value),
            from: None,
        }
    }

    pub fn mv<S: Into<String>>(from: S, path: S) -> Self {
        Self {
            op: PatchOpKind::Move,
            path: path.into(),
            value: None,
            from: Some(from.into()),
        }
    }

    pub fn copy<S: Into<String>>(from: S, path: S) -> Self {
        Self {
            op: PatchOpKind::Copy,
            path: path.into(),
            value: None,
            from: Some(from.into()),
        }
    }

    pub fn test<S: Into<String>>(path: S, value: Value) -> Self {
        Self {
            op: PatchOpKind::Test,
            path: path.into(),
            value: Some(value),
            from: None,
        }
    }
}

/// One entry in a document's version history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionEntry {
    pub version: u64,
    /// Write that produced this version, e.g. `create`, `update`, `restore`.
    #[serde(default)]
    pub action: Option<String>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<String>,
}

/// Version history of a document, newest first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionList {
    #[serde(default)]
    pub versions: Vec<VersionEntry>,
    #[serde(default)]
    pub meta: Option<Meta>,
}

/// Structured delta between two document versions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionDiff {
    /// Fields present only in the newer version.
    #[serde(default)]
    pub added: Value,
    /// Fields present only in the older version.
    #[serde(default)]
    pub removed: Value,
    /// Fields present in both with differing values, as `{from, to}` pairs.
    #[serde(default)]
    pub changed: Value,
}

/// A webhook registration on a collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Webhook {
    #[serde(rename = "_id")]
    pub id: String,
    /// Target URL invoked on matching events.
    pub url: String,
    /// Event filter, e.g. `document.created`.
    #[serde(default)]
    pub events: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(rename = "recentDeliveries", default)]
    pub recent_deliveries: Vec<Value>,
}

/// Parameters for registering a webhook
#[derive(Debug, Clone, Serialize)]
pub struct CreateWebhookParams {
    pub url: String,
    pub events: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
}

impl CreateWebhookParams {
    /// Register `url` for the given event names.
    pub fn new<S, I, E>(url: S, events: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = E>,
        E: Into<String>,
    {
        Self {
            url: url.into(),
            events: events.into_iter().map(Into::into).collect(),
            description: None,
            secret: None,
        }
    }

    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Secret used to sign deliveries.
    pub fn with_secret<S: Into<String>>(mut self, secret: S) -> Self {
        self.secret = Some(secret.into());
        self
    }
}

/// Partial update of a webhook registration
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateWebhookParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    /// `active` or `paused`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl UpdateWebhookParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_url<S: Into<String>>(mut self, url: S) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_events<I, E>(mut self, events: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<String>,
    {
        self.events = Some(events.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_secret<S: Into<String>>(mut self, secret: S) -> Self {
        self.secret = Some(secret.into());
        self
    }

    pub fn with_status<S: Into<String>>(mut self, status: S) -> Self {
        self.status = Some(status.into());
        self
    }
}

/// Outcome of a synthetic webhook delivery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryAttempt {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(rename = "statusCode", default)]
    pub status_code: Option<u16>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Result of validating a document against the collection schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    #[serde(default)]
    pub errors: Vec<ValidationIssue>,
}

/// Options for [`Collection::import_documents`](crate::Collection::import_documents)
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    /// Conflict policy when an imported id already exists, e.g. `skip`.
    pub on_conflict: Option<String>,
    /// Source field to use as the document id.
    pub id_field: Option<String>,
}

impl ImportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_on_conflict<S: Into<String>>(mut self, policy: S) -> Self {
        self.on_conflict = Some(policy.into());
        self
    }

    pub fn with_id_field<S: Into<String>>(mut self, field: S) -> Self {
        self.id_field = Some(field.into());
        self
    }
}

/// Result of importing a single document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportResultItem {
    #[serde(default)]
    pub status: u16,
    #[serde(default)]
    pub document: Option<Document>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Per-document outcomes of an import, in input order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportReport {
    #[serde(default)]
    pub results: Vec<ImportResultItem>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bulk_operation_serialization() {
        let op = BulkOperation::create(json!({"name": "Alice"}));
        let value = serde_json::to_value(&op).unwrap();
        assert_eq!(value, json!({"method": "POST", "body": {"name": "Alice"}}));

        let op = BulkOperation::delete("old-doc");
        let value = serde_json::to_value(&op).unwrap();
        assert_eq!(value, json!({"method": "DELETE", "id": "old-doc"}));
    }

    #[test]
    fn test_json_patch_serialization() {
        let ops = vec![
            JsonPatchOp::replace("/age", json!(31)),
            JsonPatchOp::remove("/legacy"),
            JsonPatchOp::mv("/old", "/new"),
        ];
        let value = serde_json::to_value(&ops).unwrap();
        assert_eq!(
            value,
            json!([
                {"op": "replace", "path": "/age", "value": 31},
                {"op": "remove", "path": "/legacy"},
                {"op": "move", "path": "/new", "from": "/old"},
            ])
        );
    }

    #[test]
    fn test_list_result_deserialization() {
        let body = json!({
            "data": [{"_id": "a"}, {"_id": "b"}],
            "meta": {"total": 2, "limit": 25, "offset": 0, "hasMore": false}
        });
        let result: ListResult = serde_json::from_value(body).unwrap();

        assert_eq!(result.len(), 2);
        assert!(!result.meta.has_more);
        let ids: Vec<&str> = result.iter().map(|d| d["_id"].as_str().unwrap()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_list_result_missing_meta_defaults() {
        let result: ListResult = serde_json::from_value(json!({"data": []})).unwrap();
        assert!(result.is_empty());
        assert_eq!(result.meta.limit, 25);
    }

    #[test]
    fn test_bulk_result_deserialization() {
        let body = json!({
            "results": [
                {"status": 201, "_id": "id1", "ok": true},
                {"status": 400, "ok": false, "error": "validation failed"},
            ],
            "summary": {"total": 2, "succeeded": 1, "failed": 1}
        });
        let result: BulkResult = serde_json::from_value(body).unwrap();

        assert_eq!(result.results.len(), 2);
        assert!(result.results[0].ok);
        assert_eq!(result.results[0].id.as_deref(), Some("id1"));
        assert!(!result.results[1].ok);
        assert_eq!(result.results[1].error.as_deref(), Some("validation failed"));
        assert_eq!(
            result.summary,
            BulkSummary {
                total: 2,
                succeeded: 1,
                failed: 1
            }
        );
    }

    #[test]
    fn test_webhook_deserialization() {
        let body = json!({
            "_id": "wh1",
            "url": "https://example.com/hook",
            "events": ["document.created"],
            "status": "active"
        });
        let webhook: Webhook = serde_json::from_value(body).unwrap();

        assert_eq!(webhook.id, "wh1");
        assert_eq!(webhook.events, vec!["document.created"]);
        assert_eq!(webhook.status.as_deref(), Some("active"));
        assert!(webhook.recent_deliveries.is_empty());
    }

    #[test]
    fn test_create_webhook_params_skips_empty_options() {
        let params = CreateWebhookParams::new("https://example.com/hook", ["document.created"]);
        let value = serde_json::to_value(&params).unwrap();
        assert_eq!(
            value,
            json!({"url": "https://example.com/hook", "events": ["document.created"]})
        );
    }

    #[test]
    fn test_version_diff_deserialization() {
        let body = json!({
            "added": {},
            "removed": {},
            "changed": {"name": {"from": "a", "to": "b"}}
        });
        let diff: VersionDiff = serde_json::from_value(body).unwrap();
        assert_eq!(diff.changed["name"]["to"], "b");
    }
}
