//! Common test utilities and helpers.

use jsondb_cloud::ClientConfig;
use serde_json::{json, Value};

pub const API_KEY: &str = "jdb_sk_test_aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";

/// Client configuration pointed at a mock server, with backoff disabled so
/// retry tests run instantly.
pub fn test_config(base_url: &str) -> ClientConfig {
    ClientConfig::new(API_KEY)
        .with_base_url(base_url)
        .with_retry_base_delay(0.0)
        .with_retry_max_delay(0.0)
}

/// Build a typical document response body.
pub fn doc_response(doc_id: &str, fields: Value) -> Value {
    let mut doc = json!({
        "_id": doc_id,
        "$createdAt": "2025-01-01T00:00:00.000Z",
        "$updatedAt": "2025-01-01T00:00:00.000Z",
        "$version": 1,
    });
    if let (Some(doc_map), Some(field_map)) = (doc.as_object_mut(), fields.as_object()) {
        for (key, value) in field_map {
            doc_map.insert(key.clone(), value.clone());
        }
    }
    doc
}

/// Build a typical list response body.
pub fn list_response(docs: Vec<Value>, total: u64, limit: u64, offset: u64) -> Value {
    json!({
        "data": docs,
        "meta": {
            "total": total,
            "limit": limit,
            "offset": offset,
            "hasMore": total > offset + limit,
        },
    })
}

/// Build a typical API error response body.
pub fn error_response(code: &str, message: &str) -> Value {
    json!({"error": {"code": code, "message": message}})
}

/// Setup test logging (useful for debugging tests)
#[allow(dead_code)]
pub fn setup_test_logging() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}
