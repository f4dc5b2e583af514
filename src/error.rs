//! Error types for the jsondb.cloud client.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, JsonDbError>;

/// A single schema validation failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// JSON pointer to the offending field, e.g. `/email`.
    #[serde(default)]
    pub path: String,
    /// Human-readable description of the failure.
    #[serde(default)]
    pub message: String,
    /// JSON Schema keyword that failed, e.g. `required`.
    #[serde(default)]
    pub keyword: Option<String>,
}

/// Main error type for jsondb.cloud operations
#[derive(Error, Debug)]
pub enum JsonDbError {
    /// Document or resource does not exist (HTTP 404)
    #[error("not found: {message}")]
    NotFound {
        message: String,
        /// Identifier of the missing document, when the API reports it.
        document_id: Option<String>,
    },

    /// API key is missing or invalid (HTTP 401)
    #[error("unauthorized: {message}")]
    Unauthorized { message: String },

    /// API key lacks the required scope (HTTP 403)
    #[error("forbidden: {message}")]
    Forbidden { message: String },

    /// Write conflicts with an existing document (HTTP 409)
    #[error("conflict: {message}")]
    Conflict { message: String },

    /// Document fails schema validation (HTTP 400 with VALIDATION_FAILED)
    #[error("validation failed: {message}")]
    Validation {
        message: String,
        errors: Vec<ValidationIssue>,
    },

    /// Document exceeds the maximum allowed size (HTTP 413)
    #[error("document too large: {message}")]
    DocumentTooLarge { message: String },

    /// Plan quota exceeded (HTTP 429 with QUOTA_EXCEEDED). Never retried.
    #[error("quota exceeded: {message}")]
    QuotaExceeded {
        message: String,
        limit: Option<u64>,
        current: Option<u64>,
    },

    /// Rate limit exceeded (HTTP 429 with RATE_LIMITED), after retries
    #[error("rate limited: {message}")]
    RateLimited { message: String },

    /// Server-side failure (HTTP 5xx), after retries
    #[error("server error: {message}")]
    Server { message: String },

    /// Any other non-success API response
    #[error("API error (status {status}, code {code}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    /// HTTP client errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors
    #[error("configuration error: {message}")]
    Config { message: String },
}

impl JsonDbError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// HTTP status associated with this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound { .. } => Some(404),
            Self::Unauthorized { .. } => Some(401),
            Self::Forbidden { .. } => Some(403),
            Self::Conflict { .. } => Some(409),
            Self::Validation { .. } => Some(400),
            Self::DocumentTooLarge { .. } => Some(413),
            Self::QuotaExceeded { .. } | Self::RateLimited { .. } => Some(429),
            Self::Server { .. } => Some(500),
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Map an API error response body onto the error taxonomy.
    ///
    /// The API reports failures as `{"error": {"code", "message", "details"}}`;
    /// a missing or malformed envelope falls back to a generic [`Self::Api`].
    pub(crate) fn from_response(status: u16, body: &Value) -> Self {
        let error = body.get("error").and_then(Value::as_object);
        let code = error
            .and_then(|e| e.get("code"))
            .and_then(Value::as_str)
            .unwrap_or("UNKNOWN")
            .to_string();
        let message = error
            .and_then(|e| e.get("message"))
            .and_then(Value::as_str)
            .unwrap_or("Unknown error")
            .to_string();
        let details = error.and_then(|e| e.get("details"));

        match status {
            401 => Self::Unauthorized { message },
            403 => Self::Forbidden { message },
            404 => {
                let document_id = details
                    .and_then(|d| d.get("documentId").or_else(|| d.get("document_id")))
                    .and_then(Value::as_str)
                    .map(String::from);
                Self::NotFound {
                    message,
                    document_id,
                }
            }
            409 => Self::Conflict { message },
            413 => Self::DocumentTooLarge { message },
            429 => {
                if code == "RATE_LIMITED" {
                    Self::RateLimited { message }
                } else {
                    Self::QuotaExceeded {
                        message,
                        limit: details.and_then(|d| d.get("limit")).and_then(Value::as_u64),
                        current: details
                            .and_then(|d| d.get("current"))
                            .and_then(Value::as_u64),
                    }
                }
            }
            400 if code == "VALIDATION_FAILED" => {
                let errors = details
                    .and_then(|d| d.get("errors"))
                    .and_then(|e| serde_json::from_value(e.clone()).ok())
                    .unwrap_or_default();
                Self::Validation { message, errors }
            }
            s if s >= 500 => Self::Server { message },
            _ => Self::Api {
                status,
                code,
                message,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn error_body(code: &str, message: &str, details: Value) -> Value {
        json!({"error": {"code": code, "message": message, "details": details}})
    }

    #[test]
    fn test_not_found_carries_document_id() {
        let body = error_body(
            "DOCUMENT_NOT_FOUND",
            "not found",
            json!({"documentId": "abc123"}),
        );
        let err = JsonDbError::from_response(404, &body);

        match err {
            JsonDbError::NotFound {
                document_id: Some(id),
                ..
            } => assert_eq!(id, "abc123"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_quota_exceeded_carries_limits() {
        let body = error_body(
            "QUOTA_EXCEEDED",
            "plan limit reached",
            json!({"limit": 1000, "current": 1000}),
        );
        let err = JsonDbError::from_response(429, &body);

        match err {
            JsonDbError::QuotaExceeded { limit, current, .. } => {
                assert_eq!(limit, Some(1000));
                assert_eq!(current, Some(1000));
            }
            other => panic!("expected QuotaExceeded, got {other:?}"),
        }
    }

    #[test]
    fn test_rate_limited_code_on_429() {
        let body = error_body("RATE_LIMITED", "slow down", json!({}));
        let err = JsonDbError::from_response(429, &body);
        assert!(matches!(err, JsonDbError::RateLimited { .. }));
    }

    #[test]
    fn test_validation_errors_parsed() {
        let body = error_body(
            "VALIDATION_FAILED",
            "Schema validation failed",
            json!({"errors": [{"path": "/email", "message": "is required", "keyword": "required"}]}),
        );
        let err = JsonDbError::from_response(400, &body);

        match err {
            JsonDbError::Validation { errors, .. } => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].path, "/email");
                assert_eq!(errors[0].keyword.as_deref(), Some("required"));
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_plain_400_is_generic_api_error() {
        let body = error_body("BAD_REQUEST", "nope", json!({}));
        let err = JsonDbError::from_response(400, &body);
        assert!(matches!(err, JsonDbError::Api { status: 400, .. }));
    }

    #[test]
    fn test_5xx_maps_to_server() {
        let err = JsonDbError::from_response(503, &Value::Null);
        assert!(matches!(err, JsonDbError::Server { .. }));
    }

    #[test]
    fn test_malformed_body_falls_back() {
        let err = JsonDbError::from_response(418, &json!("teapot"));
        match err {
            JsonDbError::Api { status, code, .. } => {
                assert_eq!(status, 418);
                assert_eq!(code, "UNKNOWN");
            }
            other => panic!("expected Api, got {other:?}"),
        }
    }

    #[test]
    fn test_status_accessor() {
        let body = error_body("UNAUTHORIZED", "bad key", json!({}));
        let err = JsonDbError::from_response(401, &body);
        assert_eq!(err.status(), Some(401));
        assert!(format!("{err}").contains("bad key"));
    }
}
