//! Error types for the Tradier API client.
//!
//! The client is a faithful conduit: it never retries and never validates
//! input before sending, so every variant here carries as much of the
//! original failure as possible.

use serde_json::Value;
use thiserror::Error;

/// A specialized `Result` type for Tradier operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for all Tradier API operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Network-level transport failure (connect, TLS, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("API error: status={status}, message={message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Human-readable error message extracted from the body
        message: String,
        /// Raw response body; a JSON string when the body was not JSON
        body: Value,
    },

    /// The response did not contain the expected envelope key.
    #[error("Unexpected response shape: missing `{path}`")]
    UnexpectedShape {
        /// Dotted key path that could not be resolved
        path: String,
        /// The full payload as returned by the API
        body: Value,
    },

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Configuration error, e.g. an unknown endpoint name
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input provided to a function
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Returns `true` if the request failed in transit or the API rejected
    /// it with a non-2xx status.
    pub fn is_transport_error(&self) -> bool {
        matches!(self, Error::Http(_) | Error::Api { .. })
    }

    /// Returns `true` if this error indicates a client-side issue
    /// (bad request, bad configuration, etc.).
    pub fn is_client_error(&self) -> bool {
        match self {
            Error::Api { status, .. } => *status >= 400 && *status < 500,
            Error::InvalidInput(_) | Error::Config(_) => true,
            _ => false,
        }
    }

    /// Returns `true` if this error indicates a server-side issue.
    pub fn is_server_error(&self) -> bool {
        match self {
            Error::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// The HTTP status attached to this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Create an API error from a non-2xx response body.
    ///
    /// Tradier reports failures either as `{"fault": {"faultstring": ...}}`
    /// (gateway errors) or `{"errors": {"error": ...}}` (validation errors),
    /// and occasionally as plain text.
    pub(crate) fn from_api_response(status: u16, body: Value) -> Self {
        let message = body
            .get("fault")
            .and_then(|f| f.get("faultstring"))
            .and_then(|m| m.as_str())
            .map(String::from)
            .or_else(|| {
                body.get("errors").and_then(|e| e.get("error")).map(|e| match e {
                    Value::String(s) => s.clone(),
                    Value::Array(items) => items
                        .iter()
                        .filter_map(|i| i.as_str())
                        .collect::<Vec<_>>()
                        .join("; "),
                    other => other.to_string(),
                })
            })
            .or_else(|| body.as_str().filter(|s| !s.is_empty()).map(String::from))
            .unwrap_or_else(|| "Unknown API error".to_string());

        Error::Api {
            status,
            message,
            body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_classification() {
        let err = Error::from_api_response(503, Value::Null);
        assert!(err.is_transport_error());
        assert!(err.is_server_error());
        assert!(!Error::Config("bad".into()).is_transport_error());
    }

    #[test]
    fn test_client_error() {
        assert!(Error::Config("unknown endpoint".into()).is_client_error());
        assert!(Error::from_api_response(400, Value::Null).is_client_error());
        assert!(!Error::from_api_response(500, Value::Null).is_client_error());
    }

    #[test]
    fn test_from_fault_response() {
        let body = serde_json::json!({
            "fault": {
                "faultstring": "Invalid Access Token",
                "detail": { "errorcode": "keymanagement.service.invalid_access_token" }
            }
        });

        match Error::from_api_response(401, body.clone()) {
            Error::Api {
                status,
                message,
                body: raw,
            } => {
                assert_eq!(status, 401);
                assert_eq!(message, "Invalid Access Token");
                assert_eq!(raw, body);
            }
            _ => panic!("Expected Api error"),
        }
    }

    #[test]
    fn test_from_errors_response() {
        let body = serde_json::json!({
            "errors": { "error": ["Backoffice rejected override of the order.", "InitialMargin"] }
        });

        let err = Error::from_api_response(400, body);
        assert_eq!(err.status(), Some(400));
        match err {
            Error::Api { message, .. } => {
                assert_eq!(message, "Backoffice rejected override of the order.; InitialMargin");
            }
            _ => panic!("Expected Api error"),
        }
    }

    #[test]
    fn test_plain_text_body() {
        let err = Error::from_api_response(401, Value::String("Invalid Access Token".into()));
        match err {
            Error::Api { message, .. } => assert_eq!(message, "Invalid Access Token"),
            _ => panic!("Expected Api error"),
        }
    }
}
