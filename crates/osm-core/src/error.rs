//! Error types for OSM operations.
//!
//! The orchestrator's HTTP status codes map onto a small, fixed taxonomy that callers
//! can match on. Resource-scoped operations narrow the generic
//! [`Error::ResourceNotFound`] into a variant carrying the identifier that was asked for.

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Main error type for OSM operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The orchestrator rejected the request as malformed (HTTP 400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Missing, invalid or expired credentials (HTTP 401)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Generic not-found (HTTP 404)
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    /// Network service instance not found
    #[error("NS instance `{ns_id}` not found")]
    NsNotFound {
        /// Requested NS instance identifier
        ns_id: String,
    },

    /// VNF instance record not found
    #[error("VNF instance `{vnf_id}` not found")]
    VnfNotFound {
        /// Requested VNF record identifier
        vnf_id: String,
    },

    /// VNF package not found
    #[error("VNF package `{vnfpkg_id}` not found")]
    VnfPkgNotFound {
        /// Requested VNF package identifier
        vnfpkg_id: String,
    },

    /// NS lifecycle operation occurrence not found
    #[error("NS LCM operation `{ns_op_id}` not found")]
    NsOpNotFound {
        /// Requested operation occurrence identifier
        ns_op_id: String,
    },

    /// Any other non-success status, or a transport-level failure
    #[error("Server error: {}", render_detail(.detail))]
    ServerError {
        /// HTTP status, absent for network failures
        status: Option<u16>,
        /// Decoded error body, raw text, or the underlying failure message
        detail: Value,
    },

    /// A success body could not be decoded
    #[error("Failed to decode response: {0}")]
    DecodeError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Invalid endpoint
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

/// Specialized result type for OSM operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Structured error response for serialization.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ErrorResponse {
    /// Error details
    pub error: ErrorDetail,
    /// HTTP status the adaptation layer should answer with
    pub status: u16,
}

/// Error detail structure.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ErrorDetail {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

fn render_detail(detail: &Value) -> String {
    match detail {
        Value::String(text) => text.clone(),
        Value::Null => "no details".to_string(),
        other => other.to_string(),
    }
}

impl Error {
    /// Build a [`Error::ServerError`] for a failure that never produced a response.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::ServerError {
            status: None,
            detail: Value::String(message.into()),
        }
    }

    /// Replace a generic [`Error::ResourceNotFound`] with a resource-specific error.
    ///
    /// Every other error is returned unchanged.
    #[must_use]
    pub fn or_not_found<F>(self, specific: F) -> Self
    where
        F: FnOnce() -> Self,
    {
        match self {
            Self::ResourceNotFound(_) => specific(),
            other => other,
        }
    }

    /// Returns true for the generic and every resource-specific not-found variant.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ResourceNotFound(_)
                | Self::NsNotFound { .. }
                | Self::VnfNotFound { .. }
                | Self::VnfPkgNotFound { .. }
                | Self::NsOpNotFound { .. }
        )
    }

    /// Returns the error code for this error type.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::ResourceNotFound(_) => "RESOURCE_NOT_FOUND",
            Self::NsNotFound { .. } => "NS_NOT_FOUND",
            Self::VnfNotFound { .. } => "VNF_NOT_FOUND",
            Self::VnfPkgNotFound { .. } => "VNF_PKG_NOT_FOUND",
            Self::NsOpNotFound { .. } => "NS_OP_NOT_FOUND",
            Self::ServerError { .. } => "SERVER_ERROR",
            Self::DecodeError(_) => "DECODE_ERROR",
            Self::ConfigError(_) => "CONFIG_ERROR",
            Self::InvalidEndpoint(_) => "INVALID_ENDPOINT",
        }
    }

    /// HTTP status the adaptation layer reports for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::BadRequest(_) => 400,
            Self::Unauthorized(_) => 401,
            Self::ResourceNotFound(_)
            | Self::NsNotFound { .. }
            | Self::VnfNotFound { .. }
            | Self::VnfPkgNotFound { .. }
            | Self::NsOpNotFound { .. } => 404,
            Self::ServerError { .. }
            | Self::DecodeError(_)
            | Self::ConfigError(_)
            | Self::InvalidEndpoint(_) => 500,
        }
    }

    /// Converts the error into an `ErrorResponse`.
    #[must_use]
    pub fn into_error_response(self) -> ErrorResponse {
        let status = self.status_code();
        let code = self.error_code().to_string();
        let message = self.to_string();
        let details = match self {
            Self::ServerError { detail, .. } if !detail.is_null() => Some(detail),
            _ => None,
        };

        ErrorResponse {
            error: ErrorDetail {
                code,
                message,
                details,
            },
            status,
        }
    }

    /// Returns true if this error should be logged as a serious error.
    #[must_use]
    pub const fn should_log(&self) -> bool {
        matches!(
            self,
            Self::ServerError { .. } | Self::ConfigError(_) | Self::DecodeError(_)
        )
    }
}

// Conversions from external error types
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::ServerError {
            status: err.status().map(|status| status.as_u16()),
            detail: Value::String(err.to_string()),
        }
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidEndpoint(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::DecodeError(err.to_string())
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Self::DecodeError(err.to_string())
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::ConfigError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_codes() {
        assert_eq!(
            Error::BadRequest("test".to_string()).error_code(),
            "BAD_REQUEST"
        );
        assert_eq!(
            Error::Unauthorized("test".to_string()).error_code(),
            "UNAUTHORIZED"
        );
        assert_eq!(
            Error::ResourceNotFound("test".to_string()).error_code(),
            "RESOURCE_NOT_FOUND"
        );
        assert_eq!(
            Error::NsNotFound {
                ns_id: "ns".to_string()
            }
            .error_code(),
            "NS_NOT_FOUND"
        );
        assert_eq!(
            Error::VnfNotFound {
                vnf_id: "vnf".to_string()
            }
            .error_code(),
            "VNF_NOT_FOUND"
        );
        assert_eq!(
            Error::VnfPkgNotFound {
                vnfpkg_id: "pkg".to_string()
            }
            .error_code(),
            "VNF_PKG_NOT_FOUND"
        );
        assert_eq!(
            Error::NsOpNotFound {
                ns_op_id: "op".to_string()
            }
            .error_code(),
            "NS_OP_NOT_FOUND"
        );
        assert_eq!(Error::transport("refused").error_code(), "SERVER_ERROR");
        assert_eq!(
            Error::DecodeError("test".to_string()).error_code(),
            "DECODE_ERROR"
        );
        assert_eq!(
            Error::ConfigError("test".to_string()).error_code(),
            "CONFIG_ERROR"
        );
        assert_eq!(
            Error::InvalidEndpoint("test".to_string()).error_code(),
            "INVALID_ENDPOINT"
        );
    }

    #[test]
    fn test_error_display() {
        let err = Error::NsNotFound {
            ns_id: "abc123".to_string(),
        };
        assert_eq!(err.to_string(), "NS instance `abc123` not found");

        let err = Error::transport("connection refused");
        assert_eq!(err.to_string(), "Server error: connection refused");

        let err = Error::ServerError {
            status: Some(500),
            detail: json!({"detail": "boom"}),
        };
        assert_eq!(err.to_string(), r#"Server error: {"detail":"boom"}"#);
    }

    #[test]
    fn test_or_not_found_narrows_only_generic_not_found() {
        let narrowed = Error::ResourceNotFound(String::new()).or_not_found(|| Error::VnfNotFound {
            vnf_id: "vnf-1".to_string(),
        });
        assert_eq!(
            narrowed,
            Error::VnfNotFound {
                vnf_id: "vnf-1".to_string()
            }
        );

        let untouched = Error::Unauthorized("expired".to_string()).or_not_found(|| {
            Error::VnfNotFound {
                vnf_id: "vnf-1".to_string(),
            }
        });
        assert_eq!(untouched, Error::Unauthorized("expired".to_string()));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(Error::BadRequest(String::new()).status_code(), 400);
        assert_eq!(Error::Unauthorized(String::new()).status_code(), 401);
        assert_eq!(
            Error::NsOpNotFound {
                ns_op_id: "op".to_string()
            }
            .status_code(),
            404
        );
        assert_eq!(Error::transport("down").status_code(), 500);
    }

    #[test]
    fn test_is_not_found() {
        assert!(Error::ResourceNotFound(String::new()).is_not_found());
        assert!(Error::NsNotFound {
            ns_id: "ns".to_string()
        }
        .is_not_found());
        assert!(!Error::BadRequest(String::new()).is_not_found());
    }

    #[test]
    fn test_into_error_response() {
        let response = Error::ServerError {
            status: Some(503),
            detail: json!({"detail": "maintenance"}),
        }
        .into_error_response();

        assert_eq!(response.status, 500);
        assert_eq!(response.error.code, "SERVER_ERROR");
        assert_eq!(response.error.details, Some(json!({"detail": "maintenance"})));

        let response = Error::NsNotFound {
            ns_id: "abc".to_string(),
        }
        .into_error_response();
        assert_eq!(response.status, 404);
        assert!(response.error.details.is_none());

        let serialized = serde_json::to_string(&response).unwrap();
        assert!(!serialized.contains("details"));
    }

    #[test]
    fn test_should_log() {
        assert!(Error::transport("down").should_log());
        assert!(Error::ConfigError("test".to_string()).should_log());
        assert!(!Error::ResourceNotFound("test".to_string()).should_log());
        assert!(!Error::BadRequest("test".to_string()).should_log());
    }

    #[test]
    fn test_from_url_parse_error() {
        let err = url::Url::parse("not a url").unwrap_err();
        let osm_err: Error = err.into();
        assert!(matches!(osm_err, Error::InvalidEndpoint(_)));
    }

    #[test]
    fn test_from_serde_errors() {
        let err = serde_json::from_str::<Value>("{invalid json}").unwrap_err();
        assert!(matches!(Error::from(err), Error::DecodeError(_)));

        let err = serde_yaml::from_str::<serde_yaml::Value>("key: [unclosed").unwrap_err();
        assert!(matches!(Error::from(err), Error::DecodeError(_)));
    }
}
