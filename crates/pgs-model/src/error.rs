//! Model and remote error types.

use thiserror::Error;

/// Errors raised while interpreting domain data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ModelError {
    /// The well-known-text geometry could not be parsed.
    #[error("invalid WKT geometry: {0}")]
    WktParse(String),

    /// The geometry parsed, but is not an areal polygon.
    #[error("unsupported geometry type: {0} (expected POLYGON)")]
    UnsupportedGeometry(&'static str),
}

/// Failure of a remote CRUD or fetch call.
///
/// Non-2xx responses carry the HTTP status; transport-level failures
/// (connection refused, timeout) carry status `0` so one taxonomy covers
/// both cases.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("remote call failed (status {status}): {message}")]
pub struct RemoteError {
    /// HTTP status code, or `0` for transport failures.
    pub status: u16,
    /// Response body or transport error description.
    pub message: String,
}

impl RemoteError {
    /// A non-2xx HTTP response.
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// A transport-level failure with no HTTP status.
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            status: 0,
            message: message.into(),
        }
    }
}

/// Result type alias for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;
