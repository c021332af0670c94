//! Error types for sending requests and consuming responses.
//!
//! # Error Handling
//!
//! - [`TransportError`]: the transport could not produce a response, or a
//!   response body stream failed mid-read
//! - [`EncodingError`]: the payload could not be serialized
//! - [`DecodeError`]: the response body could not be decoded
//! - [`PersistError`]: writing a response body to disk failed
//! - [`MaxHttpRetriesExceededError`]: a bounded 429 retry loop ran out
//! - [`HttpError`]: unified error type returned by the requester
//!
//! Non-2xx statuses are never errors here. Apart from the 429 retry path,
//! responses are returned as they arrived.
//!
//! # Example
//!
//! ```rust,ignore
//! use just_requester::HttpError;
//!
//! match requester.send("GET", url, &headers, None::<&()>).await {
//!     Ok(response) => println!("status {}", response.code),
//!     Err(HttpError::Config(e)) => println!("rejected before sending: {e}"),
//!     Err(HttpError::Transport(e)) => println!("network failure: {e}"),
//!     Err(e) => println!("other failure: {e}"),
//! }
//! ```

use std::path::PathBuf;

use thiserror::Error;

use crate::error::ConfigError;

/// Error returned when the transport fails to deliver a response.
///
/// Transport failures are never retried.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network, DNS, TLS or timeout failure inside reqwest.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Failure reported by a custom [`Transport`](crate::clients::Transport).
    #[error("Transport error: {0}")]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

impl TransportError {
    /// Wraps an arbitrary error raised by a custom transport.
    pub fn other(error: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Other(error.into())
    }
}

/// Error returned when a payload cannot be serialized.
#[derive(Debug, Error)]
pub enum EncodingError {
    /// JSON serialization failed.
    #[error("Failed to encode JSON payload: {0}")]
    Json(#[source] serde_json::Error),

    /// XML serialization failed.
    #[error("Failed to encode XML payload: {0}")]
    Xml(#[source] quick_xml::DeError),
}

/// Error returned when a response body cannot be decoded.
///
/// Codec errors are carried unchanged.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The body is not valid JSON for the destination type.
    #[error("Failed to decode JSON response: {0}")]
    Json(#[source] serde_json::Error),

    /// The body is not valid XML for the destination type.
    #[error("Failed to decode XML response: {0}")]
    Xml(#[source] quick_xml::DeError),

    /// Reading the body stream failed.
    #[error("Failed to read response body: {0}")]
    Body(#[source] TransportError),
}

/// Error returned when a response body cannot be written to disk.
#[derive(Debug, Error)]
pub enum PersistError {
    /// A filesystem operation failed.
    #[error("Failed to {operation} '{}': {source}", .path.display())]
    Io {
        /// The operation that failed (`open`, `write`, `flush`).
        operation: &'static str,
        /// The file being written.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Reading the body stream failed.
    #[error("Failed to read response body: {0}")]
    Body(#[source] TransportError),
}

/// Error returned when a bounded 429 retry loop is exhausted.
#[derive(Debug, Error)]
#[error("Exceeded maximum retry count of {tries}. Last status: {code}")]
pub struct MaxHttpRetriesExceededError {
    /// The HTTP status code of the last response.
    pub code: u16,
    /// The number of dispatches that were made.
    pub tries: u32,
}

/// Unified error type for all requester operations.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The call was rejected before any I/O.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The payload could not be serialized.
    #[error(transparent)]
    Encoding(#[from] EncodingError),

    /// The transport failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The response body could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The response body could not be persisted.
    #[error(transparent)]
    Persist(#[from] PersistError),

    /// Bounded retry attempts exhausted.
    #[error(transparent)]
    MaxRetries(#[from] MaxHttpRetriesExceededError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_retries_error_includes_retry_count() {
        let error = MaxHttpRetriesExceededError { code: 429, tries: 3 };
        let message = error.to_string();
        assert!(message.contains('3'));
        assert!(message.contains("429"));
        assert!(message.contains("Exceeded maximum retry count"));
    }

    #[test]
    fn test_persist_error_names_operation_and_path() {
        let error = PersistError::Io {
            operation: "open",
            path: PathBuf::from("/tmp/out.xml"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let message = error.to_string();
        assert!(message.contains("open"));
        assert!(message.contains("/tmp/out.xml"));
        assert!(message.contains("denied"));
    }

    #[test]
    fn test_config_error_is_transparent() {
        let error: HttpError = ConfigError::MissingSoapAction.into();
        assert_eq!(error.to_string(), ConfigError::MissingSoapAction.to_string());
        assert!(matches!(error, HttpError::Config(ConfigError::MissingSoapAction)));
    }

    #[test]
    fn test_transport_other_wraps_message() {
        let error = TransportError::other("connection reset");
        assert_eq!(error.to_string(), "Transport error: connection reset");
    }

    #[test]
    fn test_error_types_implement_std_error() {
        let _: &dyn std::error::Error = &HttpError::Config(ConfigError::MissingDestination);
        let _: &dyn std::error::Error = &MaxHttpRetriesExceededError { code: 429, tries: 2 };
        let _: &dyn std::error::Error = &TransportError::other("boom");
    }
}
