//! Configuration error types for the requester.
//!
//! This module contains [`ConfigError`], returned whenever a request or a
//! consumption call is rejected before any I/O happens: an unknown encoding
//! token, a SOAP call without its `SOAPAction` header, a missing decode
//! destination, and so on.
//!
//! # Example
//!
//! ```rust
//! use just_requester::{ConfigError, EncodingKind};
//!
//! let result: Result<EncodingKind, _> = "yaml".parse();
//! assert!(matches!(result, Err(ConfigError::UnknownEncoding { .. })));
//! ```

use thiserror::Error;

/// Errors raised by configuration checks.
///
/// Every variant is detected before the network or the filesystem is
/// touched, so a caller receiving one of these can assume no side effect
/// took place.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The encoding token is neither `json` nor `xml`.
    #[error("Unknown encoding '{token}'. Expected 'json' or 'xml'.")]
    UnknownEncoding {
        /// The token that was provided.
        token: String,
    },

    /// An XML request was attempted without a `SOAPAction` header.
    #[error("SOAPAction is not configured. XML requests require a 'SOAPAction' header.")]
    MissingSoapAction,

    /// `decode_response` was called without a destination.
    #[error("Decode destination can not be empty.")]
    MissingDestination,

    /// Replace-mode persistence was requested without a text fragment.
    #[error("A text fragment is required when replace_data is true.")]
    MissingFragment,

    /// The HTTP method string is not a valid method token.
    #[error("Invalid HTTP method '{method}'.")]
    InvalidMethod {
        /// The method that was provided.
        method: String,
    },

    /// The target URL could not be parsed.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The URL that was provided.
        url: String,
        /// Why parsing failed.
        reason: String,
    },

    /// A header name or value is not valid on the wire.
    #[error("Invalid header '{name}'.")]
    InvalidHeader {
        /// The offending header name.
        name: String,
    },

    /// A bounded retry policy was configured with zero attempts.
    #[error("max_attempts must be at least 1.")]
    InvalidMaxAttempts,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_encoding_error_message() {
        let error = ConfigError::UnknownEncoding {
            token: "yaml".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("yaml"));
        assert!(message.contains("'json' or 'xml'"));
    }

    #[test]
    fn test_missing_soap_action_names_header() {
        let message = ConfigError::MissingSoapAction.to_string();
        assert!(message.contains("SOAPAction"));
    }

    #[test]
    fn test_missing_fragment_error_message() {
        let message = ConfigError::MissingFragment.to_string();
        assert!(message.contains("replace_data"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::MissingDestination;
        let _: &dyn std::error::Error = &error;
    }
}
