//! Configuration types for the requester.
//!
//! # Overview
//!
//! - [`RequesterConfig`]: encoding, 429 retry policy and transport settings
//! - [`RequesterConfigBuilder`]: a builder for [`RequesterConfig`]
//! - [`EncodingKind`]: the wire encoding, fixed for a requester's lifetime
//!
//! # Example
//!
//! ```rust
//! use just_requester::{EncodingKind, RequesterConfig};
//!
//! let config = RequesterConfig::builder()
//!     .encoding(EncodingKind::Xml)
//!     .retry_on_429(true)
//!     .max_attempts(5)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.encoding(), EncodingKind::Xml);
//! ```

mod encoding;

pub use encoding::EncodingKind;

use std::num::NonZeroU32;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

/// Configuration for a [`Requester`](crate::Requester).
///
/// The configuration is immutable once built. It can also be loaded from
/// JSON, where the encoding is given as its lowercase token:
///
/// ```rust
/// use just_requester::{EncodingKind, RequesterConfig};
///
/// let config: RequesterConfig = serde_json::from_str(
///     r#"{"encoding": "xml", "retry_on_429": true, "timeout_ms": 2500}"#,
/// ).unwrap();
///
/// assert_eq!(config.encoding(), EncodingKind::Xml);
/// assert!(config.retry_on_429());
/// assert!(config.max_attempts().is_none());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RequesterConfig {
    encoding: EncodingKind,
    retry_on_429: bool,
    max_attempts: Option<NonZeroU32>,
    timeout_ms: Option<u64>,
    user_agent: Option<String>,
}

impl RequesterConfig {
    /// Creates a new builder for constructing a `RequesterConfig`.
    #[must_use]
    pub fn builder() -> RequesterConfigBuilder {
        RequesterConfigBuilder::new()
    }

    /// Returns the wire encoding.
    #[must_use]
    pub const fn encoding(&self) -> EncodingKind {
        self.encoding
    }

    /// Returns whether a 429 response triggers an immediate re-send.
    #[must_use]
    pub const fn retry_on_429(&self) -> bool {
        self.retry_on_429
    }

    /// Returns the attempt limit for the 429 retry loop.
    ///
    /// `None` means the loop is unbounded: as long as the remote keeps
    /// answering 429 the request is sent again, with no delay.
    #[must_use]
    pub const fn max_attempts(&self) -> Option<NonZeroU32> {
        self.max_attempts
    }

    /// Returns the transport timeout, if configured.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Returns the `User-Agent` used by the default transport, if configured.
    #[must_use]
    pub fn user_agent(&self) -> Option<&str> {
        self.user_agent.as_deref()
    }
}

// Verify RequesterConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RequesterConfig>();
};

/// Builder for constructing [`RequesterConfig`] instances.
///
/// # Defaults
///
/// - `encoding`: [`EncodingKind::Json`]
/// - `retry_on_429`: `false`
/// - `max_attempts`: `None` (unbounded when retrying)
/// - `timeout`: `None`
/// - `user_agent`: `None`
#[derive(Debug, Default)]
pub struct RequesterConfigBuilder {
    encoding: Option<EncodingKind>,
    retry_on_429: bool,
    max_attempts: Option<u32>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl RequesterConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the wire encoding.
    #[must_use]
    pub const fn encoding(mut self, encoding: EncodingKind) -> Self {
        self.encoding = Some(encoding);
        self
    }

    /// Sets the wire encoding from a configuration token.
    ///
    /// Uses [`EncodingKind::from_token_lenient`], so an unknown token falls
    /// back to JSON. Parse the token yourself and call
    /// [`encoding`](Self::encoding) to reject typos instead.
    #[must_use]
    pub fn encoding_token(mut self, token: &str) -> Self {
        self.encoding = Some(EncodingKind::from_token_lenient(token));
        self
    }

    /// Enables or disables the immediate re-send on 429 responses.
    #[must_use]
    pub const fn retry_on_429(mut self, enabled: bool) -> Self {
        self.retry_on_429 = enabled;
        self
    }

    /// Bounds the 429 retry loop to `attempts` dispatches in total.
    #[must_use]
    pub const fn max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = Some(attempts);
        self
    }

    /// Sets a timeout applied by the default transport.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the `User-Agent` sent by the default transport.
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Builds the [`RequesterConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidMaxAttempts`] if `max_attempts` was set
    /// to zero.
    pub fn build(self) -> Result<RequesterConfig, ConfigError> {
        let max_attempts = match self.max_attempts {
            Some(attempts) => {
                Some(NonZeroU32::new(attempts).ok_or(ConfigError::InvalidMaxAttempts)?)
            }
            None => None,
        };

        let timeout_ms = self
            .timeout
            .map(|timeout| u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX));

        Ok(RequesterConfig {
            encoding: self.encoding.unwrap_or_default(),
            retry_on_429: self.retry_on_429,
            max_attempts,
            timeout_ms,
            user_agent: self.user_agent,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = RequesterConfig::builder().build().unwrap();

        assert_eq!(config.encoding(), EncodingKind::Json);
        assert!(!config.retry_on_429());
        assert!(config.max_attempts().is_none());
        assert!(config.timeout().is_none());
        assert!(config.user_agent().is_none());
    }

    #[test]
    fn test_builder_sets_all_fields() {
        let config = RequesterConfig::builder()
            .encoding(EncodingKind::Xml)
            .retry_on_429(true)
            .max_attempts(3)
            .timeout(Duration::from_secs(5))
            .user_agent("billing-sync/2.1")
            .build()
            .unwrap();

        assert_eq!(config.encoding(), EncodingKind::Xml);
        assert!(config.retry_on_429());
        assert_eq!(config.max_attempts(), NonZeroU32::new(3));
        assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
        assert_eq!(config.user_agent(), Some("billing-sync/2.1"));
    }

    #[test]
    fn test_zero_max_attempts_is_rejected() {
        let result = RequesterConfig::builder().max_attempts(0).build();
        assert_eq!(result, Err(ConfigError::InvalidMaxAttempts));
    }

    #[test]
    fn test_encoding_token_is_lenient() {
        let config = RequesterConfig::builder()
            .encoding_token("xlm")
            .build()
            .unwrap();
        assert_eq!(config.encoding(), EncodingKind::Json);
    }

    #[test]
    fn test_deserialize_from_json_with_missing_fields() {
        let config: RequesterConfig = serde_json::from_str(r#"{"max_attempts": 4}"#).unwrap();

        assert_eq!(config.encoding(), EncodingKind::Json);
        assert_eq!(config.max_attempts(), NonZeroU32::new(4));
    }

    #[test]
    fn test_deserialize_rejects_zero_max_attempts() {
        let result = serde_json::from_str::<RequesterConfig>(r#"{"max_attempts": 0}"#);
        assert!(result.is_err());
    }
}
