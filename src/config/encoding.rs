//! Wire encoding definitions.
//!
//! This module provides the [`EncodingKind`] enum selecting how request
//! payloads are serialized and response bodies are decoded.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The wire encoding used by a requester.
///
/// The token form (`"json"` / `"xml"`) is what external configuration uses.
/// Parsing through [`FromStr`] is strict; [`EncodingKind::from_token_lenient`]
/// keeps the legacy lookup where unknown tokens resolve to [`EncodingKind::Json`].
///
/// # Example
///
/// ```rust
/// use just_requester::EncodingKind;
///
/// let kind: EncodingKind = "xml".parse().unwrap();
/// assert_eq!(kind, EncodingKind::Xml);
/// assert_eq!(kind.to_string(), "xml");
///
/// // Legacy lookup never fails
/// assert_eq!(EncodingKind::from_token_lenient("yaml"), EncodingKind::Json);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodingKind {
    /// JSON bodies (`application/json`).
    #[default]
    Json,
    /// SOAP-style XML bodies, always sent as POST.
    Xml,
}

impl EncodingKind {
    /// Returns the lowercase configuration token.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Xml => "xml",
        }
    }

    /// Returns the `Content-Type` set on requests carrying a payload.
    #[must_use]
    pub const fn content_type(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::Xml => "text/xml; charset=utf-8",
        }
    }

    /// Resolves a token the way older configuration files expect.
    ///
    /// Unrecognized tokens silently map to [`EncodingKind::Json`]. This is
    /// not validation: a typo such as `"xlm"` yields a JSON requester. Prefer
    /// `str::parse` for anything new.
    #[must_use]
    pub fn from_token_lenient(token: &str) -> Self {
        token.parse().unwrap_or_default()
    }
}

impl fmt::Display for EncodingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EncodingKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(Self::Json),
            "xml" => Ok(Self::Xml),
            _ => Err(ConfigError::UnknownEncoding {
                token: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_mapping_is_bidirectional() {
        for kind in [EncodingKind::Json, EncodingKind::Xml] {
            assert_eq!(kind.as_str().parse::<EncodingKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_strict_parse_rejects_unknown_token() {
        let result = "XML".parse::<EncodingKind>();
        assert!(matches!(
            result,
            Err(ConfigError::UnknownEncoding { token }) if token == "XML"
        ));
    }

    #[test]
    fn test_lenient_lookup_defaults_to_json() {
        assert_eq!(EncodingKind::from_token_lenient("xml"), EncodingKind::Xml);
        assert_eq!(EncodingKind::from_token_lenient(""), EncodingKind::Json);
        assert_eq!(EncodingKind::from_token_lenient("soap"), EncodingKind::Json);
    }

    #[test]
    fn test_default_is_json() {
        assert_eq!(EncodingKind::default(), EncodingKind::Json);
    }

    #[test]
    fn test_serde_uses_lowercase_token() {
        assert_eq!(serde_json::to_string(&EncodingKind::Xml).unwrap(), "\"xml\"");
        let kind: EncodingKind = serde_json::from_str("\"json\"").unwrap();
        assert_eq!(kind, EncodingKind::Json);
    }
}
