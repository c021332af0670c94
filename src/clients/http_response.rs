//! HTTP response type returned by the requester.
//!
//! [`HttpResponse`] keeps the body as a stream of chunks so that callers can
//! either decode it, persist it without buffering, or read it themselves.

use std::collections::HashMap;
use std::fmt;
use std::pin::Pin;

use bytes::Bytes;
use futures_util::stream::{self, Stream, StreamExt};

use crate::clients::errors::TransportError;

/// A response body as a stream of chunks.
pub type BodyStream = Pin<Box<dyn Stream<Item = Result<Bytes, TransportError>> + Send>>;

/// A raw HTTP response.
///
/// Status codes are not interpreted: a 404 or a 500 comes back as an
/// `HttpResponse` like any other. Only 429 is acted upon, and only when the
/// requester is configured to retry.
///
/// # Example
///
/// ```rust
/// use std::collections::HashMap;
/// use just_requester::HttpResponse;
///
/// let response = HttpResponse::from_bytes(200, HashMap::new(), r#"{"ok":true}"#);
/// assert!(response.is_ok());
/// assert!(!response.is_rate_limited());
/// ```
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, keyed by lowercase name (headers may repeat).
    pub headers: HashMap<String, Vec<String>>,
    body: BodyStream,
}

impl HttpResponse {
    /// Creates a response around a body stream.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: BodyStream) -> Self {
        let headers = headers
            .into_iter()
            .map(|(name, values)| (name.to_lowercase(), values))
            .collect();

        Self {
            code,
            headers,
            body,
        }
    }

    /// Creates a response whose body is already in memory.
    #[must_use]
    pub fn from_bytes(
        code: u16,
        headers: HashMap<String, Vec<String>>,
        body: impl Into<Bytes>,
    ) -> Self {
        let body: Bytes = body.into();
        Self::new(code, headers, Box::pin(stream::iter([Ok::<_, TransportError>(body)])))
    }

    /// Returns `true` for 2xx status codes.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns `true` for `429 Too Many Requests`.
    #[must_use]
    pub const fn is_rate_limited(&self) -> bool {
        self.code == 429
    }

    /// Returns the first value of a header (case-insensitive).
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_lowercase())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Pulls the next chunk from the body stream.
    ///
    /// Returns `None` once the body is exhausted.
    pub async fn next_chunk(&mut self) -> Option<Result<Bytes, TransportError>> {
        self.body.next().await
    }

    /// Reads the remainder of the body into memory.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] if the body stream fails.
    pub async fn read_to_end(&mut self) -> Result<Vec<u8>, TransportError> {
        let mut buffer = Vec::new();
        while let Some(chunk) = self.next_chunk().await {
            buffer.extend_from_slice(&chunk?);
        }
        Ok(buffer)
    }
}

impl fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpResponse")
            .field("code", &self.code)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}
