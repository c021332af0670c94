//! The transport seam and its reqwest implementation.
//!
//! The requester only needs "send this request, give me a response". The
//! [`Transport`] trait captures that, so tests can substitute a stub and
//! applications can plug in their own client.

use std::collections::HashMap;

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::StreamExt;
use reqwest::header::HeaderMap;
use reqwest::{Method, Url};

use crate::clients::errors::TransportError;
use crate::clients::http_response::HttpResponse;
use crate::config::RequesterConfig;

/// Library version from Cargo.toml.
pub const LIB_VERSION: &str = env!("CARGO_PKG_VERSION");

/// A fully built request, ready for dispatch.
#[derive(Clone, Debug)]
pub struct OutgoingRequest {
    /// The HTTP method.
    pub method: Method,
    /// The target URL.
    pub url: Url,
    /// Headers, including any set by the encoding step.
    pub headers: HeaderMap,
    /// The encoded payload. Empty means no body is sent.
    pub body: Bytes,
}

/// Executes HTTP requests on behalf of a [`Requester`](crate::Requester).
///
/// Implementations must return `Err` only when no response was obtained.
/// A response with any status code, including 4xx and 5xx, is `Ok`.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends the request and returns the raw response.
    async fn execute(&self, request: OutgoingRequest) -> Result<HttpResponse, TransportError>;
}

/// The default transport, backed by [`reqwest::Client`] with rustls.
///
/// The response body is forwarded as a stream and never buffered here.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

// Verify ReqwestTransport is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ReqwestTransport>();
};

impl ReqwestTransport {
    /// Creates a transport honoring the timeout and user agent in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Network`] if the reqwest client cannot be
    /// built (for example when TLS initialization fails).
    pub fn new(config: &RequesterConfig) -> Result<Self, TransportError> {
        let user_agent = config
            .user_agent()
            .map_or_else(|| format!("just-requester/{LIB_VERSION}"), String::from);

        let mut builder = reqwest::Client::builder()
            .use_rustls_tls()
            .user_agent(user_agent);
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }

    /// Wraps an existing reqwest client.
    #[must_use]
    pub const fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Parses response headers into a `HashMap`.
    fn parse_response_headers(headers: &HeaderMap) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: OutgoingRequest) -> Result<HttpResponse, TransportError> {
        let mut req_builder = self
            .client
            .request(request.method, request.url)
            .headers(request.headers);
        if !request.body.is_empty() {
            req_builder = req_builder.body(request.body);
        }

        let res = req_builder.send().await?;

        let code = res.status().as_u16();
        let headers = Self::parse_response_headers(res.headers());
        let body = res
            .bytes_stream()
            .map(|chunk| chunk.map_err(TransportError::from));

        Ok(HttpResponse::new(code, headers, Box::pin(body)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{HeaderValue, CONTENT_TYPE};

    #[test]
    fn test_transport_builds_with_default_config() {
        let config = RequesterConfig::default();
        assert!(ReqwestTransport::new(&config).is_ok());
    }

    #[test]
    fn test_parse_response_headers_groups_repeated_names() {
        let mut headers = HeaderMap::new();
        headers.append("Set-Cookie", HeaderValue::from_static("a=1"));
        headers.append("Set-Cookie", HeaderValue::from_static("b=2"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/xml"));

        let parsed = ReqwestTransport::parse_response_headers(&headers);

        assert_eq!(
            parsed.get("set-cookie"),
            Some(&vec!["a=1".to_string(), "b=2".to_string()])
        );
        assert_eq!(parsed.get("content-type"), Some(&vec!["text/xml".to_string()]));
    }

    #[test]
    fn test_transport_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ReqwestTransport>();
    }
}
