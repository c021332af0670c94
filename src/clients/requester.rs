//! The requester: build-and-send plus body decoding.
//!
//! This module provides [`Requester`], which encodes a payload with its
//! configured [`EncodingKind`], dispatches it through a [`Transport`] and
//! optionally re-sends on `429 Too Many Requests`.

use std::collections::HashMap;

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Method, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::clients::errors::{DecodeError, EncodingError, HttpError, MaxHttpRetriesExceededError};
use crate::clients::http_response::HttpResponse;
use crate::clients::transport::{OutgoingRequest, ReqwestTransport, Transport};
use crate::config::{EncodingKind, RequesterConfig};
use crate::error::ConfigError;

/// Header that every XML request must carry.
pub const SOAP_ACTION_HEADER: &str = "SOAPAction";

/// Sends requests in a fixed encoding and consumes their responses.
///
/// A requester holds no mutable state besides its configuration, so one
/// instance can serve many calls. It is `Send + Sync` whenever the transport
/// is.
///
/// # Status codes
///
/// Responses are returned as received. A 404 or 500 is an `Ok` response;
/// callers inspect [`HttpResponse::code`] themselves. The single exception
/// is 429 when [`RequesterConfig::retry_on_429`] is enabled: the request is
/// then sent again immediately. Without [`RequesterConfig::max_attempts`]
/// there is no limit on how many times this happens.
///
/// # Example
///
/// ```rust,ignore
/// use std::collections::HashMap;
/// use just_requester::{EncodingKind, Requester, RequesterConfig};
///
/// let config = RequesterConfig::builder()
///     .encoding(EncodingKind::Json)
///     .retry_on_429(true)
///     .max_attempts(5)
///     .build()?;
/// let requester = Requester::with_config(config)?;
///
/// let mut response = requester
///     .send("POST", "https://api.example.com/orders", &HashMap::new(), Some(&order))
///     .await?;
/// let created: Order = requester.decode(&mut response).await?;
/// ```
#[derive(Clone, Debug)]
pub struct Requester<T = ReqwestTransport> {
    transport: T,
    config: RequesterConfig,
}

impl Requester<ReqwestTransport> {
    /// Creates a requester backed by [`ReqwestTransport`].
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Transport`] if the reqwest client cannot be built.
    pub fn with_config(config: RequesterConfig) -> Result<Self, HttpError> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::new(transport, config))
    }
}

impl<T: Transport> Requester<T> {
    /// Creates a requester around any transport.
    #[must_use]
    pub const fn new(transport: T, config: RequesterConfig) -> Self {
        Self { transport, config }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &RequesterConfig {
        &self.config
    }

    /// Returns the wire encoding.
    #[must_use]
    pub const fn encoding(&self) -> EncodingKind {
        self.config.encoding()
    }

    /// Returns the transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Encodes `payload`, sends it and returns the raw response.
    ///
    /// With [`EncodingKind::Json`] the payload is serialized with serde_json
    /// and sent with `method`. With [`EncodingKind::Xml`] the `headers` map
    /// must contain `SOAPAction`, the payload is serialized as indented XML
    /// and the request is always a POST: `method` is ignored.
    ///
    /// Entries of `headers` are applied last and replace any header the
    /// encoding step set, such as `Content-Type`.
    ///
    /// # Errors
    ///
    /// - [`HttpError::Config`] for a missing `SOAPAction` header or an invalid
    ///   method, URL or header. Nothing is sent.
    /// - [`HttpError::Encoding`] if the payload cannot be serialized.
    /// - [`HttpError::Transport`] if the transport fails. Not retried.
    /// - [`HttpError::MaxRetries`] if a bounded 429 retry loop runs out.
    pub async fn send<P>(
        &self,
        method: &str,
        url: &str,
        headers: &HashMap<String, String>,
        payload: Option<&P>,
    ) -> Result<HttpResponse, HttpError>
    where
        P: Serialize + ?Sized,
    {
        let request = self.build_request(method, url, headers, payload)?;

        let mut tries: u32 = 0;
        loop {
            tries = tries.saturating_add(1);

            tracing::debug!(
                "Dispatching {} {} (attempt {})",
                request.method,
                request.url,
                tries
            );
            let response = self.transport.execute(request.clone()).await?;

            if !(self.config.retry_on_429() && response.is_rate_limited()) {
                return Ok(response);
            }

            if let Some(max_attempts) = self.config.max_attempts() {
                if tries >= max_attempts.get() {
                    return Err(MaxHttpRetriesExceededError {
                        code: response.code,
                        tries,
                    }
                    .into());
                }
            }

            tracing::warn!(
                "Received 429 from {} on attempt {}, sending again",
                request.url,
                tries
            );
        }
    }

    /// Sends a request without a payload.
    ///
    /// # Errors
    ///
    /// Same as [`send`](Self::send).
    pub async fn send_without_payload(
        &self,
        method: &str,
        url: &str,
        headers: &HashMap<String, String>,
    ) -> Result<HttpResponse, HttpError> {
        self.send::<()>(method, url, headers, None).await
    }

    /// Decodes the response body into `destination`.
    ///
    /// The body stream is read to its end.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::MissingDestination`] if `destination` is `None`. The
    ///   body is left untouched.
    /// - [`HttpError::Decode`] if the body cannot be read or decoded.
    pub async fn decode_response<D>(
        &self,
        response: &mut HttpResponse,
        destination: Option<&mut D>,
    ) -> Result<(), HttpError>
    where
        D: DeserializeOwned,
    {
        let Some(destination) = destination else {
            return Err(ConfigError::MissingDestination.into());
        };
        *destination = self.decode(response).await?;
        Ok(())
    }

    /// Decodes the response body into a new value.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::Decode`] if the body cannot be read or decoded.
    pub async fn decode<D>(&self, response: &mut HttpResponse) -> Result<D, HttpError>
    where
        D: DeserializeOwned,
    {
        let body = response.read_to_end().await.map_err(DecodeError::Body)?;

        let value = match self.config.encoding() {
            EncodingKind::Json => serde_json::from_slice(&body).map_err(DecodeError::Json)?,
            EncodingKind::Xml => {
                quick_xml::de::from_reader(body.as_slice()).map_err(DecodeError::Xml)?
            }
        };
        Ok(value)
    }

    /// Encodes the payload and assembles the outgoing request.
    fn build_request<P>(
        &self,
        method: &str,
        url: &str,
        headers: &HashMap<String, String>,
        payload: Option<&P>,
    ) -> Result<OutgoingRequest, HttpError>
    where
        P: Serialize + ?Sized,
    {
        let encoding = self.config.encoding();

        let (method, body) = match encoding {
            EncodingKind::Json => {
                let method = Method::from_bytes(method.as_bytes()).map_err(|_| {
                    ConfigError::InvalidMethod {
                        method: method.to_string(),
                    }
                })?;
                let body = match payload {
                    Some(payload) => {
                        Bytes::from(serde_json::to_vec(payload).map_err(EncodingError::Json)?)
                    }
                    None => Bytes::new(),
                };
                (method, body)
            }
            EncodingKind::Xml => {
                if !headers.contains_key(SOAP_ACTION_HEADER) {
                    return Err(ConfigError::MissingSoapAction.into());
                }
                if !method.eq_ignore_ascii_case("POST") {
                    tracing::debug!("XML requests are always POST, ignoring method {}", method);
                }
                let body = match payload {
                    Some(payload) => Bytes::from(encode_xml(payload)?),
                    None => Bytes::new(),
                };
                (Method::POST, body)
            }
        };

        let url = Url::parse(url).map_err(|e| ConfigError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let mut header_map = HeaderMap::new();
        if payload.is_some() {
            header_map.insert(CONTENT_TYPE, HeaderValue::from_static(encoding.content_type()));
        }
        for (name, value) in headers {
            let invalid = || ConfigError::InvalidHeader { name: name.clone() };
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
            let header_value = HeaderValue::from_str(value).map_err(|_| invalid())?;
            header_map.insert(header_name, header_value);
        }

        Ok(OutgoingRequest {
            method,
            url,
            headers: header_map,
            body,
        })
    }
}

/// Serializes a payload as XML, indented by one space per level.
fn encode_xml<P>(payload: &P) -> Result<String, EncodingError>
where
    P: Serialize + ?Sized,
{
    let mut buffer = String::new();
    let mut serializer = quick_xml::se::Serializer::new(&mut buffer);
    serializer.indent(' ', 1);
    payload.serialize(serializer).map_err(EncodingError::Xml)?;
    Ok(buffer)
}
