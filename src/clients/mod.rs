//! Request dispatch and response consumption.
//!
//! # Overview
//!
//! - [`Requester`]: encodes, sends and retries requests, then decodes or
//!   persists their responses
//! - [`Transport`]: the seam a requester sends through, with
//!   [`ReqwestTransport`] as the default
//! - [`HttpResponse`]: status, headers and a streamed body
//! - [`FilePersistConfig`]: how a body is written to disk
//!
//! # Retry Behavior
//!
//! When `retry_on_429` is enabled, a `429 Too Many Requests` response makes
//! the requester send the same request again straight away:
//!
//! - no delay between attempts, and `Retry-After` is not consulted
//! - no limit unless `max_attempts` is configured
//! - transport failures are never retried
//! - every other status is returned to the caller as-is
//!
//! # Example
//!
//! ```rust,ignore
//! use std::collections::HashMap;
//! use just_requester::{EncodingKind, FilePersistConfig, Requester, RequesterConfig};
//!
//! let config = RequesterConfig::builder()
//!     .encoding(EncodingKind::Xml)
//!     .build()?;
//! let requester = Requester::with_config(config)?;
//!
//! let mut headers = HashMap::new();
//! headers.insert("SOAPAction".to_string(), "urn:GetReport".to_string());
//!
//! let mut response = requester
//!     .send("POST", "https://soap.example.com/reports", &headers, Some(&query))
//!     .await?;
//! requester
//!     .persist_response(&mut response, &FilePersistConfig::stream("report.xml"))
//!     .await?;
//! ```

mod errors;
mod http_response;
mod persist;
mod requester;
mod transport;

pub use errors::{
    DecodeError, EncodingError, HttpError, MaxHttpRetriesExceededError, PersistError,
    TransportError,
};
pub use http_response::{BodyStream, HttpResponse};
pub use persist::FilePersistConfig;
pub use requester::{Requester, SOAP_ACTION_HEADER};
pub use transport::{OutgoingRequest, ReqwestTransport, Transport, LIB_VERSION};
