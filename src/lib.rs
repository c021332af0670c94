//! # just-requester
//!
//! A small async HTTP request helper. A [`Requester`] is configured once with
//! a wire encoding (JSON or SOAP-style XML) and a 429 retry policy, then
//! used to send requests and consume their responses.
//!
//! ## Overview
//!
//! - Build-and-send through an injectable [`Transport`] via [`Requester::send`]
//! - Decode a response body into a value via [`Requester::decode_response`]
//! - Write a response body to disk via [`Requester::persist_response`]
//! - Type-safe configuration via [`RequesterConfig`] and [`RequesterConfigBuilder`]
//!
//! ## Quick Start
//!
//! ```rust
//! use just_requester::{EncodingKind, RequesterConfig};
//!
//! let config = RequesterConfig::builder()
//!     .encoding("json".parse::<EncodingKind>().unwrap())
//!     .retry_on_429(true)
//!     .max_attempts(3)
//!     .build()
//!     .unwrap();
//!
//! assert!(config.retry_on_429());
//! ```
//!
//! ## Sending and Decoding
//!
//! ```rust,ignore
//! use std::collections::HashMap;
//! use just_requester::{Requester, RequesterConfig};
//!
//! let requester = Requester::with_config(RequesterConfig::default())?;
//!
//! let mut response = requester
//!     .send_without_payload("GET", "https://api.example.com/items/1", &HashMap::new())
//!     .await?;
//!
//! let mut item = Item::default();
//! requester.decode_response(&mut response, Some(&mut item)).await?;
//! ```
//!
//! ## Design Principles
//!
//! - **Raw responses**: status codes are not validated; 4xx and 5xx come back as `Ok`
//! - **Fixed encoding**: a requester never mixes JSON and XML
//! - **Fail before I/O**: configuration problems are reported before anything is sent or written
//! - **Thread-safe**: `Requester` is `Send + Sync` when its transport is

pub mod clients;
pub mod config;
pub mod error;

pub use config::{EncodingKind, RequesterConfig, RequesterConfigBuilder};
pub use error::ConfigError;

pub use clients::{
    BodyStream, DecodeError, EncodingError, FilePersistConfig, HttpError, HttpResponse,
    MaxHttpRetriesExceededError, OutgoingRequest, PersistError, Requester, ReqwestTransport,
    Transport, TransportError,
};
