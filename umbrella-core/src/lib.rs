//! Core library for the `umbrella` CLI.
//!
//! This crate defines:
//! - Configuration of the forecast API and the stored API key
//! - A transport-agnostic HTTP client with status classification
//! - Forecast decoding, umbrella-day filtering and message formatting
//!
//! It is used by `umbrella-cli`, but can also be reused by other binaries or services.

pub mod classify;
pub mod client;
pub mod config;
pub mod decode;
pub mod error;
pub mod filter;
pub mod format;
pub mod model;
pub mod service;
pub mod transport;
pub mod validate;
pub mod weekday;

pub use client::HttpClient;
pub use config::{ApiConfig, Config};
pub use error::{ApiErrorKind, Result, UmbrellaError};
pub use format::format_message;
pub use model::{FilterOutcome, ForecastEntry, ForecastQuery, RawResponse, WeekdaySet};
pub use service::{UmbrellaService, resolve_api_key};
pub use transport::{HttpRequest, ReqwestTransport, Transport};
pub use weekday::{WeekdayZone, timestamp_to_weekday};
