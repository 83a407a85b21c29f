//! The network capability the HTTP client is built on.
//!
//! `HttpClient` never talks to `reqwest` directly; it hands a fully built
//! [`HttpRequest`] to a [`Transport`], which makes swapping in a mock trivial.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::{
    error::{Result, UmbrellaError},
    model::RawResponse,
};

/// A GET request ready to go on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub timeout: Duration,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Performs exactly one round trip. Non-2xx statuses are returned, not raised.
    async fn send(&self, request: HttpRequest) -> Result<RawResponse>;
}

/// [`Transport`] backed by a `reqwest` client.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            http: Client::new(),
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<RawResponse> {
        let mut builder = self.http.get(&request.url).timeout(request.timeout);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let res = builder.send().await.map_err(transport_error)?;

        let status_code = res.status().as_u16();
        let body = res.bytes().await.map_err(transport_error)?;
        debug!(status = status_code, bytes = body.len(), "Received response");

        Ok(RawResponse::new(status_code, body.to_vec()))
    }
}

fn transport_error(err: reqwest::Error) -> UmbrellaError {
    let what = if err.is_timeout() {
        "request timed out"
    } else if err.is_connect() {
        "connection failed"
    } else {
        "request failed"
    };
    // without_url keeps the api key out of the message
    UmbrellaError::Transport(format!("{what}: {}", err.without_url()))
}
