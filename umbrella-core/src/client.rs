use std::{collections::BTreeMap, fmt, time::Duration};

use reqwest::Url;
use tracing::{debug, instrument};

use crate::{
    config::ApiConfig,
    error::{Result, UmbrellaError},
    model::RawResponse,
    transport::{HttpRequest, ReqwestTransport, Transport},
    validate::validate_positive,
};

const ACCEPT_JSON: &str = "application/json";

/// Dumb transport-level client for `<base_url>/data/<version>/<service>`.
pub struct HttpClient {
    config: ApiConfig,
    transport: Box<dyn Transport>,
}

impl HttpClient {
    pub fn new(config: ApiConfig, transport: Box<dyn Transport>) -> Self {
        Self { config, transport }
    }

    pub fn with_reqwest(config: ApiConfig) -> Self {
        Self::new(config, Box::new(ReqwestTransport::new()))
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Builds the full request URL with URL-encoded query parameters.
    pub fn build_url(&self, service: &str, params: &BTreeMap<String, String>) -> Result<Url> {
        let base = format!(
            "{}/data/{}/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.api_version,
            service
        );

        Url::parse_with_params(&base, params)
            .map_err(|e| UmbrellaError::Config(format!("invalid API URL '{base}': {e}")))
    }

    /// One GET against `service`. Returns whatever status the server sent.
    #[instrument(skip(self, params), fields(param_count = params.len()))]
    pub async fn fetch(
        &self,
        service: &str,
        params: &BTreeMap<String, String>,
        timeout_secs: f64,
    ) -> Result<RawResponse> {
        if service.is_empty() {
            return Err(UmbrellaError::invalid("required api service name"));
        }
        if params.is_empty() {
            return Err(UmbrellaError::invalid("empty params"));
        }
        let timeout = validate_positive("timeout", timeout_secs)?;
        let timeout = Duration::try_from_secs_f64(timeout)
            .map_err(|e| UmbrellaError::invalid(format!("timeout {timeout_secs}: {e}")))?;

        let url = self.build_url(service, params)?;
        debug!("Request GET /{service}");

        let request = HttpRequest {
            url: url.into(),
            headers: vec![
                ("User-Agent".to_string(), self.config.user_agent.clone()),
                ("Accept".to_string(), ACCEPT_JSON.to_string()),
            ],
            timeout,
        };

        self.transport.send(request).await
    }
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
