use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::{info, instrument};

use crate::{
    Config,
    client::HttpClient,
    classify::classify,
    decode::decode,
    error::{Result, UmbrellaError},
    filter::filter_umbrella_days,
    model::{FilterOutcome, ForecastQuery},
    weekday::WeekdayZone,
};

/// API resource for the 5-day / 3-hour forecast.
pub const FORECAST_SERVICE: &str = "forecast";

/// Fetches the forecast for a query and reduces it to umbrella days.
#[derive(Debug)]
pub struct UmbrellaService {
    client: HttpClient,
    zone: WeekdayZone,
}

impl UmbrellaService {
    pub fn new(client: HttpClient, zone: WeekdayZone) -> Self {
        Self { client, zone }
    }

    /// Service talking to the configured API over `reqwest`.
    pub fn from_config(config: &Config, zone: WeekdayZone) -> Self {
        Self::new(HttpClient::with_reqwest(config.api.clone()), zone)
    }

    /// Raw decoded forecast response for `query.city`.
    #[instrument(skip(self, query), fields(city = %query.city))]
    pub async fn forecast(&self, query: &ForecastQuery) -> Result<Map<String, Value>> {
        let params = BTreeMap::from([
            ("q".to_string(), query.city.clone()),
            ("appid".to_string(), query.api_key.clone()),
        ]);

        info!("Forecast: {}", query.city);
        let resp = self
            .client
            .fetch(FORECAST_SERVICE, &params, query.timeout_secs)
            .await?;
        let body = classify(resp)?;
        decode(&body)
    }

    pub async fn umbrella_days(&self, query: &ForecastQuery) -> Result<FilterOutcome> {
        let response = self.forecast(query).await?;
        filter_umbrella_days(&response, query.humidity_threshold, query.max_days, self.zone)
    }
}

/// Picks the API key: an explicit value (CLI or environment) wins over the config file.
pub fn resolve_api_key(explicit: Option<&str>, config: &Config) -> Result<String> {
    explicit
        .filter(|key| !key.is_empty())
        .or_else(|| config.api_key())
        .map(str::to_owned)
        .ok_or_else(|| {
            UmbrellaError::invalid(
                "No API key given.\n\
                 Hint: pass one explicitly, set APIKEY, or store it in the config file.",
            )
        })
}
