use chrono::Weekday;
use serde_json::Value;

use crate::{
    error::{Result, UmbrellaError},
    validate::{validate_non_empty, validate_positive},
    weekday::weekday_name,
};

pub const DEFAULT_HUMIDITY_THRESHOLD: f64 = 70.0;
pub const DEFAULT_TIMEOUT_SECS: f64 = 10.0;
pub const DEFAULT_MAX_DAYS: usize = 5;

/// One validated forecast lookup, built from user input.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastQuery {
    pub city: String,
    pub api_key: String,
    pub humidity_threshold: f64,
    pub timeout_secs: f64,
    pub max_days: usize,
}

impl ForecastQuery {
    pub fn new(
        city: &str,
        api_key: &str,
        humidity_threshold: f64,
        timeout_secs: f64,
        max_days: usize,
    ) -> Result<Self> {
        if max_days == 0 {
            return Err(UmbrellaError::invalid("max days must be at least 1"));
        }

        Ok(Self {
            city: validate_non_empty("city", city)?,
            api_key: validate_non_empty("api key", api_key)?,
            humidity_threshold: validate_positive("humidity threshold", humidity_threshold)?,
            timeout_secs: validate_positive("timeout", timeout_secs)?,
            max_days,
        })
    }

    /// Query with the default threshold, timeout and day cap.
    pub fn with_defaults(city: &str, api_key: &str) -> Result<Self> {
        Self::new(
            city,
            api_key,
            DEFAULT_HUMIDITY_THRESHOLD,
            DEFAULT_TIMEOUT_SECS,
            DEFAULT_MAX_DAYS,
        )
    }
}

/// What the transport handed back, before any interpretation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status_code: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status_code: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status_code,
            body: body.into(),
        }
    }
}

/// A single 3-hour slot of the 5-day forecast.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastEntry {
    pub unix_timestamp: i64,
    pub humidity: Option<f64>,
}

impl ForecastEntry {
    /// Pulls `dt` and `main.humidity` out of one element of the forecast `list`.
    ///
    /// A missing `main` object (or humidity inside it) is not an error; a missing
    /// or non-integer `dt` is.
    pub fn from_value(value: &Value) -> Result<Self> {
        let unix_timestamp = value
            .get("dt")
            .and_then(Value::as_i64)
            .ok_or_else(|| {
                UmbrellaError::Decode(format!("forecast entry without integer `dt`: {value}"))
            })?;

        let humidity = value
            .get("main")
            .and_then(|main| main.get("humidity"))
            .and_then(Value::as_f64);

        Ok(Self {
            unix_timestamp,
            humidity,
        })
    }
}

/// Distinct weekdays in first-seen order, never longer than its cap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekdaySet {
    days: Vec<Weekday>,
    cap: usize,
}

impl WeekdaySet {
    pub fn with_cap(cap: usize) -> Self {
        Self {
            days: Vec::with_capacity(cap.min(7)),
            cap,
        }
    }

    /// Appends `day` unless it is already present or the set is full.
    /// Returns whether the day was added.
    pub fn insert(&mut self, day: Weekday) -> bool {
        if self.is_full() || self.days.contains(&day) {
            return false;
        }
        self.days.push(day);
        true
    }

    pub fn is_full(&self) -> bool {
        self.days.len() >= self.cap
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn days(&self) -> &[Weekday] {
        &self.days
    }

    /// Full English weekday names, e.g. `["Monday", "Thursday"]`.
    pub fn names(&self) -> Vec<&'static str> {
        self.days.iter().copied().map(weekday_name).collect()
    }
}

/// Result of walking the forecast list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOutcome {
    pub days: WeekdaySet,
    /// Entries skipped because they carried no humidity.
    pub skipped: usize,
    /// False when the response had no forecast `list` at all.
    pub has_data: bool,
}
