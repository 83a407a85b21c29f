use chrono::{DateTime, Datelike, FixedOffset, Local, Weekday};

use crate::error::{Result, UmbrellaError};

/// Calendar used to decide which weekday a timestamp falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeekdayZone {
    /// The machine's local time zone.
    #[default]
    Local,
    Utc,
    Fixed(FixedOffset),
}

impl WeekdayZone {
    /// Fixed offset of `hours` east of UTC (negative for west).
    pub fn from_utc_offset_hours(hours: i32) -> Result<Self> {
        hours
            .checked_mul(3600)
            .and_then(FixedOffset::east_opt)
            .map(WeekdayZone::Fixed)
            .ok_or_else(|| UmbrellaError::invalid(format!("UTC offset out of range: {hours}h")))
    }
}

/// Weekday of a positive Unix timestamp in the given zone.
pub fn timestamp_to_weekday(unix_timestamp: i64, zone: WeekdayZone) -> Result<Weekday> {
    if unix_timestamp <= 0 {
        return Err(UmbrellaError::invalid(format!(
            "invalid unix timestamp: {unix_timestamp}"
        )));
    }

    let utc = DateTime::from_timestamp(unix_timestamp, 0).ok_or_else(|| {
        UmbrellaError::invalid(format!("unix timestamp out of range: {unix_timestamp}"))
    })?;

    let weekday = match zone {
        WeekdayZone::Local => utc.with_timezone(&Local).weekday(),
        WeekdayZone::Utc => utc.weekday(),
        WeekdayZone::Fixed(offset) => utc.with_timezone(&offset).weekday(),
    };

    Ok(weekday)
}

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
