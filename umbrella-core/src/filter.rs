use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::{
    error::{Result, UmbrellaError},
    model::{FilterOutcome, ForecastEntry, WeekdaySet},
    validate::validate_positive,
    weekday::{WeekdayZone, timestamp_to_weekday, weekday_name},
};

/// Collects the distinct weekdays whose humidity exceeds `threshold`, in the
/// order they first appear in the response's `list`, stopping at `max_days`.
///
/// A response without a `list` yields an empty outcome with `has_data == false`.
pub fn filter_umbrella_days(
    response: &Map<String, Value>,
    threshold: f64,
    max_days: usize,
    zone: WeekdayZone,
) -> Result<FilterOutcome> {
    match response.get("list").and_then(Value::as_array) {
        Some(entries) => filter_entries(entries, threshold, max_days, zone),
        None => {
            info!("no forecast data in response");
            Ok(FilterOutcome {
                days: WeekdaySet::with_cap(max_days),
                skipped: 0,
                has_data: false,
            })
        }
    }
}

/// Same as [`filter_umbrella_days`], over the raw `list` elements.
pub fn filter_entries(
    entries: &[Value],
    threshold: f64,
    max_days: usize,
    zone: WeekdayZone,
) -> Result<FilterOutcome> {
    let threshold = validate_positive("humidity threshold", threshold)?;
    if max_days == 0 {
        return Err(UmbrellaError::invalid("max days must be at least 1"));
    }

    let mut days = WeekdaySet::with_cap(max_days);
    let mut skipped = 0;

    for raw in entries {
        if days.is_full() {
            debug!(max_days, "day cap reached");
            break;
        }

        let entry = ForecastEntry::from_value(raw)?;
        let weekday = timestamp_to_weekday(entry.unix_timestamp, zone)?;

        let Some(humidity) = entry.humidity else {
            warn!(dt = entry.unix_timestamp, "Not found key: `main.humidity`, skipping entry");
            skipped += 1;
            continue;
        };

        if humidity > threshold && days.insert(weekday) {
            debug!(day = weekday_name(weekday), humidity, "umbrella day");
        }
    }

    Ok(FilterOutcome {
        days,
        skipped,
        has_data: true,
    })
}
