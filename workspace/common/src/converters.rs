//! Conversion helpers shared by the server and the browser client.
//!
//! Temperatures are stored in Celsius only. The Fahrenheit value is derived on
//! demand so it can never disagree with the persisted reading.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};

/// Divisor used by the Celsius to Fahrenheit approximation.
pub const CELSIUS_PER_FAHRENHEIT_DEGREE: f64 = 0.5556;

/// Converts a Celsius reading to Fahrenheit as `32 + round(c / 0.5556)`.
///
/// Rounding is half away from zero. The result is widened to `i64` because the
/// Fahrenheit value of an extreme `i32` reading does not fit in `i32`.
pub fn celsius_to_fahrenheit(temperature_c: i32) -> i64 {
    32 + (f64::from(temperature_c) / CELSIUS_PER_FAHRENHEIT_DEGREE).round() as i64
}

/// Parses a calendar date from either `YYYY-MM-DD` or an ISO 8601 date-time.
///
/// For date-times only the date part is kept, with no timezone shift.
pub fn parse_calendar_date(value: &str) -> Result<NaiveDate, String> {
    let value = value.trim();

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Ok(datetime.date_naive());
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(datetime.date());
    }

    Err(format!("'{}' is not a valid ISO date", value))
}

/// Serde adapter for optional dates that accepts the formats of [`parse_calendar_date`].
pub fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) => parse_calendar_date(&raw)
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}
