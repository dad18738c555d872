use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use utoipa::openapi::{RefOr, Schema};
use validator::Validate;

use crate::converters::{celsius_to_fahrenheit, deserialize_optional_date};

/// Maximum number of characters accepted in a forecast summary.
pub const SUMMARY_MAX_LEN: usize = 100;

/// A stored weather forecast as returned by the API.
///
/// There is no Fahrenheit field. `temperatureF` is produced by
/// [`Forecast::temperature_f`] when the value is serialized and ignored when
/// a payload is read back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "ForecastView", rename_all = "camelCase")]
pub struct Forecast {
    pub id: i32,
    pub date: NaiveDate,
    pub temperature_c: i32,
    pub summary: Option<String>,
}

impl Forecast {
    /// Temperature in Fahrenheit, derived from the Celsius reading.
    pub fn temperature_f(&self) -> i64 {
        celsius_to_fahrenheit(self.temperature_c)
    }
}

/// Wire shape of [`Forecast`], including the derived Fahrenheit value.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ForecastView {
    /// Server-assigned identifier
    pub id: i32,
    /// Forecast date (YYYY-MM-DD)
    pub date: NaiveDate,
    /// Temperature in degrees Celsius
    pub temperature_c: i32,
    /// Temperature in degrees Fahrenheit (read-only, derived)
    pub temperature_f: i64,
    /// Optional short description, at most 100 characters
    pub summary: Option<String>,
}

impl From<Forecast> for ForecastView {
    fn from(forecast: Forecast) -> Self {
        Self {
            temperature_f: forecast.temperature_f(),
            id: forecast.id,
            date: forecast.date,
            temperature_c: forecast.temperature_c,
            summary: forecast.summary,
        }
    }
}

impl<'s> ToSchema<'s> for Forecast {
    fn schema() -> (&'s str, RefOr<Schema>) {
        let (_, schema) = <ForecastView as ToSchema<'s>>::schema();
        ("Forecast", schema)
    }
}

/// Request body for creating or replacing a forecast.
///
/// Every field is optional at the JSON level; missing required values are
/// reported per field by `validate`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ForecastInput {
    /// Ignored on create; must equal the path id on update
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    /// Forecast date (YYYY-MM-DD, a full ISO date-time is also accepted)
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    #[validate(required(message = "The date field is required."))]
    pub date: Option<NaiveDate>,
    /// Temperature in degrees Celsius
    #[serde(default)]
    #[validate(required(message = "The temperatureC field is required."))]
    pub temperature_c: Option<i32>,
    /// Optional short description
    #[serde(default)]
    #[validate(length(max = 100, message = "The summary field must be at most 100 characters."))]
    pub summary: Option<String>,
}

impl ForecastInput {
    pub fn new(date: NaiveDate, temperature_c: i32, summary: Option<String>) -> Self {
        Self {
            id: None,
            date: Some(date),
            temperature_c: Some(temperature_c),
            summary,
        }
    }
}
