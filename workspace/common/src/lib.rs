//! Common transport-layer types shared between backend and frontend.
//! These structs are the request/response payloads of the forecast API so the
//! frontend can deserialize responses without duplicating shapes.

pub mod converters;
mod forecast;

pub use converters::{celsius_to_fahrenheit, parse_calendar_date};
pub use forecast::{Forecast, ForecastInput, ForecastView, SUMMARY_MAX_LEN};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error body returned by the API for every non-success status.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ErrorResponse {
    /// Human readable error message
    pub error: String,
    /// Machine readable error code
    pub code: String,
    /// Always false for errors
    pub success: bool,
    /// Per-field validation messages, keyed by the JSON field name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<std::collections::BTreeMap<String, Vec<String>>>,
}
