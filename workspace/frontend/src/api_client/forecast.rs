//! Forecast endpoints. Each call is a single round trip without retries.

use common::{Forecast, ForecastInput};

use super::{delete, get, post};

pub const FORECASTS_ENDPOINT: &str = "/forecasts";

pub fn forecast_endpoint(id: i32) -> String {
    format!("{}/{}", FORECASTS_ENDPOINT, id)
}

/// Fetch every forecast, earliest date first
pub async fn fetch_all() -> Result<Vec<Forecast>, String> {
    log::debug!("Fetching all forecasts");
    get(FORECASTS_ENDPOINT).await
}

/// Create a forecast and return it as stored
pub async fn create(input: &ForecastInput) -> Result<Forecast, String> {
    log::debug!("Creating forecast for {:?}", input.date);
    post(FORECASTS_ENDPOINT, input).await
}

/// Delete a forecast by id
pub async fn remove(id: i32) -> Result<(), String> {
    log::debug!("Deleting forecast {}", id);
    delete(&forecast_endpoint(id)).await
}
