use common::{ErrorResponse, Forecast, ForecastInput};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Pooled database connection; each request checks out its own handle
    pub db: DatabaseConnection,
}

/// Health check response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::forecasts::list_forecasts,
        crate::handlers::forecasts::get_forecast,
        crate::handlers::forecasts::create_forecast,
        crate::handlers::forecasts::update_forecast,
        crate::handlers::forecasts::delete_forecast,
    ),
    components(
        schemas(
            Forecast,
            ForecastInput,
            ErrorResponse,
            HealthResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "forecasts", description = "Weather forecast management endpoints"),
    ),
    info(
        title = "ForecastHub API",
        description = "Weather forecast CRUD API",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
