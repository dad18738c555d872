use crate::handlers::{
    forecasts::{create_forecast, delete_forecast, get_forecast, list_forecasts, update_forecast},
    health::health_check,
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::path::Path;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Create application router with all routes and middleware
///
/// With `static_dir` set, unknown paths are served from that directory and
/// fall back to its `index.html`.
pub fn create_router(state: AppState, static_dir: Option<&Path>) -> Router {
    let router = Router::new()
        // Health check
        .route("/health", get(health_check))
        // Forecast CRUD routes
        .route("/api/v1/forecasts", get(list_forecasts))
        .route("/api/v1/forecasts", post(create_forecast))
        .route("/api/v1/forecasts/:id", get(get_forecast))
        .route("/api/v1/forecasts/:id", put(update_forecast))
        .route("/api/v1/forecasts/:id", delete(delete_forecast))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let router = match static_dir {
        Some(dir) => {
            info!("Serving static files from {}", dir.display());
            let index = ServeFile::new(dir.join("index.html"));
            router.fallback_service(ServeDir::new(dir).fallback(index))
        }
        None => router,
    };

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
