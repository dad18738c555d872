use crate::error::ForecastError;
use crate::schemas::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, HeaderName, StatusCode},
    response::Json,
};
use common::{Forecast, ForecastInput};
use model::{ForecastFields, store};
use sea_orm::DbErr;
use tracing::{debug, error, info, instrument, trace, warn};
use validator::Validate;

pub const FORECASTS_PATH: &str = "/api/v1/forecasts";

/// Validates a request body and strips it down to the stored columns.
fn validated_fields(input: ForecastInput) -> Result<ForecastFields, ForecastError> {
    if let Err(errors) = input.validate() {
        warn!("Forecast payload failed validation: {}", errors);
        return Err(errors.into());
    }

    match (input.date, input.temperature_c) {
        (Some(date), Some(temperature_c)) => Ok(ForecastFields {
            date,
            temperature_c,
            summary: input.summary,
        }),
        _ => Err(ForecastError::InvalidBody(
            "date and temperatureC are required".to_string(),
        )),
    }
}

fn read_body(
    payload: Result<Json<ForecastInput>, JsonRejection>,
) -> Result<ForecastInput, ForecastError> {
    match payload {
        Ok(Json(input)) => Ok(input),
        Err(rejection) => {
            warn!("Rejected forecast body: {}", rejection.body_text());
            Err(ForecastError::InvalidBody(rejection.body_text()))
        }
    }
}

/// Get all forecasts ordered by date
#[utoipa::path(
    get,
    path = "/api/v1/forecasts",
    responses(
        (status = 200, description = "All forecasts, earliest date first", body = Vec<Forecast>),
        (status = 500, description = "Internal server error", body = common::ErrorResponse)
    ),
    tag = "forecasts"
)]
#[instrument(skip(state))]
pub async fn list_forecasts(
    State(state): State<AppState>,
) -> Result<Json<Vec<Forecast>>, ForecastError> {
    trace!("Entering list_forecasts function");

    match store::list_by_date(&state.db).await {
        Ok(rows) => {
            let forecasts: Vec<Forecast> = rows.into_iter().map(Forecast::from).collect();
            info!("Successfully fetched {} forecasts", forecasts.len());
            Ok(Json(forecasts))
        }
        Err(e) => {
            error!("Failed to fetch forecasts: {}", e);
            Err(e.into())
        }
    }
}

/// Get a specific forecast by ID
#[utoipa::path(
    get,
    path = "/api/v1/forecasts/{id}",
    params(
        ("id" = i32, Path, description = "Forecast ID")
    ),
    responses(
        (status = 200, description = "Forecast details", body = Forecast),
        (status = 404, description = "Forecast not found", body = common::ErrorResponse),
        (status = 500, description = "Internal server error", body = common::ErrorResponse)
    ),
    tag = "forecasts"
)]
#[instrument(skip(state))]
pub async fn get_forecast(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Forecast>, ForecastError> {
    trace!("Entering get_forecast function");

    match store::find_forecast(&state.db, id).await {
        Ok(Some(model)) => {
            debug!("Found forecast {} for {}", model.id, model.date);
            Ok(Json(Forecast::from(model)))
        }
        Ok(None) => {
            warn!("Forecast {} not found", id);
            Err(ForecastError::NotFound(id))
        }
        Err(e) => {
            error!("Failed to fetch forecast {}: {}", id, e);
            Err(e.into())
        }
    }
}

/// Create a new forecast
///
/// Any `id` in the body is ignored; the store assigns one.
#[utoipa::path(
    post,
    path = "/api/v1/forecasts",
    request_body = ForecastInput,
    responses(
        (status = 201, description = "Forecast created successfully", body = Forecast,
            headers(("Location" = String, description = "URL of the created forecast"))),
        (status = 400, description = "Invalid request data", body = common::ErrorResponse),
        (status = 500, description = "Internal server error", body = common::ErrorResponse)
    ),
    tag = "forecasts"
)]
#[instrument(skip(state))]
pub async fn create_forecast(
    State(state): State<AppState>,
    payload: Result<Json<ForecastInput>, JsonRejection>,
) -> Result<(StatusCode, [(HeaderName, String); 1], Json<Forecast>), ForecastError> {
    trace!("Entering create_forecast function");

    let input = read_body(payload)?;
    if let Some(client_id) = input.id {
        debug!("Ignoring client supplied id {}", client_id);
    }
    let fields = validated_fields(input)?;

    match store::insert_forecast(&state.db, fields).await {
        Ok(model) => {
            info!("Successfully created forecast with ID: {}", model.id);
            let location = format!("{}/{}", FORECASTS_PATH, model.id);
            Ok((
                StatusCode::CREATED,
                [(header::LOCATION, location)],
                Json(Forecast::from(model)),
            ))
        }
        Err(e) => {
            error!("Failed to create forecast: {}", e);
            Err(e.into())
        }
    }
}

/// Replace an existing forecast
///
/// The body `id` must equal the path id.
#[utoipa::path(
    put,
    path = "/api/v1/forecasts/{id}",
    params(
        ("id" = i32, Path, description = "Forecast ID")
    ),
    request_body = ForecastInput,
    responses(
        (status = 204, description = "Forecast updated successfully"),
        (status = 400, description = "Id mismatch or invalid request data", body = common::ErrorResponse),
        (status = 404, description = "Forecast not found", body = common::ErrorResponse),
        (status = 500, description = "Internal server error", body = common::ErrorResponse)
    ),
    tag = "forecasts"
)]
#[instrument(skip(state))]
pub async fn update_forecast(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    payload: Result<Json<ForecastInput>, JsonRejection>,
) -> Result<StatusCode, ForecastError> {
    trace!("Entering update_forecast function");

    let input = read_body(payload)?;
    if input.id != Some(id) {
        warn!("Path id {} does not match body id {:?}", id, input.id);
        return Err(ForecastError::IdMismatch {
            path: id,
            body: input.id,
        });
    }
    let fields = validated_fields(input)?;

    match store::replace_forecast(&state.db, id, fields).await {
        Ok(_) => {
            info!("Successfully updated forecast with ID: {}", id);
            Ok(StatusCode::NO_CONTENT)
        }
        Err(DbErr::RecordNotUpdated) => {
            debug!("No row updated for forecast {}, checking existence", id);
            match store::forecast_exists(&state.db, id).await {
                Ok(false) => {
                    warn!("Forecast {} not found for update", id);
                    Err(ForecastError::NotFound(id))
                }
                Ok(true) => {
                    error!("Forecast {} exists but the update changed no row", id);
                    Err(ForecastError::Conflict(id))
                }
                Err(e) => {
                    error!("Failed to check existence of forecast {}: {}", id, e);
                    Err(e.into())
                }
            }
        }
        Err(e) => {
            error!("Failed to update forecast {}: {}", id, e);
            Err(e.into())
        }
    }
}

/// Delete a forecast
#[utoipa::path(
    delete,
    path = "/api/v1/forecasts/{id}",
    params(
        ("id" = i32, Path, description = "Forecast ID")
    ),
    responses(
        (status = 204, description = "Forecast deleted successfully"),
        (status = 404, description = "Forecast not found", body = common::ErrorResponse),
        (status = 500, description = "Internal server error", body = common::ErrorResponse)
    ),
    tag = "forecasts"
)]
#[instrument(skip(state))]
pub async fn delete_forecast(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ForecastError> {
    trace!("Entering delete_forecast function");

    match store::delete_forecast(&state.db, id).await {
        Ok(true) => {
            info!("Successfully deleted forecast with ID: {}", id);
            Ok(StatusCode::NO_CONTENT)
        }
        Ok(false) => {
            warn!("Forecast {} not found for deletion", id);
            Err(ForecastError::NotFound(id))
        }
        Err(e) => {
            error!("Failed to delete forecast {}: {}", id, e);
            Err(e.into())
        }
    }
}
