use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use common::ErrorResponse;
use sea_orm::DbErr;
use std::collections::BTreeMap;
use validator::ValidationErrors;

/// Error type returned by the forecast handlers.
///
/// Store failures and conflicts are reported to the client as an opaque
/// internal error; the handler logs the details before returning.
#[derive(Debug, thiserror::Error)]
pub enum ForecastError {
    #[error("Forecast with id {0} not found")]
    NotFound(i32),

    #[error("One or more validation errors occurred")]
    Validation(BTreeMap<String, Vec<String>>),

    #[error("Path id {path} does not match body id {body:?}")]
    IdMismatch { path: i32, body: Option<i32> },

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Forecast {0} still exists but was not updated")]
    Conflict(i32),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl ForecastError {
    pub fn status(&self) -> StatusCode {
        match self {
            ForecastError::NotFound(_) => StatusCode::NOT_FOUND,
            ForecastError::Validation(_)
            | ForecastError::IdMismatch { .. }
            | ForecastError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ForecastError::Conflict(_) | ForecastError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ForecastError::NotFound(_) => "NOT_FOUND",
            ForecastError::Validation(_) => "VALIDATION_FAILED",
            ForecastError::IdMismatch { .. } => "ID_MISMATCH",
            ForecastError::InvalidBody(_) => "INVALID_BODY",
            ForecastError::Conflict(_) | ForecastError::Database(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<ValidationErrors> for ForecastError {
    fn from(errors: ValidationErrors) -> Self {
        let fields = errors
            .field_errors()
            .into_iter()
            .map(|(field, errors)| {
                let messages = errors
                    .iter()
                    .map(|e| match &e.message {
                        Some(message) => message.to_string(),
                        None => e.code.to_string(),
                    })
                    .collect();
                (camel_case(&field.to_string()), messages)
            })
            .collect();
        ForecastError::Validation(fields)
    }
}

impl IntoResponse for ForecastError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code().to_string();

        let body = match self {
            ForecastError::Validation(fields) => ErrorResponse {
                error: "One or more validation errors occurred".to_string(),
                code,
                success: false,
                fields: Some(fields),
            },
            ForecastError::IdMismatch { .. } => ErrorResponse {
                error: "The id in the URL does not match the id in the request body".to_string(),
                code,
                success: false,
                fields: None,
            },
            ForecastError::Conflict(_) | ForecastError::Database(_) => ErrorResponse {
                error: "An internal error occurred".to_string(),
                code,
                success: false,
                fields: None,
            },
            other => ErrorResponse {
                error: other.to_string(),
                code,
                success: false,
                fields: None,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// `temperature_c` -> `temperatureC`
fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for ch in field.chars() {
        if ch == '_' {
            upper = true;
        } else if upper {
            out.extend(ch.to_uppercase());
            upper = false;
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use common::ForecastInput;
    use validator::Validate;

    #[test]
    fn test_camel_case_field_names() {
        assert_eq!(camel_case("temperature_c"), "temperatureC");
        assert_eq!(camel_case("summary"), "summary");
        assert_eq!(camel_case("date"), "date");
    }

    #[test]
    fn test_validation_errors_are_keyed_by_wire_name() {
        let errors = ForecastInput::default().validate().unwrap_err();

        let ForecastError::Validation(fields) = ForecastError::from(errors) else {
            panic!("expected a validation error");
        };

        assert!(fields.contains_key("date"));
        assert!(fields.contains_key("temperatureC"));
        assert!(!fields.contains_key("temperature_c"));
        assert_eq!(fields["date"], vec!["The date field is required.".to_string()]);
    }

    #[test]
    fn test_summary_length_message() {
        let input = ForecastInput::new(
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            1,
            Some("x".repeat(101)),
        );
        let ForecastError::Validation(fields) = ForecastError::from(input.validate().unwrap_err())
        else {
            panic!("expected a validation error");
        };

        assert_eq!(fields.len(), 1);
        assert!(fields["summary"][0].contains("100"));
    }

    #[test]
    fn test_status_and_code_mapping() {
        let cases = [
            (ForecastError::NotFound(1), StatusCode::NOT_FOUND, "NOT_FOUND"),
            (
                ForecastError::IdMismatch { path: 1, body: Some(2) },
                StatusCode::BAD_REQUEST,
                "ID_MISMATCH",
            ),
            (
                ForecastError::InvalidBody("eof".to_string()),
                StatusCode::BAD_REQUEST,
                "INVALID_BODY",
            ),
            (ForecastError::Conflict(3), StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            (
                ForecastError::Database(DbErr::Custom("boom".to_string())),
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
            ),
        ];

        for (error, status, code) in cases {
            assert_eq!(error.status(), status, "{:?}", error);
            assert_eq!(error.code(), code, "{:?}", error);
        }
    }

    #[tokio::test]
    async fn test_internal_errors_do_not_leak_details() {
        let response =
            ForecastError::Database(DbErr::Custom("SELECT secret".to_string())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: ErrorResponse = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(body.error, "An internal error occurred");
        assert_eq!(body.code, "INTERNAL_ERROR");
        assert!(!body.success);
        assert!(!String::from_utf8_lossy(&bytes).contains("secret"));
    }
}
