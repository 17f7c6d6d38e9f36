use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    BadRequest(#[from] core_types::CoreError),
    #[error("Dataset error: {0}")]
    Dataset(#[from] dataset::DatasetError),
    #[error("Localisation error: {0}")]
    I18n(#[from] i18n::I18nError),
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::BadRequest(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            AppError::Dataset(dataset_err) => {
                tracing::error!(error = ?dataset_err, "Dataset error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "The fund dataset could not be read".to_string(),
                )
            }
            AppError::I18n(i18n_err) => {
                tracing::error!(error = ?i18n_err, "Localisation error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "The label catalogue could not be read".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
