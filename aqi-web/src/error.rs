//! Error types for aqi-web
//!
//! JSON API failures render as `{"error": message}`; browser-facing failures
//! render the HTML error page with the same message and status code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::api::ui;
use crate::services::ProviderError;

/// JSON API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or non-numeric record fields (400)
    #[error("Invalid input data")]
    InvalidInput,

    /// Unknown record id (404)
    #[error("Record not found")]
    NotFound,

    /// Anything else (500)
    #[error("Internal server error")]
    Internal(String),
}

impl From<aqi_common::Error> for ApiError {
    fn from(err: aqi_common::Error) -> Self {
        match err {
            aqi_common::Error::Validation(_) => ApiError::InvalidInput,
            aqi_common::Error::NotFound(_) => ApiError::NotFound,
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(ref detail) = self {
            tracing::error!(error = %detail, "Internal API error");
        }
        let body = Json(json!({
            "error": self.to_string(),
        }));
        (self.status(), body).into_response()
    }
}

/// Result type for JSON API handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Browser-facing prediction error
#[derive(Debug, Error)]
pub enum WebError {
    /// Manual form field missing or not a number (400)
    #[error("Invalid pollutant value: {0}")]
    InvalidPollutant(String),

    /// `city_name` absent or blank (400)
    #[error("Missing city name parameter")]
    MissingCity,

    /// Geocoding or air pollution lookup failed
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl WebError {
    pub fn status(&self) -> StatusCode {
        match self {
            WebError::InvalidPollutant(_) | WebError::MissingCity => StatusCode::BAD_REQUEST,
            WebError::Provider(ProviderError::CityNotFound) => StatusCode::NOT_FOUND,
            WebError::Provider(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, ui::error_page(&self.to_string(), status)).into_response()
    }
}
