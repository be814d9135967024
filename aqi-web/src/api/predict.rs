//! Prediction flows
//!
//! Manual: the visitor types six pollutant values into a form.
//! Automatic: the visitor names a city; readings come from OpenWeather.
//! Both feed the same predictor and render the same result page.

use aqi_common::{AqiCategory, Pollutants};
use axum::{
    extract::State,
    response::Html,
    routing::get,
    Form, Router,
};
use std::collections::HashMap;
use tracing::info;

use crate::api::ui;
use crate::error::WebError;
use crate::AppState;

/// Build prediction routes (form pages on GET, predictions on POST)
pub fn prediction_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/predict_manually",
            get(ui::manual_form_page).post(predict_manually),
        )
        .route(
            "/predict_automatically",
            get(ui::city_form_page).post(predict_automatically),
        )
}

/// Outcome shown on the result page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Assessment {
    pub prediction: f64,
    pub category: AqiCategory,
}

impl Assessment {
    pub fn new(prediction: f64) -> Self {
        Self {
            prediction,
            category: AqiCategory::classify(prediction),
        }
    }
}

/// Round to two decimal places for display of live readings
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// POST /predict_manually
pub async fn predict_manually(
    State(state): State<AppState>,
    Form(form): Form<HashMap<String, String>>,
) -> Result<Html<String>, WebError> {
    let input = Pollutants::from_form(&form).map_err(|e| match e {
        aqi_common::Error::Validation(field) => WebError::InvalidPollutant(field),
        other => WebError::InvalidPollutant(other.to_string()),
    })?;

    let assessment = Assessment::new(state.predictor.predict(&input));
    info!(
        prediction = assessment.prediction,
        category = assessment.category.name(),
        "Manual prediction"
    );
    Ok(ui::results_page(&assessment))
}

/// POST /predict_automatically
pub async fn predict_automatically(
    State(state): State<AppState>,
    Form(form): Form<HashMap<String, String>>,
) -> Result<Html<String>, WebError> {
    let city = form
        .get("city_name")
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .ok_or(WebError::MissingCity)?;

    let coords = state.provider.locate(city).await?;
    let input = state.provider.components(coords).await?;

    let assessment = Assessment::new(round2(state.predictor.predict(&input)));
    info!(
        city = %city,
        prediction = assessment.prediction,
        category = assessment.category.name(),
        "Automatic prediction"
    );
    Ok(ui::results_page(&assessment))
}
