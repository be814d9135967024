//! aqi-web library - AQI prediction service
//!
//! Exposes the router and shared state so integration tests can drive the
//! HTTP surface with stub collaborators.

pub mod api;
pub mod error;
pub mod model;
pub mod services;
pub mod store;

pub use crate::error::{ApiError, ApiResult, WebError};

use axum::Router;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::model::Predictor;
use crate::services::AirQualityProvider;
use crate::store::RecordStore;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// In-memory AQI observation records
    pub store: Arc<RecordStore>,
    /// Regression model, loaded once at startup
    pub predictor: Arc<dyn Predictor>,
    /// Geocoding + air pollution lookups for the automatic flow
    pub provider: Arc<dyn AirQualityProvider>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(predictor: Arc<dyn Predictor>, provider: Arc<dyn AirQualityProvider>) -> Self {
        Self {
            store: Arc::new(RecordStore::new()),
            predictor,
            provider,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::ui_routes())
        .merge(api::prediction_routes())
        .merge(api::record_routes())
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
