//! HTTP API handlers for aqi-web

pub mod health;
pub mod predict;
pub mod records;
pub mod ui;

pub use health::health_routes;
pub use predict::prediction_routes;
pub use records::record_routes;
pub use ui::ui_routes;
