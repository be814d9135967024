//! External collaborators

pub mod openweather_client;

pub use openweather_client::{
    AirQualityProvider, Coordinates, OpenWeatherClient, ProviderError,
};
