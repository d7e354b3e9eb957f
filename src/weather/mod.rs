//! Current weather at a trail

use async_trait::async_trait;

use crate::models::WeatherReport;

pub mod open_meteo;

pub use open_meteo::OpenMeteoClient;

/// Source of current weather conditions
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Current conditions; `WeatherReport::unavailable()` on any failure
    async fn current_weather(&self, latitude: f64, longitude: f64) -> WeatherReport;
}
