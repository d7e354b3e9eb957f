//! Open-Meteo current weather client
//!
//! One GET per lookup against the `forecast` endpoint with
//! `current_weather=true`. No API key is required.

use std::time::{Duration, Instant};

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, info, instrument};

use super::WeatherProvider;
use crate::TrailBuddyError;
use crate::config::WeatherConfig;
use crate::models::WeatherReport;

/// `OpenMeteo` forecast response, reduced to the current conditions block
#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current_weather: Option<CurrentWeather>,
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    temperature: Option<f64>,
    windspeed: Option<f64>,
    weathercode: Option<i32>,
    time: Option<String>,
}

impl From<ForecastResponse> for WeatherReport {
    fn from(response: ForecastResponse) -> Self {
        let Some(current) = response.current_weather else {
            return WeatherReport::unavailable();
        };

        WeatherReport {
            temperature: current.temperature,
            windspeed: current.windspeed,
            weather_code: current.weathercode.unwrap_or(0),
            observed_at: current
                .time
                .as_deref()
                .and_then(|t| NaiveDateTime::parse_from_str(t, "%Y-%m-%dT%H:%M").ok()),
        }
    }
}

/// Weather client for the Open-Meteo API
pub struct OpenMeteoClient {
    client: Client,
    base_url: String,
}

impl OpenMeteoClient {
    pub fn new(config: &WeatherConfig) -> crate::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("TrailBuddy/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TrailBuddyError::api(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn current_weather_url(&self, latitude: f64, longitude: f64) -> String {
        format!(
            "{}/forecast?latitude={}&longitude={}&current_weather=true",
            self.base_url, latitude, longitude
        )
    }

    async fn fetch(&self, latitude: f64, longitude: f64) -> Result<WeatherReport> {
        let url = self.current_weather_url(latitude, longitude);
        debug!("OpenMeteo API request URL: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| "OpenMeteo request failed")?;

        if !response.status().is_success() {
            return Err(anyhow!("OpenMeteo API error {}", response.status()));
        }

        let forecast: ForecastResponse = response
            .json()
            .await
            .with_context(|| "Failed to parse OpenMeteo weather response")?;

        Ok(forecast.into())
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoClient {
    #[instrument(skip(self))]
    async fn current_weather(&self, latitude: f64, longitude: f64) -> WeatherReport {
        let start_time = Instant::now();

        match self.fetch(latitude, longitude).await {
            Ok(report) => {
                info!(
                    "Retrieved current weather for {:.4}, {:.4} in {:.3}s",
                    latitude,
                    longitude,
                    start_time.elapsed().as_secs_f64()
                );
                report
            }
            Err(e) => {
                error!("Weather API error: {:#}", e);
                WeatherReport::unavailable()
            }
        }
    }
}
