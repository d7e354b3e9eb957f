//! Current weather conditions at a trail

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Current conditions reported by the weather service.
///
/// Missing readings stay `None` and render as `?`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    /// Temperature in Celsius
    pub temperature: Option<f64>,
    /// Wind speed in km/h
    pub windspeed: Option<f64>,
    /// WMO weather interpretation code
    pub weather_code: i32,
    /// Local observation time, when the service reports one
    pub observed_at: Option<NaiveDateTime>,
}

impl WeatherReport {
    /// Sentinel report used when the weather service is unavailable
    #[must_use]
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Human-readable description of the weather code
    #[must_use]
    pub fn description(&self) -> &'static str {
        weather_code_to_description(self.weather_code)
    }

    /// Format temperature, `?` when unknown
    #[must_use]
    pub fn format_temperature(&self) -> String {
        format_reading(self.temperature)
    }

    /// Format wind speed, `?` when unknown
    #[must_use]
    pub fn format_windspeed(&self) -> String {
        format_reading(self.windspeed)
    }
}

fn format_reading(value: Option<f64>) -> String {
    value.map_or_else(|| "?".to_string(), super::format_decimal)
}

/// Convert a WMO weather code to a short description
#[must_use]
pub fn weather_code_to_description(code: i32) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        71 | 73 => "Snow",
        75 => "Heavy snow",
        80..=82 => "Rain showers",
        _ => "Unknown weather",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, "Clear sky")]
    #[case(3, "Overcast")]
    #[case(63, "Moderate rain")]
    #[case(73, "Snow")]
    #[case(81, "Rain showers")]
    #[case(45, "Unknown weather")]
    #[case(999, "Unknown weather")]
    fn test_weather_code_mapping(#[case] code: i32, #[case] expected: &str) {
        assert_eq!(weather_code_to_description(code), expected);
    }

    #[test]
    fn test_unavailable_report_uses_sentinels() {
        let report = WeatherReport::unavailable();
        assert_eq!(report.format_temperature(), "?");
        assert_eq!(report.format_windspeed(), "?");
        assert_eq!(report.weather_code, 0);
        assert_eq!(report.description(), "Clear sky");
    }

    #[test]
    fn test_format_readings() {
        let report = WeatherReport {
            temperature: Some(12.5),
            windspeed: Some(18.0),
            weather_code: 2,
            observed_at: None,
        };
        assert_eq!(report.format_temperature(), "12.5");
        assert_eq!(report.format_windspeed(), "18.0");
        assert_eq!(report.description(), "Partly cloudy");
    }
}
