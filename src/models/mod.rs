//! Data models for `TrailBuddy`
//!
//! This module contains the core domain models organized by concern:
//! - Trail: records loaded from the trail dataset
//! - Weather: current conditions at a trail
//! - Place: pubs and cafes near a trail

pub mod place;
pub mod trail;
pub mod weather;

// Re-export all public types for convenient access
pub use place::{AmenityKind, PlaceResult};
pub use trail::{Difficulty, TrailRecord};
pub use weather::{WeatherReport, weather_code_to_description};

/// Render a measurement the way the dataset shows it: whole values keep one
/// decimal (`5.0`), anything else prints as-is (`2.31`)
#[must_use]
pub fn format_decimal(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(5.0, "5.0")]
    #[case(22.0, "22.0")]
    #[case(0.0, "0.0")]
    #[case(5.5, "5.5")]
    #[case(2.31, "2.31")]
    #[case(-3.0, "-3.0")]
    fn test_format_decimal(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(format_decimal(value), expected);
    }
}
