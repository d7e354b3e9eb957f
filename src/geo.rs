//! Great-circle distance helpers

use haversine::{Location as HaversineLocation, Units, distance};
use serde::{Deserialize, Serialize};

/// A point on the globe in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Distance to another point in kilometers
    #[must_use]
    pub fn distance_to(&self, other: &Coordinates) -> f64 {
        distance_km(self.latitude, self.longitude, other.latitude, other.longitude)
    }

    /// Format as "lat, lon" with four decimals
    #[must_use]
    pub fn format_coordinates(&self) -> String {
        format!("{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// Haversine distance in kilometers on a sphere of radius 6371 km
#[must_use]
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let from = HaversineLocation {
        latitude: lat1,
        longitude: lon1,
    };
    let to = HaversineLocation {
        latitude: lat2,
        longitude: lon2,
    };
    distance(from, to, Units::Kilometers).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_to_self_is_zero() {
        assert_eq!(distance_km(54.4609, -3.0886, 54.4609, -3.0886), 0.0);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let there = distance_km(54.4609, -3.0886, 54.5262, -3.0167);
        let back = distance_km(54.5262, -3.0167, 54.4609, -3.0886);
        assert!((there - back).abs() < 1e-9);
    }

    #[test]
    fn test_distance_known_value() {
        // One degree of latitude on a 6371 km sphere
        let d = distance_km(0.0, 0.0, 1.0, 0.0);
        assert!((d - 111.195).abs() < 0.01, "got {d}");
    }

    #[test]
    fn test_coordinates_distance_to() {
        let keswick = Coordinates::new(54.6013, -3.1347);
        let ambleside = Coordinates::new(54.4287, -2.9613);
        let d = keswick.distance_to(&ambleside);
        assert!(d > 20.0 && d < 25.0, "got {d}");
        assert_eq!(keswick.format_coordinates(), "54.6013, -3.1347");
    }
}
