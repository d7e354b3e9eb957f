//! Amenities near a trail

use serde::{Deserialize, Serialize};
use std::fmt;

/// Amenity types the places lookup can search for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmenityKind {
    Pub,
    Cafe,
}

impl AmenityKind {
    /// Tag value used by OpenStreetMap's `amenity` key
    #[must_use]
    pub fn osm_tag(&self) -> &'static str {
        match self {
            AmenityKind::Pub => "pub",
            AmenityKind::Cafe => "cafe",
        }
    }

    /// Parse a single-type selection such as "pubs" or "Cafe"
    #[must_use]
    pub fn from_selection(text: &str) -> Option<AmenityKind> {
        match text.trim().to_lowercase().as_str() {
            "pub" | "pubs" => Some(AmenityKind::Pub),
            "cafe" | "cafes" => Some(AmenityKind::Cafe),
            _ => None,
        }
    }

    /// Comma-joined tag list, e.g. "cafe, pub"
    #[must_use]
    pub fn join(kinds: &[AmenityKind]) -> String {
        kinds
            .iter()
            .map(AmenityKind::osm_tag)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for AmenityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.osm_tag())
    }
}

/// A named place with its distance from the trail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceResult {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Distance from the search center, rounded to two decimals
    pub distance_km: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_selection() {
        assert_eq!(AmenityKind::from_selection("Pubs"), Some(AmenityKind::Pub));
        assert_eq!(AmenityKind::from_selection(" cafe "), Some(AmenityKind::Cafe));
        assert_eq!(AmenityKind::from_selection("yes"), None);
    }

    #[test]
    fn test_join() {
        assert_eq!(
            AmenityKind::join(&[AmenityKind::Cafe, AmenityKind::Pub]),
            "cafe, pub"
        );
    }
}
