//! Trail records as stored in the trail dataset

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::TrailBuddyError;
use crate::geo::Coordinates;

/// Difficulty grades, easiest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Difficulty {
    VeryEasy,
    Easy,
    Moderate,
    Hard,
    VeryHard,
}

impl Difficulty {
    /// All grades in ascending order
    pub const ALL: [Difficulty; 5] = [
        Difficulty::VeryEasy,
        Difficulty::Easy,
        Difficulty::Moderate,
        Difficulty::Hard,
        Difficulty::VeryHard,
    ];

    /// Display label as it appears in the dataset
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::VeryEasy => "Very Easy",
            Difficulty::Easy => "Easy",
            Difficulty::Moderate => "Moderate",
            Difficulty::Hard => "Hard",
            Difficulty::VeryHard => "Very Hard",
        }
    }

    /// Find a difficulty label anywhere in free text.
    ///
    /// Longer labels are tried first so "very easy" never resolves to "easy".
    #[must_use]
    pub fn detect(text: &str) -> Option<Difficulty> {
        let text = text.to_lowercase();
        let mut by_length = Self::ALL;
        by_length.sort_by_key(|d| std::cmp::Reverse(d.label().len()));
        by_length
            .into_iter()
            .find(|d| text.contains(&d.label().to_lowercase()))
    }

    /// Case-insensitive comparison against a raw dataset value
    #[must_use]
    pub fn matches(&self, raw: &str) -> bool {
        raw.trim().eq_ignore_ascii_case(self.label())
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Difficulty {
    type Err = TrailBuddyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.split_whitespace().collect::<Vec<_>>().join(" ");
        Self::ALL
            .into_iter()
            .find(|d| d.matches(&normalized))
            .ok_or_else(|| TrailBuddyError::validation(format!("Unknown difficulty '{s}'")))
    }
}

impl Serialize for Difficulty {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Difficulty {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// One row of the trail dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrailRecord {
    #[serde(rename = "Trail")]
    pub name: String,
    #[serde(rename = "Difficulty")]
    pub difficulty: Difficulty,
    /// Length in kilometers
    #[serde(rename = "Distance_km")]
    pub distance_km: f64,
    /// Height of the fell in meters
    #[serde(rename = "Fell_Height_m")]
    pub fell_height_m: f64,
    /// Route category such as Loop, Out-and-back or Ridge
    #[serde(rename = "Route", default = "default_route")]
    pub route: String,
    /// Comma-separated scenery tags
    #[serde(rename = "Tags", default)]
    pub tags: String,
    #[serde(rename = "Region", default)]
    pub region: String,
    #[serde(rename = "Lat")]
    pub latitude: f64,
    #[serde(rename = "Lng")]
    pub longitude: f64,
}

fn default_route() -> String {
    "N/A".to_string()
}

impl TrailRecord {
    #[must_use]
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    /// Individual tags, trimmed, empty entries dropped
    pub fn tag_list(&self) -> impl Iterator<Item = &str> {
        self.tags.split(',').map(str::trim).filter(|t| !t.is_empty())
    }

    /// One-line description used when no generated text is available
    #[must_use]
    pub fn summary_line(&self) -> String {
        format!(
            "{} is a {} trail, {} km long.",
            self.name,
            self.difficulty,
            super::format_decimal(self.distance_km)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("very easy please", Difficulty::VeryEasy)]
    #[case("Something EASY", Difficulty::Easy)]
    #[case("moderate", Difficulty::Moderate)]
    #[case("I like it hard", Difficulty::Hard)]
    #[case("very hard!", Difficulty::VeryHard)]
    fn test_detect_prefers_longest_label(#[case] input: &str, #[case] expected: Difficulty) {
        assert_eq!(Difficulty::detect(input), Some(expected));
    }

    #[test]
    fn test_detect_without_label() {
        assert_eq!(Difficulty::detect("something gentle"), None);
        assert_eq!(Difficulty::detect(""), None);
    }

    #[test]
    fn test_parse_difficulty() {
        assert_eq!("Very  Easy".parse::<Difficulty>().unwrap(), Difficulty::VeryEasy);
        assert_eq!("hard".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert!("extreme".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_difficulty_order_and_display() {
        assert!(Difficulty::VeryEasy < Difficulty::VeryHard);
        assert_eq!(Difficulty::Moderate.to_string(), "Moderate");
    }

    #[test]
    fn test_tag_list_and_summary() {
        let trail = TrailRecord {
            name: "Catbells".to_string(),
            difficulty: Difficulty::Easy,
            distance_km: 5.5,
            fell_height_m: 451.0,
            route: "Loop".to_string(),
            tags: "lake, view,,fell ".to_string(),
            region: "North Western Fells".to_string(),
            latitude: 54.5686,
            longitude: -3.1712,
        };
        assert_eq!(trail.tag_list().collect::<Vec<_>>(), vec!["lake", "view", "fell"]);
        assert_eq!(trail.summary_line(), "Catbells is a Easy trail, 5.5 km long.");
    }

    #[test]
    fn test_summary_keeps_decimal_for_whole_distance() {
        let trail = TrailRecord {
            name: "Rannerdale Knotts".to_string(),
            difficulty: Difficulty::Easy,
            distance_km: 5.0,
            fell_height_m: 355.0,
            route: "Loop".to_string(),
            tags: String::new(),
            region: String::new(),
            latitude: 54.5512,
            longitude: -3.2961,
        };
        assert_eq!(trail.summary_line(), "Rannerdale Knotts is a Easy trail, 5.0 km long.");
    }
}
