//! Scenery preference matching
//!
//! A free-text preference like "somewhere scenic by water" is split into
//! words, each word is expanded through a fixed synonym table, and trails
//! are kept when their tags mention any of the resulting keywords.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::TrailCandidate;
use crate::models::TrailRecord;

static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").expect("valid word regex"));

fn synonyms(word: &str) -> Option<&'static [&'static str]> {
    let expanded: &'static [&'static str] = match word {
        "scenic" => &["panoramic", "lake", "forest", "view", "fell", "mountain", "scenic"],
        "water" => &["lake", "river", "stream", "waterfall", "pond"],
        "mountain" => &["fell", "peak", "ridge", "mountain"],
        "forest" => &["woodland", "forest", "trees"],
        "lake" => &["lake", "water", "pond"],
        "panoramic" => &["panoramic", "view", "scenic"],
        "relaxing" => &["peaceful", "quiet", "relaxing"],
        _ => return None,
    };
    Some(expanded)
}

/// Keywords derived from a scenery preference
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneryPreference {
    keywords: Vec<String>,
}

impl SceneryPreference {
    /// Expand free text into keywords; words without synonyms stand for themselves
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let lowered = text.to_lowercase();
        let mut keywords: Vec<String> = Vec::new();

        for word in WORD.find_iter(&lowered).map(|m| m.as_str()) {
            let expanded = synonyms(word).map_or_else(|| vec![word], |s| s.to_vec());
            for keyword in expanded {
                if !keywords.iter().any(|k| k == keyword) {
                    keywords.push(keyword.to_string());
                }
            }
        }

        Self { keywords }
    }

    #[must_use]
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Number of keywords found in the trail's tags
    #[must_use]
    pub fn match_count(&self, trail: &TrailRecord) -> usize {
        let tags = trail.tags.to_lowercase();
        self.keywords
            .iter()
            .filter(|k| tags.contains(k.as_str()))
            .count()
    }

    #[must_use]
    pub fn matches(&self, trail: &TrailRecord) -> bool {
        self.match_count(trail) > 0
    }
}

/// Keep candidates whose tags match the preference.
///
/// When nothing matches, the input is returned unchanged so a scenery wish
/// never blocks trail selection.
#[must_use]
pub fn filter_by_scenery(
    candidates: Vec<TrailCandidate>,
    preference: &SceneryPreference,
) -> Vec<TrailCandidate> {
    if preference.is_empty() {
        return candidates;
    }

    let matching: Vec<TrailCandidate> = candidates
        .iter()
        .filter(|c| preference.matches(&c.trail))
        .cloned()
        .collect();

    if matching.is_empty() {
        debug!(
            "No trail matches scenery keywords {:?}, keeping all {} candidates",
            preference.keywords(),
            candidates.len()
        );
        candidates
    } else {
        matching
    }
}
