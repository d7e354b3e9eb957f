//! Candidate ranking
//!
//! Ordering, best first:
//! 1. trails within the requested distance before trails over it
//! 2. smaller gap between trail length and requested distance
//! 3. more scenery keyword hits
//! 4. dataset order

use std::cmp::{Ordering, Reverse};
use std::fmt;

use super::{SceneryPreference, TrailCandidate, TrailQuery};

/// Sort candidates best first. The sort is stable, so ties keep dataset order.
#[must_use]
pub fn rank_candidates(
    mut candidates: Vec<TrailCandidate>,
    preference: &SceneryPreference,
) -> Vec<TrailCandidate> {
    candidates.sort_by(|a, b| compare(a, b, preference));
    candidates
}

fn compare(a: &TrailCandidate, b: &TrailCandidate, preference: &SceneryPreference) -> Ordering {
    let over = |c: &TrailCandidate| c.distance_diff.is_some_and(|d| d > 0.0);
    let gap = |c: &TrailCandidate| c.distance_diff.map_or(0.0, f64::abs);

    over(a)
        .cmp(&over(b))
        .then_with(|| gap(a).total_cmp(&gap(b)))
        .then_with(|| {
            Reverse(preference.match_count(&a.trail))
                .cmp(&Reverse(preference.match_count(&b.trail)))
        })
}

/// Why a trail was picked, logged alongside the recommendation
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionRationale {
    pub query: String,
    pub scenery_keywords: Vec<String>,
    pub candidates_considered: usize,
    pub selected: String,
    pub distance_diff: Option<f64>,
    pub scenery_matches: usize,
}

impl SelectionRationale {
    #[must_use]
    pub fn new(
        query: &TrailQuery,
        preference: &SceneryPreference,
        ranked: &[TrailCandidate],
    ) -> Option<Self> {
        let best = ranked.first()?;
        Some(Self {
            query: format!(
                "difficulty={} max_distance={} route={}",
                query.difficulty.map_or_else(|| "any".to_string(), |d| d.to_string()),
                query
                    .max_distance_km
                    .map_or_else(|| "any".to_string(), |d| format!("{d} km")),
                query.route_type.as_deref().unwrap_or("any"),
            ),
            scenery_keywords: preference.keywords().to_vec(),
            candidates_considered: ranked.len(),
            selected: best.trail.name.clone(),
            distance_diff: best.distance_diff,
            scenery_matches: preference.match_count(&best.trail),
        })
    }
}

impl fmt::Display for SelectionRationale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "picked '{}' out of {} candidates ({}, scenery {:?} matched {} time(s)",
            self.selected,
            self.candidates_considered,
            self.query,
            self.scenery_keywords,
            self.scenery_matches
        )?;
        if let Some(diff) = self.distance_diff {
            write!(f, ", {diff:+.1} km against requested distance")?;
        }
        write!(f, ")")
    }
}
