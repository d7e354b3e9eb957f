//! Trail Catalog
//!
//! Loads the trail dataset once at startup and answers filter queries over it.
//! The catalog is read-only after loading and can be shared between
//! conversations.

use std::io::Read;
use std::path::Path;

use tracing::{debug, error, info};

use crate::Result;
use crate::models::{Difficulty, TrailRecord};

/// Default cap on the number of trails a filter returns
pub const DEFAULT_MAX_RESULTS: usize = 10;

/// Hard and soft constraints for a catalog lookup
#[derive(Debug, Clone, Default)]
pub struct TrailQuery {
    pub difficulty: Option<Difficulty>,
    pub max_distance_km: Option<f64>,
    /// Route category, matched case-insensitively
    pub route_type: Option<String>,
    /// Annotate instead of excluding trails longer than `max_distance_km`
    pub soft_distance: bool,
}

/// A trail that survived filtering
#[derive(Debug, Clone, PartialEq)]
pub struct TrailCandidate {
    pub trail: TrailRecord,
    /// `distance_km - max_distance_km`, set by soft distance filtering
    pub distance_diff: Option<f64>,
}

/// In-memory trail dataset
#[derive(Debug, Clone)]
pub struct TrailCatalog {
    trails: Vec<TrailRecord>,
    max_results: usize,
}

impl TrailCatalog {
    /// Build a catalog from already parsed records
    #[must_use]
    pub fn from_records(trails: Vec<TrailRecord>) -> Self {
        Self {
            trails,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    /// Load the dataset, falling back to an empty catalog on any error
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(catalog) => catalog,
            Err(e) => {
                error!("Failed to load trails from {}: {}", path.display(), e);
                Self::from_records(Vec::new())
            }
        }
    }

    /// Load the dataset; a single malformed row fails the whole load
    pub fn try_load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let catalog = Self::from_reader(file)?;
        info!("Loaded {} trails from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Parse CSV with a header row from any reader
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let trails = csv_reader
            .deserialize::<TrailRecord>()
            .collect::<std::result::Result<Vec<_>, csv::Error>>()?;

        Ok(Self::from_records(trails))
    }

    /// Override the result cap
    #[must_use]
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results.max(1);
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.trails.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trails.is_empty()
    }

    #[must_use]
    pub fn trails(&self) -> &[TrailRecord] {
        &self.trails
    }

    /// Apply the query, preserving dataset order, capped at `max_results`
    #[must_use]
    pub fn filter(&self, query: &TrailQuery) -> Vec<TrailCandidate> {
        let route_type = query
            .route_type
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty());

        let candidates: Vec<TrailCandidate> = self
            .trails
            .iter()
            .filter(|t| query.difficulty.is_none_or(|d| t.difficulty == d))
            .filter(|t| route_type.is_none_or(|r| t.route.trim().eq_ignore_ascii_case(r)))
            .filter(|t| match query.max_distance_km {
                Some(max) if !query.soft_distance => t.distance_km <= max,
                _ => true,
            })
            .take(self.max_results)
            .map(|t| TrailCandidate {
                trail: t.clone(),
                distance_diff: match query.max_distance_km {
                    Some(max) if query.soft_distance => Some(t.distance_km - max),
                    _ => None,
                },
            })
            .collect();

        debug!(
            "Catalog filter {:?} matched {} of {} trails",
            query,
            candidates.len(),
            self.trails.len()
        );

        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Trail,Difficulty,Distance_km,Fell_Height_m,Route,Tags,Region,Lat,Lng
Catbells,Easy,5.5,451,Loop,\"lake, view\",North Western Fells,54.5686,-3.1712
Helvellyn via Striding Edge,Very Hard,12.5,950,Ridge,\"ridge, mountain, tarn\",Eastern Fells,54.5271,-3.0164
Loughrigg Fell,Easy,11.0,335,Loop,\"lake, forest\",Central Fells,54.4370,-2.9960
Tarn Hows,Very Easy,3.0,200,loop,\"lake, forest\",Southern Fells,54.3880,-3.0375
";

    fn sample_catalog() -> TrailCatalog {
        TrailCatalog::from_reader(SAMPLE.as_bytes()).unwrap()
    }

    fn single_trail_catalog() -> TrailCatalog {
        TrailCatalog::from_reader(
            "Trail,Difficulty,Distance_km,Fell_Height_m,Route,Lat,Lng\nWalla Crag,Easy,5,379,Loop,54.59,-3.12\n"
                .as_bytes(),
        )
        .unwrap()
    }

    #[test]
    fn test_load_sample() {
        let catalog = sample_catalog();
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.trails()[1].difficulty, Difficulty::VeryHard);
        assert_eq!(catalog.trails()[0].tags, "lake, view");
    }

    #[test]
    fn test_optional_columns_default() {
        let catalog = single_trail_catalog();
        let trail = &catalog.trails()[0];
        assert_eq!(trail.tags, "");
        assert_eq!(trail.region, "");

        let no_route = TrailCatalog::from_reader(
            "Trail,Difficulty,Distance_km,Fell_Height_m,Lat,Lng\nLatrigg,Very Easy,3,368,54.61,-3.12\n"
                .as_bytes(),
        )
        .unwrap();
        assert_eq!(no_route.trails()[0].route, "N/A");
    }

    #[test]
    fn test_malformed_row_fails_whole_load() {
        let data = "Trail,Difficulty,Distance_km,Fell_Height_m,Route,Lat,Lng\n\
                    Good,Easy,5,300,Loop,54.5,-3.1\n\
                    Bad,Easy,five,300,Loop,54.5,-3.1\n";
        assert!(TrailCatalog::from_reader(data.as_bytes()).is_err());
    }

    #[test]
    fn test_missing_file_yields_empty_catalog() {
        let catalog = TrailCatalog::load("does/not/exist.csv");
        assert!(catalog.is_empty());
        assert!(TrailCatalog::try_load("does/not/exist.csv").is_err());
    }

    #[test]
    fn test_single_trail_matches_case_insensitively() {
        let catalog = single_trail_catalog();
        let query = TrailQuery {
            difficulty: Some("easy".parse().unwrap()),
            max_distance_km: Some(10.0),
            route_type: Some("LOOP".to_string()),
            soft_distance: false,
        };
        let result = catalog.filter(&query);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].trail.name, "Walla Crag");

        let hard = TrailQuery {
            difficulty: Some(Difficulty::Hard),
            ..query
        };
        assert!(catalog.filter(&hard).is_empty());
    }

    #[test]
    fn test_hard_distance_excludes_long_trails() {
        let catalog = sample_catalog();
        let query = TrailQuery {
            difficulty: Some(Difficulty::Easy),
            max_distance_km: Some(10.0),
            ..TrailQuery::default()
        };
        let names: Vec<_> = catalog.filter(&query).into_iter().map(|c| c.trail.name).collect();
        assert_eq!(names, vec!["Catbells"]);
    }

    #[test]
    fn test_soft_distance_annotates_instead_of_excluding() {
        let catalog = sample_catalog();
        let query = TrailQuery {
            difficulty: Some(Difficulty::Easy),
            max_distance_km: Some(10.0),
            route_type: None,
            soft_distance: true,
        };
        let result = catalog.filter(&query);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].distance_diff, Some(-4.5));
        assert_eq!(result[1].distance_diff, Some(1.0));
    }

    #[test]
    fn test_no_constraints_preserves_order_and_cap() {
        let catalog = sample_catalog().with_max_results(3);
        let result = catalog.filter(&TrailQuery::default());
        let names: Vec<_> = result.iter().map(|c| c.trail.name.as_str()).collect();
        assert_eq!(names, vec!["Catbells", "Helvellyn via Striding Edge", "Loughrigg Fell"]);
        assert!(result.iter().all(|c| c.distance_diff.is_none()));
    }

    #[test]
    fn test_blank_route_type_is_no_constraint() {
        let catalog = sample_catalog();
        let query = TrailQuery {
            route_type: Some("  ".to_string()),
            ..TrailQuery::default()
        };
        assert_eq!(catalog.filter(&query).len(), 4);
    }
}
