//! Trail selection
//!
//! - Catalog: loads the trail dataset and applies hard filters
//! - Scenery: expands a free-text scenery preference into tag keywords
//! - Ranking: orders the surviving candidates and picks one

pub mod catalog;
pub mod ranking;
pub mod scenery;

pub use catalog::{TrailCandidate, TrailCatalog, TrailQuery};
pub use ranking::{SelectionRationale, rank_candidates};
pub use scenery::{SceneryPreference, filter_by_scenery};
