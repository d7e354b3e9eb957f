//! Pubs and cafes near a trail

use async_trait::async_trait;

use crate::models::{AmenityKind, PlaceResult};

pub mod overpass;

pub use overpass::OverpassClient;

/// Source of nearby amenities
#[async_trait]
pub trait PlacesProvider: Send + Sync {
    /// Places of the given kinds within `radius_m` meters, in upstream order.
    /// Empty on any failure.
    async fn nearby(
        &self,
        latitude: f64,
        longitude: f64,
        radius_m: u32,
        kinds: &[AmenityKind],
    ) -> Vec<PlaceResult>;
}
