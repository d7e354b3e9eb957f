//! OpenStreetMap Overpass client
//!
//! Sends a single Overpass QL query asking for amenity nodes around a point
//! and converts the returned elements into [`PlaceResult`]s.

use std::time::{Duration, Instant};

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashMap;
use tracing::{debug, error, info, instrument};

use super::PlacesProvider;
use crate::TrailBuddyError;
use crate::config::PlacesConfig;
use crate::geo::distance_km;
use crate::models::{AmenityKind, PlaceResult};

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
struct OverpassElement {
    lat: Option<f64>,
    lon: Option<f64>,
    #[serde(default)]
    tags: HashMap<String, String>,
}

/// Build the Overpass QL query for the given amenity kinds
#[must_use]
pub fn build_query(latitude: f64, longitude: f64, radius_m: u32, kinds: &[AmenityKind]) -> String {
    let selectors: String = kinds
        .iter()
        .map(|kind| {
            format!(
                "node[\"amenity\"=\"{}\"](around:{},{},{});",
                kind.osm_tag(),
                radius_m,
                latitude,
                longitude
            )
        })
        .collect();

    format!("[out:json];\n(\n{selectors}\n);\nout center;")
}

fn to_places(response: OverpassResponse, latitude: f64, longitude: f64) -> Vec<PlaceResult> {
    response
        .elements
        .into_iter()
        .map(|element| {
            let place_lat = element.lat.unwrap_or(0.0);
            let place_lon = element.lon.unwrap_or(0.0);
            let distance = distance_km(latitude, longitude, place_lat, place_lon);
            PlaceResult {
                name: element
                    .tags
                    .get("name")
                    .cloned()
                    .unwrap_or_else(|| "Unknown".to_string()),
                latitude: place_lat,
                longitude: place_lon,
                distance_km: (distance * 100.0).round() / 100.0,
            }
        })
        .collect()
}

/// Places client for the Overpass API
pub struct OverpassClient {
    client: Client,
    base_url: String,
}

impl OverpassClient {
    pub fn new(config: &PlacesConfig) -> crate::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("TrailBuddy/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TrailBuddyError::api(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    async fn fetch(
        &self,
        latitude: f64,
        longitude: f64,
        radius_m: u32,
        kinds: &[AmenityKind],
    ) -> Result<Vec<PlaceResult>> {
        let query = build_query(latitude, longitude, radius_m, kinds);
        debug!("Overpass query: {}", query);

        let response = self
            .client
            .post(&self.base_url)
            .form(&[("data", query.as_str())])
            .send()
            .await
            .with_context(|| "Overpass request failed")?;

        if !response.status().is_success() {
            return Err(anyhow!("Overpass API error {}", response.status()));
        }

        let parsed: OverpassResponse = response
            .json()
            .await
            .with_context(|| "Failed to parse Overpass response")?;

        Ok(to_places(parsed, latitude, longitude))
    }
}

#[async_trait]
impl PlacesProvider for OverpassClient {
    #[instrument(skip(self))]
    async fn nearby(
        &self,
        latitude: f64,
        longitude: f64,
        radius_m: u32,
        kinds: &[AmenityKind],
    ) -> Vec<PlaceResult> {
        if kinds.is_empty() {
            return Vec::new();
        }

        let start_time = Instant::now();
        match self.fetch(latitude, longitude, radius_m, kinds).await {
            Ok(places) => {
                info!(
                    "Found {} {} within {} m in {:.3}s",
                    places.len(),
                    AmenityKind::join(kinds),
                    radius_m,
                    start_time.elapsed().as_secs_f64()
                );
                places
            }
            Err(e) => {
                error!("OSM API error: {:#}", e);
                Vec::new()
            }
        }
    }
}
