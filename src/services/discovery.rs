// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Facility discovery from OpenStreetMap via the Overpass API.
//!
//! Handles:
//! - Bounding box construction around a point
//! - Overpass query and response parsing
//! - Mapping OSM tags onto our sport categories and opening hours
//! - De-duplication against facilities we already have

use crate::models::{Facility, NewFacility, Sport};
use crate::services::opening_hours::parse_osm_opening_hours;
use geo::{coord, Rect};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};

/// Meters per degree of latitude used for the bounding box.
const METERS_PER_DEGREE: f64 = 111_320.0;

/// Default and maximum search radius.
pub const DEFAULT_RADIUS_KM: f64 = 5.0;
pub const MAX_RADIUS_KM: f64 = 10.0;

/// Overpass API client.
#[derive(Clone)]
pub struct DiscoveryService {
    http: reqwest::Client,
    overpass_url: String,
}

impl DiscoveryService {
    pub fn new(overpass_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            overpass_url: overpass_url.into(),
        }
    }

    /// Fetch sports-related OSM elements within `radius_km` of a point.
    pub async fn fetch_elements(
        &self,
        lat: f64,
        lng: f64,
        radius_km: f64,
    ) -> Result<Vec<OverpassElement>, DiscoveryError> {
        let bbox = bounding_box(lat, lng, radius_km);
        let query = build_query(&bbox);

        tracing::info!(lat, lng, radius_km, "Querying Overpass");

        let response = self
            .http
            .post(&self.overpass_url)
            .header(reqwest::header::CONTENT_TYPE, "text/plain")
            .body(query)
            .send()
            .await
            .map_err(|e| DiscoveryError::Request(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let snippet: String = body.chars().take(100).collect();
            tracing::warn!(status = %status, body = %snippet, "Overpass request failed");
            return Err(DiscoveryError::Status(format!("HTTP {}: {}", status, snippet)));
        }

        let parsed: OverpassResponse = response
            .json()
            .await
            .map_err(|e| DiscoveryError::Parse(e.to_string()))?;

        tracing::info!(elements = parsed.elements.len(), "Overpass response received");
        Ok(parsed.elements)
    }
}

/// Square-ish box around a point, `radius_km` in each direction.
pub fn bounding_box(lat: f64, lng: f64, radius_km: f64) -> Rect<f64> {
    let delta = radius_km * 1000.0 / METERS_PER_DEGREE;
    let lng_delta = delta / lat.to_radians().cos();

    Rect::new(
        coord! { x: lng - lng_delta, y: lat - delta },
        coord! { x: lng + lng_delta, y: lat + delta },
    )
}

/// Overpass QL for pitches, sports centres, and anything tagged with a sport.
pub fn build_query(bbox: &Rect<f64>) -> String {
    let (min, max) = (bbox.min(), bbox.max());
    // Overpass wants south,west,north,east
    let b = format!("{},{},{},{}", min.y, min.x, max.y, max.x);
    format!(
        r#"
    [out:json][timeout:15];
    (
      node["leisure"="pitch"]({b});
      node["leisure"="sports_centre"]({b});
      node["sport"]({b});
      way["leisure"="pitch"]({b});
      way["leisure"="sports_centre"]({b});
    );
    out center;
  "#
    )
}

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

/// One node or way from an Overpass response.
#[derive(Debug, Clone, Deserialize)]
pub struct OverpassElement {
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    /// Present for ways when the query asks for `out center`
    #[serde(default)]
    pub center: Option<OverpassCenter>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OverpassCenter {
    pub lat: f64,
    pub lon: f64,
}

impl OverpassElement {
    /// Node position, or the way's center.
    pub fn position(&self) -> Option<(f64, f64)> {
        match (self.lat, self.lon, &self.center) {
            (Some(lat), Some(lon), _) => Some((lat, lon)),
            (_, _, Some(center)) => Some((center.lat, center.lon)),
            _ => None,
        }
    }
}

/// Map an OSM `sport` tag onto our categories. Only the first of several
/// `;`-separated values is used.
pub fn osm_sport(raw: Option<&str>) -> Sport {
    let Some(raw) = raw else {
        return Sport::Other;
    };
    let first = raw.split(';').next().unwrap_or("").trim();
    let normalized = first.to_lowercase().replace('-', "_");

    match normalized.as_str() {
        "soccer" => Sport::Soccer,
        "basketball" => Sport::Basketball,
        "tennis" => Sport::Tennis,
        "volleyball" | "beachvolleyball" => Sport::Volleyball,
        "american_football" | "football" => Sport::Football,
        "baseball" => Sport::Baseball,
        "softball" => Sport::Softball,
        "athletics" | "running" => Sport::TrackAndField,
        "pickleball" => Sport::Pickleball,
        other => Sport::from_name(other).unwrap_or(Sport::Other),
    }
}

/// Key used to spot duplicates: coordinates rounded to 5 decimals (~1 m).
pub fn coordinate_key(lat: f64, lng: f64) -> String {
    format!("{:.5}-{:.5}", lat, lng)
}

/// Convert elements into new facilities, skipping anything without a
/// position and anything whose coordinates match an existing facility or an
/// earlier element.
pub fn new_facilities_from_elements(
    elements: &[OverpassElement],
    existing: &[Facility],
) -> Vec<NewFacility> {
    let mut seen: HashSet<String> = existing
        .iter()
        .map(|f| coordinate_key(f.lat, f.lng))
        .collect();

    elements
        .iter()
        .filter_map(|element| {
            let (lat, lng) = element.position()?;
            if !seen.insert(coordinate_key(lat, lng)) {
                return None;
            }

            let raw_sport = element.tags.get("sport").map(String::as_str);
            let name = element
                .tags
                .get("name")
                .cloned()
                .or_else(|| raw_sport.map(|s| s.replace('_', " ")))
                .unwrap_or_else(|| "Sports facility".to_string());

            Some(NewFacility {
                name: Some(name),
                facility_type: Some("field".to_string()),
                sport: Some(osm_sport(raw_sport)),
                lat,
                lng,
                opening_hours: element
                    .tags
                    .get("opening_hours")
                    .and_then(|oh| parse_osm_opening_hours(oh)),
                external_url: element.tags.get("website").cloned(),
                webcam_url: None,
            })
        })
        .collect()
}

/// Errors from the Overpass API.
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("Overpass request failed: {0}")]
    Request(String),

    #[error("Overpass API error {0}")]
    Status(String),

    #[error("Failed to parse Overpass response: {0}")]
    Parse(String),
}
