// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Facility discovery from OpenStreetMap.

use crate::error::{AppError, Result};
use crate::models::Facility;
use crate::services::discovery::{new_facilities_from_elements, DEFAULT_RADIUS_KM, MAX_RADIUS_KM};
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/discovery/osm", get(discover_osm))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryQuery {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub radius_km: Option<f64>,
}

impl DiscoveryQuery {
    /// Validated `(lat, lng, radius_km)`; the radius is defaulted and capped.
    pub fn resolve(&self) -> Result<(f64, f64, f64)> {
        let (Some(lat), Some(lng)) = (self.lat, self.lng) else {
            return Err(AppError::BadRequest("lat and lng required".to_string()));
        };
        if !lat.is_finite() || !lng.is_finite() || lat.abs() > 90.0 || lng.abs() > 180.0 {
            return Err(AppError::BadRequest(format!(
                "Invalid coordinates: {}, {}",
                lat, lng
            )));
        }

        let radius_km = match self.radius_km {
            Some(r) if r.is_finite() && r > 0.0 => r.min(MAX_RADIUS_KM),
            _ => DEFAULT_RADIUS_KM,
        };

        Ok((lat, lng, radius_km))
    }
}

#[derive(Debug, Serialize)]
pub struct DiscoveryResponse {
    /// Number of new facilities added
    pub discovered: usize,
    pub facilities: Vec<Facility>,
}

/// Pull sports facilities near a point from OpenStreetMap and store the new
/// ones.
async fn discover_osm(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DiscoveryQuery>,
) -> Result<Json<DiscoveryResponse>> {
    let (lat, lng, radius_km) = params.resolve()?;

    let elements = state.discovery.fetch_elements(lat, lng, radius_km).await?;
    let existing = state.store.list_all().await;
    let new = new_facilities_from_elements(&elements, &existing);

    tracing::info!(
        elements = elements.len(),
        new = new.len(),
        "Discovery finished"
    );

    let facilities = state.store.add_many(new).await?;
    Ok(Json(DiscoveryResponse {
        discovered: facilities.len(),
        facilities,
    }))
}
