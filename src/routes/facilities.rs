// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Facility listing, detail, and creation.

use crate::engine::{self, attach_statuses, resolve_status};
use crate::error::{AppError, Result};
use crate::models::{Facility, MapItem, NewFacility, Sport, WeeklySchedule};
use crate::services::sport::{attach_sport, infer, is_store};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Local, TimeZone};
use geo::{coord, Intersects, Rect};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use validator::Validate;

/// Facility routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/facilities", get(list_facilities).post(create_facility))
        .route("/api/facilities/{id}", get(get_facility))
}

// ─── Listing ─────────────────────────────────────────────────

#[derive(Deserialize)]
struct ListQuery {
    /// Only facilities of this sport
    sport: Option<String>,
    /// Return plain facilities instead of map pins
    #[serde(default)]
    flat: bool,
    /// `minLng,minLat,maxLng,maxLat`
    bbox: Option<String>,
}

/// Either plain facilities or grouped pins.
#[derive(Serialize)]
#[serde(untagged)]
pub enum FacilityListResponse {
    Flat(Vec<Facility>),
    Grouped(Vec<MapItem>),
}

/// Parse `minLng,minLat,maxLng,maxLat` into a rectangle.
pub fn parse_bbox(raw: &str) -> Result<Rect<f64>> {
    let invalid = || {
        AppError::BadRequest(
            "Invalid 'bbox' parameter: expected minLng,minLat,maxLng,maxLat".to_string(),
        )
    };

    let values = raw
        .split(',')
        .map(|v| v.trim().parse::<f64>().map_err(|_| invalid()))
        .collect::<Result<Vec<f64>>>()?;

    match values.as_slice() {
        [min_lng, min_lat, max_lng, max_lat] if values.iter().all(|v| v.is_finite()) => {
            Ok(Rect::new(
                coord! { x: *min_lng, y: *min_lat },
                coord! { x: *max_lng, y: *max_lat },
            ))
        }
        _ => Err(invalid()),
    }
}

/// Drop store/retail entries and attach computed sport and status, all
/// against the same `now`.
pub fn prepare_snapshot<Tz: TimeZone>(facilities: Vec<Facility>, now: &DateTime<Tz>) -> Vec<Facility> {
    let mut visible: Vec<Facility> = facilities
        .into_iter()
        .filter(|f| !is_store(&f.name))
        .collect();

    for facility in visible.iter_mut() {
        attach_sport(facility);
    }
    attach_statuses(&mut visible, now);
    visible
}

/// Attach computed sport and status to one facility.
pub fn enrich<Tz: TimeZone>(mut facility: Facility, now: &DateTime<Tz>) -> Facility {
    attach_sport(&mut facility);
    facility.computed_status = Some(resolve_status(&facility, now));
    facility
}

/// List facilities, grouped into map pins unless `flat=true`.
async fn list_facilities(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListQuery>,
) -> Result<Json<FacilityListResponse>> {
    let bbox = params.bbox.as_deref().map(parse_bbox).transpose()?;
    let sport = params.sport.filter(|s| !s.is_empty());

    let now = Local::now();
    let mut list = prepare_snapshot(state.store.list_all().await, &now);

    if let Some(sport) = &sport {
        // Unknown sport names simply match nothing
        let wanted = Sport::from_name(sport);
        list.retain(|f| wanted.is_some() && f.effective_sport() == wanted);
    }
    if let Some(bbox) = &bbox {
        list.retain(|f| bbox.intersects(&f.point()));
    }

    tracing::debug!(
        count = list.len(),
        sport = ?sport,
        bbox = ?params.bbox,
        flat = params.flat,
        "Listing facilities"
    );

    if params.flat {
        return Ok(Json(FacilityListResponse::Flat(list)));
    }

    let limit = state.config.max_grouping_facilities;
    if list.len() > limit {
        tracing::warn!(count = list.len(), limit, "Grouping request over limit");
        return Err(AppError::BadRequest(format!(
            "{} facilities match; narrow the request with 'bbox' or 'sport' (limit {})",
            list.len(),
            limit
        )));
    }

    Ok(Json(FacilityListResponse::Grouped(engine::group_facilities(
        list,
    ))))
}

// ─── Detail ──────────────────────────────────────────────────

/// Get one facility with computed sport and status.
async fn get_facility(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Facility>> {
    let facility = state
        .store
        .get(&id)
        .await
        .filter(|f| !is_store(&f.name))
        .ok_or_else(|| AppError::NotFound(format!("Facility {} not found", id)))?;

    Ok(Json(enrich(facility, &Local::now())))
}

// ─── Creation ────────────────────────────────────────────────

/// New facility request body.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFacilityRequest {
    #[validate(length(max = 200))]
    pub name: Option<String>,
    #[serde(rename = "type")]
    #[validate(length(max = 50))]
    pub facility_type: Option<String>,
    /// Canonical sport name; anything else is inferred from name and type
    pub sport: Option<String>,
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    pub lng: Option<f64>,
    pub opening_hours: Option<WeeklySchedule>,
    #[validate(url)]
    pub external_url: Option<String>,
    #[validate(url)]
    pub webcam_url: Option<String>,
}

impl CreateFacilityRequest {
    /// Validate and convert into store input.
    pub fn into_new_facility(self) -> Result<NewFacility> {
        self.validate()?;

        let (Some(lat), Some(lng)) = (self.lat, self.lng) else {
            return Err(AppError::BadRequest("lat and lng required".to_string()));
        };

        let sport = self
            .sport
            .as_deref()
            .and_then(Sport::from_name)
            .unwrap_or_else(|| {
                infer(
                    self.name.as_deref().unwrap_or(""),
                    self.facility_type.as_deref().unwrap_or("field"),
                )
            });

        Ok(NewFacility {
            name: self.name,
            facility_type: self.facility_type,
            sport: Some(sport),
            lat,
            lng,
            opening_hours: self.opening_hours,
            external_url: self.external_url,
            webcam_url: self.webcam_url,
        })
    }
}

/// Create a facility.
async fn create_facility(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateFacilityRequest>,
) -> Result<(StatusCode, Json<Facility>)> {
    let new = request.into_new_facility()?;
    let created = state.store.add(new).await?;

    tracing::info!(facility_id = %created.id, name = %created.name, "Facility created");
    Ok((StatusCode::CREATED, Json(created)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FacilityStatus;
    use chrono::Utc;

    #[test]
    fn test_parse_bbox() {
        let rect = parse_bbox("-74.1, 40.6,-73.9,40.8").unwrap();
        assert_eq!(rect.min().x, -74.1);
        assert_eq!(rect.max().y, 40.8);

        assert!(parse_bbox("1,2,3").is_err());
        assert!(parse_bbox("a,b,c,d").is_err());
        assert!(parse_bbox("1,2,3,inf").is_err());
    }

    #[test]
    fn test_prepare_snapshot_filters_stores_and_attaches() {
        let now = Utc::now();
        let facilities = vec![
            Facility::new("1", "Riverside Soccer", 0.0, 0.0),
            Facility::new("2", "Soccer Shop", 0.0, 0.0),
        ];

        let prepared = prepare_snapshot(facilities, &now);

        assert_eq!(prepared.len(), 1);
        assert_eq!(prepared[0].computed_sport, Some(Sport::Soccer));
        assert_eq!(prepared[0].sport, Some(Sport::Soccer));
        assert_eq!(prepared[0].computed_status, Some(FacilityStatus::Unknown));
    }

    #[test]
    fn test_prepare_snapshot_keeps_unnamed_facilities() {
        let unnamed: Facility = serde_json::from_value(serde_json::json!({
            "id": "no-name",
            "lat": 0.0,
            "lng": 0.0
        }))
        .unwrap();
        let facilities = vec![
            unnamed,
            Facility::new("empty", "", 0.0, 0.0),
            Facility::new("blank", "   ", 0.0, 0.0),
        ];

        let prepared = prepare_snapshot(facilities, &Utc::now());

        let ids: Vec<&str> = prepared.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, ["no-name", "empty"]);
    }

    #[test]
    fn test_create_request_infers_sport() {
        let request: CreateFacilityRequest = serde_json::from_value(serde_json::json!({
            "name": "Hilltop Tennis",
            "sport": "croquet",
            "lat": 37.0,
            "lng": -122.0
        }))
        .unwrap();

        let new = request.into_new_facility().unwrap();
        assert_eq!(new.sport, Some(Sport::Tennis));
    }

    #[test]
    fn test_create_request_rejects_bad_input() {
        let missing: CreateFacilityRequest =
            serde_json::from_value(serde_json::json!({ "name": "No Position" })).unwrap();
        assert!(matches!(
            missing.into_new_facility(),
            Err(AppError::BadRequest(_))
        ));

        let out_of_range: CreateFacilityRequest =
            serde_json::from_value(serde_json::json!({ "lat": 91.0, "lng": 0.0 })).unwrap();
        assert!(matches!(
            out_of_range.into_new_facility(),
            Err(AppError::BadRequest(_))
        ));
    }
}
