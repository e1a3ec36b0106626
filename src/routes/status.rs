// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Crowdsourced status reports.

use crate::error::{AppError, Result};
use crate::models::{Facility, FacilityStatus, InvalidStatus, StatusSource};
use crate::routes::facilities::enrich;
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::put,
    Json, Router,
};
use chrono::{Local, Utc};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/facilities/{id}/status", put(update_status))
}

/// Pull the `status` field out of a report body.
pub fn parse_status_report(body: &serde_json::Value) -> Result<FacilityStatus> {
    body.get("status")
        .and_then(|v| v.as_str())
        .ok_or_else(|| AppError::BadRequest(InvalidStatus.to_string()))?
        .parse::<FacilityStatus>()
        .map_err(|e| AppError::BadRequest(e.to_string()))
}

/// Record a user's status report for a facility.
async fn update_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<Facility>> {
    let status = parse_status_report(&body)?;

    let updated = state
        .store
        .update_status(&id, status, StatusSource::Crowdsourced, Utc::now())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Facility {} not found", id)))?;

    Ok(Json(enrich(updated, &Local::now())))
}
