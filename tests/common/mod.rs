// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request, Response};
use fieldfinder::config::Config;
use fieldfinder::db::FacilityStore;
use fieldfinder::models::{Facility, Sport};
use fieldfinder::routes::create_router;
use fieldfinder::services::DiscoveryService;
use fieldfinder::AppState;
use std::sync::Arc;
use tower::ServiceExt;

/// Create a test app with an empty in-memory store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with(Vec::new())
}

/// Create a test app backed by an in-memory store holding `facilities`.
#[allow(dead_code)]
pub fn create_test_app_with(facilities: Vec<Facility>) -> (axum::Router, Arc<AppState>) {
    create_test_app_with_config(Config::test_default(), facilities)
}

#[allow(dead_code)]
pub fn create_test_app_with_config(
    config: Config,
    facilities: Vec<Facility>,
) -> (axum::Router, Arc<AppState>) {
    let discovery = DiscoveryService::new(config.overpass_url.clone());
    let state = Arc::new(AppState {
        config,
        store: FacilityStore::in_memory(facilities),
        discovery,
    });

    (create_router(state.clone()), state)
}

/// A facility with an explicit sport.
#[allow(dead_code)]
pub fn facility(id: &str, name: &str, sport: Sport, lat: f64, lng: f64) -> Facility {
    Facility::new(id, name, lat, lng).with_sport(sport)
}

/// Send a request and return the response with its body parsed as JSON.
#[allow(dead_code)]
pub async fn send(
    app: axum::Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (Response<Body>, serde_json::Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let (parts, body) = response.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (Response::from_parts(parts, Body::empty()), json)
}
