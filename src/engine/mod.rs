// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Facility clustering and status resolution.
//!
//! Everything here is a pure function over a caller-supplied snapshot: no
//! I/O, no shared state. Callers pick the snapshot, the `now` used for status,
//! and how many facilities to hand to [`group_facilities`] (the pair scan is
//! quadratic).

pub mod adjacency;
pub mod distance;
pub mod materialize;
pub mod partition;
pub mod status;

pub use adjacency::{merge_radius_m, should_merge, BUILDING_RADIUS_M, GOLF_COURSE_RADIUS_M};
pub use distance::haversine_m;
pub use partition::{partition, DisjointSet};
pub use status::{attach_statuses, resolve_status};

use crate::models::{Facility, MapItem};

/// Group facilities into map pins.
///
/// Facilities within their pair's merge radius share a pin, transitively.
/// Pins come out ordered by their first member's position in the input.
pub fn group_facilities(facilities: Vec<Facility>) -> Vec<MapItem> {
    if facilities.is_empty() {
        return Vec::new();
    }

    let classes = partition(&facilities);
    tracing::debug!(
        facilities = facilities.len(),
        pins = classes.len(),
        "Grouped facilities"
    );

    materialize::materialize(facilities, &classes)
}
