// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Map pins produced by grouping: a single facility or a complex.

use super::facility::Facility;
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// One pin on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MapItem {
    Single { facility: Facility },
    Complex(Complex),
}

/// Several facilities that belong to the same physical venue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct Complex {
    pub id: String,
    pub name: String,
    /// Mean latitude of the members
    pub lat: f64,
    /// Mean longitude of the members
    pub lng: f64,
    pub facility_count: usize,
    pub facilities: Vec<Facility>,
}

impl MapItem {
    /// Facilities behind this pin.
    pub fn facilities(&self) -> &[Facility] {
        match self {
            MapItem::Single { facility } => std::slice::from_ref(facility),
            MapItem::Complex(complex) => &complex.facilities,
        }
    }

    pub fn is_complex(&self) -> bool {
        matches!(self, MapItem::Complex(_))
    }
}
