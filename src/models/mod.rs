// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod facility;
pub mod map_item;

pub use facility::{
    Facility, FacilityStatus, InvalidStatus, NewFacility, OpeningRange, Sport, StatusSource,
    WeeklySchedule,
};
pub use map_item::{Complex, MapItem};
