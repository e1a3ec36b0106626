// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - collaborators around the engine.

pub mod discovery;
pub mod opening_hours;
pub mod sport;

pub use discovery::{DiscoveryError, DiscoveryService};
