// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Fieldfinder: nearby sports facilities and their live status.
//!
//! The [`engine`] module holds the pure clustering and status logic. The
//! rest of the crate is the HTTP service around it: a JSON-file store,
//! sport classification, and OpenStreetMap discovery.

pub mod config;
pub mod db;
pub mod engine;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::FacilityStore;
use services::DiscoveryService;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: FacilityStore,
    pub discovery: DiscoveryService,
}
