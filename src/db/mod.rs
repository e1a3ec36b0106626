//! Persistence layer (JSON file).

pub mod store;

pub use store::FacilityStore;
