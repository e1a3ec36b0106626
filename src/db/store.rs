// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! JSON-file facility store.
//!
//! The whole list lives in memory behind a lock and is rewritten to disk on
//! every change (temp file + rename). Reads hand out cloned snapshots so
//! grouping never holds the lock.

use crate::error::AppError;
use crate::models::{Facility, FacilityStatus, NewFacility, StatusSource};
use chrono::{DateTime, Utc};
use ring::rand::{SecureRandom, SystemRandom};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Facility store backed by a JSON file.
#[derive(Clone)]
pub struct FacilityStore {
    path: Option<PathBuf>,
    facilities: Arc<RwLock<Vec<Facility>>>,
    rng: SystemRandom,
}

impl FacilityStore {
    /// Open the store at `path`. A missing file starts an empty store; a file
    /// that fails to parse is an error so it never gets overwritten.
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self, AppError> {
        let path = path.as_ref().to_path_buf();

        let facilities = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => serde_json::from_str::<Vec<Facility>>(&contents).map_err(|e| {
                AppError::Database(format!("Failed to parse {}: {}", path.display(), e))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "No facility data yet, starting empty");
                Vec::new()
            }
            Err(e) => {
                return Err(AppError::Database(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        tracing::info!(count = facilities.len(), path = %path.display(), "Loaded facilities");

        Ok(Self {
            path: Some(path),
            facilities: Arc::new(RwLock::new(facilities)),
            rng: SystemRandom::new(),
        })
    }

    /// Store that never touches disk (tests, benchmarks).
    pub fn in_memory(facilities: Vec<Facility>) -> Self {
        Self {
            path: None,
            facilities: Arc::new(RwLock::new(facilities)),
            rng: SystemRandom::new(),
        }
    }

    /// Snapshot of every facility, in insertion order.
    pub async fn list_all(&self) -> Vec<Facility> {
        self.facilities.read().await.clone()
    }

    pub async fn get(&self, id: &str) -> Option<Facility> {
        self.facilities
            .read()
            .await
            .iter()
            .find(|f| f.id == id)
            .cloned()
    }

    /// Create a facility and persist it.
    pub async fn add(&self, new: NewFacility) -> Result<Facility, AppError> {
        let mut created = self.add_many(vec![new]).await?;
        created
            .pop()
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Facility was not created")))
    }

    /// Create several facilities with a single write.
    pub async fn add_many(&self, new: Vec<NewFacility>) -> Result<Vec<Facility>, AppError> {
        if new.is_empty() {
            return Ok(Vec::new());
        }

        let now = Utc::now();
        let created = new
            .into_iter()
            .map(|n| self.build_facility(n, now))
            .collect::<Result<Vec<_>, _>>()?;

        let mut facilities = self.facilities.write().await;
        let mut next = facilities.clone();
        next.extend(created.iter().cloned());
        self.persist(&next).await?;
        *facilities = next;

        tracing::info!(count = created.len(), "Added facilities");
        Ok(created)
    }

    /// Record a status report. Returns `None` if no facility has this id.
    pub async fn update_status(
        &self,
        id: &str,
        status: FacilityStatus,
        source: StatusSource,
        at: DateTime<Utc>,
    ) -> Result<Option<Facility>, AppError> {
        let mut facilities = self.facilities.write().await;
        let Some(index) = facilities.iter().position(|f| f.id == id) else {
            return Ok(None);
        };

        // Only commit to memory once the file write succeeded
        let mut next = facilities.clone();
        let facility = &mut next[index];
        facility.status = Some(status);
        facility.status_updated_at = Some(at);
        facility.status_source = Some(source);
        let updated = facility.clone();

        self.persist(&next).await?;
        *facilities = next;

        tracing::info!(facility_id = id, status = %status, "Status updated");
        Ok(Some(updated))
    }

    fn build_facility(&self, new: NewFacility, now: DateTime<Utc>) -> Result<Facility, AppError> {
        let mut facility = Facility::new(
            self.generate_id(now)?,
            new.name
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| "Unnamed".to_string()),
            new.lat,
            new.lng,
        );
        if let Some(facility_type) = new.facility_type.filter(|t| !t.is_empty()) {
            facility.facility_type = facility_type;
        }
        facility.sport = new.sport;
        facility.opening_hours = new.opening_hours;
        facility.external_url = new.external_url;
        facility.webcam_url = new.webcam_url;
        facility.created_at = Some(now);
        Ok(facility)
    }

    /// `<epoch millis><8 hex chars>`
    fn generate_id(&self, now: DateTime<Utc>) -> Result<String, AppError> {
        let mut suffix = [0u8; 4];
        self.rng
            .fill(&mut suffix)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("System RNG failure")))?;
        Ok(format!("{}{}", now.timestamp_millis(), hex::encode(suffix)))
    }

    async fn persist(&self, facilities: &[Facility]) -> Result<(), AppError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|e| AppError::Database(format!("Failed to create data dir: {}", e)))?;
        }

        let json = serde_json::to_string_pretty(facilities)
            .map_err(|e| AppError::Database(format!("Failed to serialize facilities: {}", e)))?;

        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| AppError::Database(format!("Failed to write {}: {}", tmp.display(), e)))?;
        tokio::fs::rename(&tmp, path)
            .await
            .map_err(|e| AppError::Database(format!("Failed to replace {}: {}", path.display(), e)))?;

        Ok(())
    }
}
