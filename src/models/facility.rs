// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Facility model: one court, field, or golf hole.

use chrono::{DateTime, Utc, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Sport category used for filtering and for the adjacency policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "snake_case")]
pub enum Sport {
    Soccer,
    Basketball,
    TrackAndField,
    Volleyball,
    Football,
    Tennis,
    Baseball,
    Softball,
    Pickleball,
    Golf,
    /// Anything we don't recognise, including unknown stored values.
    #[serde(other)]
    Other,
}

impl Sport {
    pub const ALL: [Sport; 11] = [
        Sport::Soccer,
        Sport::Basketball,
        Sport::TrackAndField,
        Sport::Volleyball,
        Sport::Football,
        Sport::Tennis,
        Sport::Baseball,
        Sport::Softball,
        Sport::Pickleball,
        Sport::Golf,
        Sport::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Sport::Soccer => "soccer",
            Sport::Basketball => "basketball",
            Sport::TrackAndField => "track_and_field",
            Sport::Volleyball => "volleyball",
            Sport::Football => "football",
            Sport::Tennis => "tennis",
            Sport::Baseball => "baseball",
            Sport::Softball => "softball",
            Sport::Pickleball => "pickleball",
            Sport::Golf => "golf",
            Sport::Other => "other",
        }
    }

    /// Look up a sport by its canonical name. Unlike deserialization,
    /// unknown names return `None` instead of `Other`.
    pub fn from_name(name: &str) -> Option<Sport> {
        Sport::ALL.into_iter().find(|s| s.as_str() == name)
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display status of a facility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "snake_case")]
pub enum FacilityStatus {
    Open,
    Closed,
    InUse,
    Unknown,
}

impl FacilityStatus {
    pub const ALL: [FacilityStatus; 4] = [
        FacilityStatus::Open,
        FacilityStatus::Closed,
        FacilityStatus::InUse,
        FacilityStatus::Unknown,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FacilityStatus::Open => "open",
            FacilityStatus::Closed => "closed",
            FacilityStatus::InUse => "in_use",
            FacilityStatus::Unknown => "unknown",
        }
    }
}

impl fmt::Display for FacilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a status string is not one of the four known states.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("status must be one of: open, closed, in_use, unknown")]
pub struct InvalidStatus;

impl FromStr for FacilityStatus {
    type Err = InvalidStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FacilityStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or(InvalidStatus)
    }
}

/// Where the stored status came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "snake_case")]
pub enum StatusSource {
    /// Submitted by a user through the status endpoint.
    Crowdsourced,
    #[serde(other)]
    Other,
}

/// One `[open, close]` pair of `HH:MM` strings.
///
/// Kept as raw strings so that one malformed entry only disables that range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningRange(pub String, pub String);

impl OpeningRange {
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self(open.into(), close.into())
    }

    pub fn open(&self) -> &str {
        &self.0
    }

    pub fn close(&self) -> &str {
        &self.1
    }
}

/// Weekly opening hours keyed by `sun`, `mon`, ... `sat`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeeklySchedule(pub BTreeMap<String, Vec<OpeningRange>>);

/// Day keys in `chrono::Weekday::num_days_from_sunday` order.
pub const DAY_KEYS: [&str; 7] = ["sun", "mon", "tue", "wed", "thu", "fri", "sat"];

impl WeeklySchedule {
    /// A schedule with all seven days present and no ranges.
    pub fn empty_week() -> Self {
        Self(
            DAY_KEYS
                .iter()
                .map(|day| (day.to_string(), Vec::new()))
                .collect(),
        )
    }

    pub fn day_key(day: Weekday) -> &'static str {
        DAY_KEYS[day.num_days_from_sunday() as usize]
    }

    /// Ranges for a weekday, if the day has an entry.
    pub fn ranges_for(&self, day: Weekday) -> Option<&[OpeningRange]> {
        self.0.get(Self::day_key(day)).map(Vec::as_slice)
    }

    pub fn push(&mut self, day_key: &str, range: OpeningRange) {
        self.0.entry(day_key.to_string()).or_default().push(range);
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(Vec::is_empty)
    }
}

fn default_facility_type() -> String {
    "field".to_string()
}

/// A facility record as stored and served.
///
/// `computed_sport` and `computed_status` are attached per request and are
/// never written to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
#[serde(rename_all = "camelCase")]
pub struct Facility {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// "field", "court", "track", ...
    #[serde(rename = "type", default = "default_facility_type")]
    pub facility_type: String,
    #[serde(default)]
    pub sport: Option<Sport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub computed_sport: Option<Sport>,
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    #[cfg_attr(
        feature = "binding-generation",
        ts(type = "Record<string, Array<[string, string]>> | null")
    )]
    pub opening_hours: Option<WeeklySchedule>,
    #[serde(default)]
    pub external_url: Option<String>,
    #[serde(default)]
    pub webcam_url: Option<String>,
    #[serde(default)]
    pub status: Option<FacilityStatus>,
    #[serde(default)]
    pub status_updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status_source: Option<StatusSource>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub computed_status: Option<FacilityStatus>,
}

impl Facility {
    /// Minimal record with an id and a position. Mostly useful in tests
    /// and benchmarks.
    pub fn new(id: impl Into<String>, name: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            facility_type: default_facility_type(),
            sport: None,
            computed_sport: None,
            lat,
            lng,
            opening_hours: None,
            external_url: None,
            webcam_url: None,
            status: None,
            status_updated_at: None,
            status_source: None,
            created_at: None,
            computed_status: None,
        }
    }

    pub fn with_sport(mut self, sport: Sport) -> Self {
        self.sport = Some(sport);
        self
    }

    /// Classification used for adjacency: the attached one, else the stored one.
    pub fn effective_sport(&self) -> Option<Sport> {
        self.computed_sport.or(self.sport)
    }

    pub fn has_finite_coordinates(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    /// Position as a `geo` point (x = longitude, y = latitude).
    pub fn point(&self) -> geo::Point<f64> {
        geo::Point::new(self.lng, self.lat)
    }
}

/// Input for creating a facility. The store assigns id and timestamps.
#[derive(Debug, Clone, Default)]
pub struct NewFacility {
    pub name: Option<String>,
    pub facility_type: Option<String>,
    pub sport: Option<Sport>,
    pub lat: f64,
    pub lng: f64,
    pub opening_hours: Option<WeeklySchedule>,
    pub external_url: Option<String>,
    pub webcam_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_from_str() {
        assert_eq!("in_use".parse::<FacilityStatus>(), Ok(FacilityStatus::InUse));
        assert_eq!("open".parse::<FacilityStatus>(), Ok(FacilityStatus::Open));
        assert_eq!("Open".parse::<FacilityStatus>(), Err(InvalidStatus));
        assert_eq!("busy".parse::<FacilityStatus>(), Err(InvalidStatus));
    }

    #[test]
    fn test_unknown_sport_deserializes_as_other() {
        let sport: Sport = serde_json::from_value(json!("curling")).unwrap();
        assert_eq!(sport, Sport::Other);
        assert_eq!(Sport::from_name("curling"), None);
        assert_eq!(Sport::from_name("track_and_field"), Some(Sport::TrackAndField));
    }

    #[test]
    fn test_facility_json_shape() {
        let raw = json!({
            "id": "abc",
            "name": "Riverside Park",
            "type": "court",
            "sport": "basketball",
            "lat": 40.0,
            "lng": -74.0,
            "openingHours": { "mon": [["09:00", "17:00"]] },
            "status": "in_use",
            "statusUpdatedAt": "2026-01-05T10:00:00.000Z",
            "statusSource": "crowdsourced"
        });

        let facility: Facility = serde_json::from_value(raw).unwrap();
        assert_eq!(facility.facility_type, "court");
        assert_eq!(facility.sport, Some(Sport::Basketball));
        assert_eq!(facility.status, Some(FacilityStatus::InUse));
        assert_eq!(facility.status_source, Some(StatusSource::Crowdsourced));
        let hours = facility.opening_hours.as_ref().unwrap();
        assert_eq!(
            hours.ranges_for(Weekday::Mon),
            Some(&[OpeningRange::new("09:00", "17:00")][..])
        );
        assert_eq!(hours.ranges_for(Weekday::Tue), None);

        let back = serde_json::to_value(&facility).unwrap();
        assert_eq!(back["type"], "court");
        assert_eq!(back["openingHours"]["mon"][0][1], "17:00");
        assert!(back.get("computedStatus").is_none());
    }

    #[test]
    fn test_effective_sport_prefers_computed() {
        let mut facility = Facility::new("1", "Hole 1", 0.0, 0.0).with_sport(Sport::Other);
        assert_eq!(facility.effective_sport(), Some(Sport::Other));
        facility.computed_sport = Some(Sport::Golf);
        assert_eq!(facility.effective_sport(), Some(Sport::Golf));
    }
}
