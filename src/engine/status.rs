// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Display status resolution.
//!
//! Priority, evaluated against one `now`:
//! 1. A crowdsourced report younger than [`FRESHNESS_WINDOW_HOURS`].
//! 2. Today's opening hours: `open` inside any range (both ends inclusive),
//!    `closed` otherwise.
//! 3. The stored status, or `unknown`.
//!
//! Ranges whose close time is before the open time never match; overnight
//! wraparound is not supported.

use crate::models::{Facility, FacilityStatus, OpeningRange, StatusSource, WeeklySchedule};
use chrono::{DateTime, Datelike, Duration, TimeZone, Timelike, Utc};

/// How long a user report overrides the schedule.
pub const FRESHNESS_WINDOW_HOURS: i64 = 24;

/// Resolve the status to display for `facility` at `now`.
///
/// Weekday and time of day are read in `now`'s time zone.
pub fn resolve_status<Tz: TimeZone>(facility: &Facility, now: &DateTime<Tz>) -> FacilityStatus {
    if let Some(status) = fresh_report(facility, now) {
        return status;
    }

    schedule_status(facility.opening_hours.as_ref(), now)
        .or(facility.status)
        .unwrap_or(FacilityStatus::Unknown)
}

/// Set `computed_status` on every facility using the same `now`.
pub fn attach_statuses<Tz: TimeZone>(facilities: &mut [Facility], now: &DateTime<Tz>) {
    for facility in facilities.iter_mut() {
        facility.computed_status = Some(resolve_status(facility, now));
    }
}

fn fresh_report<Tz: TimeZone>(facility: &Facility, now: &DateTime<Tz>) -> Option<FacilityStatus> {
    let status = facility.status?;
    if facility.status_source != Some(StatusSource::Crowdsourced) {
        return None;
    }
    let updated_at = facility.status_updated_at?;

    let age = now.with_timezone(&Utc).signed_duration_since(updated_at);
    (age < Duration::hours(FRESHNESS_WINDOW_HOURS)).then_some(status)
}

/// Status implied by the schedule alone. `None` when there are no ranges for
/// today.
pub fn schedule_status<Tz: TimeZone>(
    schedule: Option<&WeeklySchedule>,
    now: &DateTime<Tz>,
) -> Option<FacilityStatus> {
    let ranges = schedule?.ranges_for(now.weekday())?;
    if ranges.is_empty() {
        return None;
    }

    let minute = now.hour() * 60 + now.minute();
    if ranges.iter().any(|range| range_contains(range, minute)) {
        Some(FacilityStatus::Open)
    } else {
        Some(FacilityStatus::Closed)
    }
}

fn range_contains(range: &OpeningRange, minute: u32) -> bool {
    match (
        parse_time_of_day(range.open()),
        parse_time_of_day(range.close()),
    ) {
        (Some(open), Some(close)) => open <= minute && minute <= close,
        _ => {
            tracing::debug!(
                open = range.open(),
                close = range.close(),
                "Ignoring malformed opening-hours range"
            );
            false
        }
    }
}

/// Parse `H:MM` / `HH:MM` into minutes after midnight. `24:00` is accepted.
pub fn parse_time_of_day(raw: &str) -> Option<u32> {
    let (hours, minutes) = raw.trim().split_once(':')?;
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(hours) || !all_digits(minutes) {
        return None;
    }
    let hours: u32 = hours.parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;

    if minutes >= 60 || hours > 24 || (hours == 24 && minutes != 0) {
        return None;
    }
    Some(hours * 60 + minutes)
}
