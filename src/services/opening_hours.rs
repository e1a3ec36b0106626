// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Parser for the common subset of OpenStreetMap `opening_hours` values.
//!
//! Supported: `;`-separated rules of the form `<days> <ranges>`, where days
//! are two-letter abbreviations, lists (`Mo,We`), or spans (`Mo-Fr`, `Sa-Su`)
//! and ranges are `HH:MM-HH:MM`, optionally comma separated. Anything else
//! (`24/7`, public holidays, month selectors) is skipped.

use crate::engine::status::parse_time_of_day;
use crate::models::facility::DAY_KEYS;
use crate::models::{OpeningRange, WeeklySchedule};

/// OSM day abbreviations in `DAY_KEYS` order.
const OSM_DAYS: [&str; 7] = ["su", "mo", "tu", "we", "th", "fr", "sa"];

/// Parse an OSM `opening_hours` value into a weekly schedule.
///
/// Returns `None` when no rule could be understood.
pub fn parse_osm_opening_hours(raw: &str) -> Option<WeeklySchedule> {
    let mut schedule = WeeklySchedule::empty_week();

    for rule in raw.split(';').map(str::trim).filter(|r| !r.is_empty()) {
        let mut tokens = rule.split_whitespace();
        let (Some(days), Some(times)) = (tokens.next(), tokens.next()) else {
            continue;
        };

        let Some(days) = parse_days(days) else {
            tracing::debug!(rule, "Skipping opening_hours rule with unknown days");
            continue;
        };
        let ranges = parse_ranges(times);
        if ranges.is_empty() {
            continue;
        }

        for day in days {
            for range in &ranges {
                schedule.push(DAY_KEYS[day], range.clone());
            }
        }
    }

    (!schedule.is_empty()).then_some(schedule)
}

/// Day indices (0 = Sunday) selected by a token like `Mo-Fr,Su`.
fn parse_days(token: &str) -> Option<Vec<usize>> {
    let mut days = Vec::new();

    for part in token.split(',') {
        match part.split_once('-') {
            Some((start, end)) => {
                let start = day_index(start)?;
                let end = day_index(end)?;
                // Spans wrap around the week, so Sa-Mo is Sa, Su, Mo.
                let mut day = start;
                loop {
                    days.push(day);
                    if day == end {
                        break;
                    }
                    day = (day + 1) % 7;
                }
            }
            None => days.push(day_index(part)?),
        }
    }

    days.sort_unstable();
    days.dedup();
    Some(days)
}

fn day_index(token: &str) -> Option<usize> {
    let token = token.trim().to_lowercase();
    OSM_DAYS.iter().position(|d| *d == token)
}

/// Valid `HH:MM-HH:MM` ranges in a token like `08:00-12:00,14:00-18:00`.
fn parse_ranges(token: &str) -> Vec<OpeningRange> {
    token
        .split(',')
        .filter_map(|range| {
            let (open, close) = range.split_once('-')?;
            let (open, close) = (open.trim(), close.trim());
            parse_time_of_day(open)?;
            parse_time_of_day(close)?;
            Some(OpeningRange::new(open, close))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn ranges(schedule: &WeeklySchedule, day: Weekday) -> Vec<(String, String)> {
        schedule
            .ranges_for(day)
            .unwrap_or_default()
            .iter()
            .map(|r| (r.open().to_string(), r.close().to_string()))
            .collect()
    }

    fn pair(open: &str, close: &str) -> (String, String) {
        (open.to_string(), close.to_string())
    }

    #[test]
    fn test_weekday_span() {
        let schedule = parse_osm_opening_hours("Mo-Fr 08:00-20:00").unwrap();

        assert_eq!(ranges(&schedule, Weekday::Mon), vec![pair("08:00", "20:00")]);
        assert_eq!(ranges(&schedule, Weekday::Fri), vec![pair("08:00", "20:00")]);
        assert!(ranges(&schedule, Weekday::Sat).is_empty());
        assert!(ranges(&schedule, Weekday::Sun).is_empty());
        // All seven keys are present
        assert_eq!(schedule.0.len(), 7);
    }

    #[test]
    fn test_multiple_rules_and_split_hours() {
        let schedule =
            parse_osm_opening_hours("Mo-Fr 06:00-09:00,17:00-22:00; Sa,Su 08:00-18:00").unwrap();

        assert_eq!(
            ranges(&schedule, Weekday::Wed),
            vec![pair("06:00", "09:00"), pair("17:00", "22:00")]
        );
        assert_eq!(ranges(&schedule, Weekday::Sun), vec![pair("08:00", "18:00")]);
    }

    #[test]
    fn test_wrapping_day_span() {
        let schedule = parse_osm_opening_hours("Sa-Mo 10:00-16:00").unwrap();

        assert_eq!(ranges(&schedule, Weekday::Sat).len(), 1);
        assert_eq!(ranges(&schedule, Weekday::Sun).len(), 1);
        assert_eq!(ranges(&schedule, Weekday::Mon).len(), 1);
        assert!(ranges(&schedule, Weekday::Tue).is_empty());
    }

    #[test]
    fn test_unsupported_values() {
        assert_eq!(parse_osm_opening_hours("24/7"), None);
        assert_eq!(parse_osm_opening_hours("sunrise-sunset"), None);
        assert_eq!(parse_osm_opening_hours("PH off"), None);
        assert_eq!(parse_osm_opening_hours(""), None);
    }

    #[test]
    fn test_bad_rule_does_not_spoil_others() {
        let schedule = parse_osm_opening_hours("PH 10:00-12:00; Mo 07:00-late; Tu 07:00-09:00")
            .unwrap();

        assert!(ranges(&schedule, Weekday::Mon).is_empty());
        assert_eq!(ranges(&schedule, Weekday::Tue), vec![pair("07:00", "09:00")]);
    }
}
