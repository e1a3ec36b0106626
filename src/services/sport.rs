// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Sport classification and retail filtering.

use crate::models::{Facility, Sport};

/// Whole words that mark a shop or studio rather than a field or court.
const STORE_WORDS: &[&str] = &[
    "shop",
    "store",
    "retail",
    "outlet",
    "wear",
    "apparel",
    "pilates",
    "barre",
    "skateshop",
    "fleetfeet",
    "chess",
];

/// Words that make a "yoga" name a real venue.
const YOGA_VENUE_WORDS: &[&str] = &["park", "centre", "center", "field", "complex"];

/// True if the name looks like a store, shop, or studio.
///
/// An empty name is not a store; a name of only whitespace is.
pub fn is_store(name: &str) -> bool {
    if name.is_empty() {
        return false;
    }
    let lowered = name.trim().to_lowercase();
    if lowered.is_empty() {
        return true;
    }

    let words: Vec<&str> = lowered
        .split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .filter(|w| !w.is_empty())
        .collect();
    let has = |word: &str| words.contains(&word);

    if STORE_WORDS.iter().any(|w| has(w)) {
        return true;
    }
    if words.windows(2).any(|pair| pair == ["fleet", "feet"]) {
        return true;
    }
    if has("yoga") && !YOGA_VENUE_WORDS.iter().any(|w| has(w)) {
        return true;
    }

    lowered == "fitness"
}

/// Sport for a facility: the stored one if set, otherwise inferred from its
/// type and name.
pub fn classify(facility: &Facility) -> Sport {
    match facility.sport {
        Some(sport) => sport,
        None => infer(&facility.name, &facility.facility_type),
    }
}

/// Infer a sport from a facility's type and name alone.
pub fn infer(name: &str, facility_type: &str) -> Sport {
    if facility_type == "track" {
        return Sport::TrackAndField;
    }
    sport_from_name(&name.to_lowercase())
}

fn sport_from_name(name: &str) -> Sport {
    let has = |needle: &str| name.contains(needle);

    if has("soccer") {
        Sport::Soccer
    } else if has("basketball") {
        Sport::Basketball
    } else if has("tennis") && !has("table_tennis") && !has("pickleball") {
        Sport::Tennis
    } else if has("volleyball") {
        Sport::Volleyball
    } else if has("football") {
        Sport::Football
    } else if has("baseball") {
        Sport::Baseball
    } else if has("softball") {
        Sport::Softball
    } else if has("athletics") || has("running") || has("track") {
        Sport::TrackAndField
    } else if has("pickleball") {
        Sport::Pickleball
    } else if has("golf") {
        Sport::Golf
    } else {
        Sport::Other
    }
}

/// Attach `computed_sport`, and fill `sport` from it when missing.
pub fn attach_sport(facility: &mut Facility) {
    let computed = classify(facility);
    facility.computed_sport = Some(computed);
    facility.sport.get_or_insert(computed);
}
