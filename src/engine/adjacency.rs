// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Merge radius policy for pairs of facilities.

use super::distance::haversine_m;
use crate::models::{Facility, Sport};

/// Adjacent courts or fields in one building or complex.
pub const BUILDING_RADIUS_M: f64 = 100.0;

/// All holes of one golf course.
pub const GOLF_COURSE_RADIUS_M: f64 = 1_500.0;

/// Merge radius for a pair of sport classifications.
pub fn merge_radius_m(a: Option<Sport>, b: Option<Sport>) -> f64 {
    match (a, b) {
        (Some(Sport::Golf), Some(Sport::Golf)) => GOLF_COURSE_RADIUS_M,
        _ => BUILDING_RADIUS_M,
    }
}

/// Whether two facilities belong on the same pin.
///
/// Facilities without finite coordinates never merge.
pub fn should_merge(a: &Facility, b: &Facility) -> bool {
    if !a.has_finite_coordinates() || !b.has_finite_coordinates() {
        return false;
    }

    let distance = haversine_m(a.lat, a.lng, b.lat, b.lng);
    distance <= merge_radius_m(a.effective_sport(), b.effective_sport())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radius_is_commutative() {
        for a in Sport::ALL {
            for b in Sport::ALL {
                assert_eq!(merge_radius_m(Some(a), Some(b)), merge_radius_m(Some(b), Some(a)));
            }
            assert_eq!(merge_radius_m(Some(a), None), merge_radius_m(None, Some(a)));
        }
    }

    #[test]
    fn test_golf_needs_both_sides() {
        assert_eq!(
            merge_radius_m(Some(Sport::Golf), Some(Sport::Golf)),
            GOLF_COURSE_RADIUS_M
        );
        assert_eq!(
            merge_radius_m(Some(Sport::Golf), Some(Sport::Soccer)),
            BUILDING_RADIUS_M
        );
        assert_eq!(merge_radius_m(Some(Sport::Golf), None), BUILDING_RADIUS_M);
        assert_eq!(merge_radius_m(None, None), BUILDING_RADIUS_M);
    }

    #[test]
    fn test_should_merge_uses_computed_sport() {
        // ~1390 m apart
        let mut a = Facility::new("a", "Hole 1", 0.0, 0.0);
        let mut b = Facility::new("b", "Hole 2", 0.0125, 0.0);
        assert!(!should_merge(&a, &b));

        a.computed_sport = Some(Sport::Golf);
        b.computed_sport = Some(Sport::Golf);
        assert!(should_merge(&a, &b));
    }

    #[test]
    fn test_non_finite_never_merges() {
        let a = Facility::new("a", "Court", f64::NAN, 0.0);
        let b = Facility::new("b", "Court", 0.0, 0.0);
        assert!(!should_merge(&a, &b));
        assert!(!should_merge(&b, &a));
        assert!(!should_merge(&a, &a));
    }
}
