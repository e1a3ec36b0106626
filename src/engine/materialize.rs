// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Turn equivalence classes into map pins.

use crate::models::{Complex, Facility, MapItem};

/// Prefix for synthesized complex ids.
pub const COMPLEX_ID_PREFIX: &str = "complex-";

/// Name used when the first member has no name.
const FALLBACK_NAME: &str = "Area";

/// Build one [`MapItem`] per class.
///
/// `classes` must partition `0..facilities.len()`; indices that are out of
/// range or repeated are ignored.
pub fn materialize(facilities: Vec<Facility>, classes: &[Vec<usize>]) -> Vec<MapItem> {
    let mut slots: Vec<Option<Facility>> = facilities.into_iter().map(Some).collect();

    classes
        .iter()
        .filter_map(|class| {
            let members: Vec<Facility> = class
                .iter()
                .filter_map(|&i| slots.get_mut(i).and_then(Option::take))
                .collect();
            into_map_item(members)
        })
        .collect()
}

fn into_map_item(mut members: Vec<Facility>) -> Option<MapItem> {
    match members.len() {
        0 => None,
        1 => members.pop().map(|facility| MapItem::Single { facility }),
        count => {
            let (lat, lng) = centroid(&members);
            Some(MapItem::Complex(Complex {
                id: format!("{}{}", COMPLEX_ID_PREFIX, members[0].id),
                name: complex_name(&members),
                lat,
                lng,
                facility_count: count,
                facilities: members,
            }))
        }
    }
}

/// Unweighted mean of member coordinates as `(lat, lng)`.
pub fn centroid(members: &[Facility]) -> (f64, f64) {
    let n = members.len() as f64;
    let lat = members.iter().map(|f| f.lat).sum::<f64>() / n;
    let lng = members.iter().map(|f| f.lng).sum::<f64>() / n;
    (lat, lng)
}

/// Label for a complex: `"<name> (<n> fields)"` when every member shares the
/// first member's name, `"<name> and area (<n> fields)"` otherwise.
pub fn complex_name(members: &[Facility]) -> String {
    let candidate = members
        .first()
        .map(|f| f.name.trim())
        .filter(|name| !name.is_empty())
        .unwrap_or(FALLBACK_NAME);
    let count = members.len();

    if members.iter().all(|f| f.name.trim() == candidate) {
        format!("{} ({} fields)", candidate, count)
    } else {
        format!("{} and area ({} fields)", candidate, count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(names: &[&str]) -> Vec<Facility> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| Facility::new(i.to_string(), *name, 0.0, 0.0))
            .collect()
    }

    #[test]
    fn test_same_names() {
        assert_eq!(
            complex_name(&named(&["Lincoln Park", " Lincoln Park ", "Lincoln Park"])),
            "Lincoln Park (3 fields)"
        );
    }

    #[test]
    fn test_mixed_names() {
        assert_eq!(
            complex_name(&named(&["Lincoln Park", "Court 2"])),
            "Lincoln Park and area (2 fields)"
        );
    }

    #[test]
    fn test_empty_first_name_falls_back() {
        assert_eq!(complex_name(&named(&["  ", "Court 2"])), "Area and area (2 fields)");
        assert_eq!(complex_name(&named(&["", "Area"])), "Area and area (2 fields)");
        assert_eq!(complex_name(&named(&["Area", "Area"])), "Area (2 fields)");
    }

    #[test]
    fn test_centroid_is_mean() {
        let members = vec![
            Facility::new("a", "", 0.0, 0.0),
            Facility::new("b", "", 0.0, 0.002),
        ];
        let (lat, lng) = centroid(&members);
        assert_eq!(lat, 0.0);
        assert!((lng - 0.001).abs() < 1e-12);
    }

    #[test]
    fn test_materialize_single_and_complex() {
        let facilities = vec![
            Facility::new("a", "Field", 1.0, 1.0),
            Facility::new("b", "Court", 2.0, 2.0),
            Facility::new("c", "Field", 1.0, 1.0),
        ];

        let items = materialize(facilities, &[vec![0, 2], vec![1]]);
        assert_eq!(items.len(), 2);

        match &items[0] {
            MapItem::Complex(complex) => {
                assert_eq!(complex.id, "complex-a");
                assert_eq!(complex.name, "Field (2 fields)");
                assert_eq!(complex.facility_count, 2);
                assert_eq!(complex.facilities[1].id, "c");
            }
            other => panic!("expected complex, got {other:?}"),
        }
        match &items[1] {
            MapItem::Single { facility } => assert_eq!(facility.id, "b"),
            other => panic!("expected single, got {other:?}"),
        }
    }

    #[test]
    fn test_single_serializes_with_tag() {
        let items = materialize(vec![Facility::new("a", "Field", 1.0, 2.0)], &[vec![0]]);
        let json = serde_json::to_value(&items).unwrap();
        assert_eq!(json[0]["type"], "single");
        assert_eq!(json[0]["facility"]["id"], "a");
    }
}
