// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Transitive grouping of facilities with an index-addressed disjoint set.

use super::adjacency::should_merge;
use crate::models::Facility;

/// Disjoint-set forest over `0..len` with path compression and union by rank.
#[derive(Debug, Clone)]
pub struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u32>,
}

impl DisjointSet {
    /// Every element starts in its own set.
    pub fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
            rank: vec![0; len],
        }
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Root of the set containing `i`. Compresses the path on the way out.
    pub fn find(&mut self, i: usize) -> usize {
        let mut root = i;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut current = i;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }

        root
    }

    /// Merge the sets containing `a` and `b`. Returns false if they were
    /// already joined.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return false;
        }

        match self.rank[root_a].cmp(&self.rank[root_b]) {
            std::cmp::Ordering::Less => self.parent[root_a] = root_b,
            std::cmp::Ordering::Greater => self.parent[root_b] = root_a,
            std::cmp::Ordering::Equal => {
                self.parent[root_b] = root_a;
                self.rank[root_a] += 1;
            }
        }
        true
    }

    pub fn connected(&mut self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }

    /// All sets, each listed in ascending index order, ordered by their
    /// smallest member. The result does not depend on which element ended
    /// up as root.
    pub fn classes(&mut self) -> Vec<Vec<usize>> {
        let mut slot_for_root: Vec<Option<usize>> = vec![None; self.len()];
        let mut classes: Vec<Vec<usize>> = Vec::new();

        for i in 0..self.len() {
            let root = self.find(i);
            match slot_for_root[root] {
                Some(slot) => classes[slot].push(i),
                None => {
                    slot_for_root[root] = Some(classes.len());
                    classes.push(vec![i]);
                }
            }
        }

        classes
    }
}

/// Partition facilities into equivalence classes of the transitive closure of
/// [`should_merge`]. Returns indices into `facilities`.
///
/// Compares every pair, so cost is quadratic in `facilities.len()`.
/// Facilities with non-finite coordinates are left as singletons.
pub fn partition(facilities: &[Facility]) -> Vec<Vec<usize>> {
    let mut set = DisjointSet::new(facilities.len());

    let candidates: Vec<usize> = facilities
        .iter()
        .enumerate()
        .filter_map(|(i, facility)| {
            if facility.has_finite_coordinates() {
                Some(i)
            } else {
                tracing::debug!(
                    facility_id = %facility.id,
                    lat = facility.lat,
                    lng = facility.lng,
                    "Skipping facility with invalid coordinates"
                );
                None
            }
        })
        .collect();

    for (k, &i) in candidates.iter().enumerate() {
        for &j in &candidates[k + 1..] {
            if should_merge(&facilities[i], &facilities[j]) {
                set.union(i, j);
            }
        }
    }

    set.classes()
}
