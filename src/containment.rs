//! C7: containment detection and removal (spec §4.7).
//!
//! A read is contained when some overlap covers it end to end (its side of
//! the overlap equals its full length). Contained reads are dropped from
//! the string graph entirely rather than laid out as their own contigs.
//! Grounded on `Unitigging::removeContainmentEdges` in
//! `original_source/src/layout/unitigging.cpp`.

use std::collections::{HashMap, HashSet};

use crate::overlap::Overlap;

#[derive(Debug, Default)]
pub struct ContainmentResult {
    /// Reads that are fully covered by some other read.
    pub contained: HashSet<usize>,
    /// For each contained read, one read known to contain it.
    pub container_of: HashMap<usize, usize>,
}

/// Scan overlaps for containment. `read_lengths[r]` must be the full length
/// of read `r`.
pub fn find_contained(overlaps: &[Overlap], read_lengths: &[usize]) -> ContainmentResult {
    let mut contained = HashSet::new();
    let mut container_of = HashMap::new();

    for ov in overlaps {
        let one_full = ov.len_one == read_lengths[ov.read_one];
        let two_full = ov.len_two == read_lengths[ov.read_two];

        if one_full && two_full {
            // Identical-length mutual containment: two reads that cover
            // each other completely (duplicates). Keep the lower id as the
            // surviving representative so the choice is deterministic.
            let (loser, winner) = if ov.read_one < ov.read_two {
                (ov.read_two, ov.read_one)
            } else {
                (ov.read_one, ov.read_two)
            };
            contained.insert(loser);
            container_of.entry(loser).or_insert(winner);
        } else if one_full {
            contained.insert(ov.read_one);
            container_of.entry(ov.read_one).or_insert(ov.read_two);
        } else if two_full {
            contained.insert(ov.read_two);
            container_of.entry(ov.read_two).or_insert(ov.read_one);
        }
    }

    ContainmentResult {
        contained,
        container_of,
    }
}

/// Drop every overlap touching a contained read.
pub fn remove_containment_edges(overlaps: &[Overlap], contained: &HashSet<usize>) -> Vec<Overlap> {
    overlaps
        .iter()
        .filter(|ov| !contained.contains(&ov.read_one) && !contained.contains(&ov.read_two))
        .cloned()
        .collect()
}
