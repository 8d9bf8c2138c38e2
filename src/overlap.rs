//! C6: overlap tuple, overlap type, and the better-overlap adjacency graph
//! (spec §3, §4.6). Grounded on `Candidate`/`Solution` in
//! `reference/jbaaijens-rust-overlaps/src/structs.rs` and `overlap.h` in
//! `original_source/`.

use std::rc::Rc;

/// Which ends of `read_one` and `read_two` participate in an overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OverlapType {
    /// End of read_one meets Beginning of read_two.
    Eb,
    /// Beginning of read_one meets End of read_two.
    Be,
    /// Beginning of read_one meets Beginning of read_two.
    Bb,
    /// End of read_one meets End of read_two.
    Ee,
}

impl OverlapType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OverlapType::Eb => "EB",
            OverlapType::Be => "BE",
            OverlapType::Bb => "BB",
            OverlapType::Ee => "EE",
        }
    }

    /// The type as seen after swapping `read_one`/`read_two` (spec §4.5 step
    /// 4): EB<->BE, BB and EE are invariant under the swap.
    pub fn swapped(&self) -> OverlapType {
        match self {
            OverlapType::Eb => OverlapType::Be,
            OverlapType::Be => OverlapType::Eb,
            OverlapType::Bb => OverlapType::Bb,
            OverlapType::Ee => OverlapType::Ee,
        }
    }

    /// Does this overlap touch the suffix (End) side of read_one?
    pub fn suf_one(&self) -> bool {
        matches!(self, OverlapType::Eb | OverlapType::Ee)
    }

    /// Does this overlap touch the suffix (End) side of read_two?
    pub fn suf_two(&self) -> bool {
        matches!(self, OverlapType::Be | OverlapType::Ee)
    }
}

/// A pairwise overlap (spec §3): `(read_one, read_two, len_one, len_two,
/// type, score)`. `read_one < read_two` canonicalization is not assumed at
/// construction — raw candidates straight out of C4 may appear in either
/// order; the validator (C5) canonicalizes before this type leaves it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Overlap {
    pub read_one: usize,
    pub read_two: usize,
    pub len_one: usize,
    pub len_two: usize,
    pub overlap_type: OverlapType,
    pub score: i32,
}

impl Overlap {
    /// Grouping key used for sort/de-duplication in the validator (spec
    /// §4.5 step 1): `(min(r1,r2), max(r1,r2), type)`, with `type`
    /// re-expressed in terms of the (min, max) ordering.
    pub fn canonical_key(&self) -> (usize, usize, OverlapType) {
        if self.read_one <= self.read_two {
            (self.read_one, self.read_two, self.overlap_type)
        } else {
            (self.read_two, self.read_one, self.overlap_type.swapped())
        }
    }

    /// Return this overlap with `read_one < read_two`, flipping `type`
    /// and swapping the length fields accordingly (spec §4.5 step 4).
    pub fn canonicalized(&self) -> Overlap {
        if self.read_one <= self.read_two {
            self.clone()
        } else {
            Overlap {
                read_one: self.read_two,
                read_two: self.read_one,
                len_one: self.len_two,
                len_two: self.len_one,
                overlap_type: self.overlap_type.swapped(),
                score: self.score,
            }
        }
    }

    pub fn is_canonical(&self) -> bool {
        self.read_one < self.read_two
    }
}

/// A validated overlap plus the total lengths of both participating reads,
/// exposing the derived `Suf`/`Hang`/`Length` accessors from spec §4.5.
/// These are computed on demand rather than stored redundantly (spec §9).
#[derive(Debug, Clone)]
pub struct BetterOverlap {
    pub overlap: Overlap,
    len_read_one_total: usize,
    len_read_two_total: usize,
}

impl BetterOverlap {
    pub fn new(overlap: Overlap, len_read_one_total: usize, len_read_two_total: usize) -> Self {
        BetterOverlap {
            overlap,
            len_read_one_total,
            len_read_two_total,
        }
    }

    /// Does this overlap touch the suffix side of `read`?
    pub fn suf(&self, read: usize) -> bool {
        if read == self.overlap.read_one {
            self.overlap.overlap_type.suf_one()
        } else {
            debug_assert_eq!(read, self.overlap.read_two);
            self.overlap.overlap_type.suf_two()
        }
    }

    /// Overhang length on `read`'s side: the portion of `read` not covered
    /// by the overlap.
    pub fn hang(&self, read: usize) -> i32 {
        if read == self.overlap.read_one {
            self.len_read_one_total as i32 - self.overlap.len_one as i32
        } else {
            debug_assert_eq!(read, self.overlap.read_two);
            self.len_read_two_total as i32 - self.overlap.len_two as i32
        }
    }

    /// Mean of `len_one` and `len_two`.
    pub fn length(&self) -> f64 {
        (self.overlap.len_one + self.overlap.len_two) as f64 / 2.0
    }

    pub fn other(&self, read: usize) -> usize {
        if read == self.overlap.read_one {
            self.overlap.read_two
        } else {
            debug_assert_eq!(read, self.overlap.read_two);
            self.overlap.read_one
        }
    }
}

/// Indexed adjacency over validated overlaps (spec §4.6): for each read id,
/// a sorted-by-neighbour-id list of `(neighbour, overlap)` pairs. Built once
/// and immutable thereafter; edges are arena-allocated via `Rc` and the
/// adjacency lists hold non-owning references into that arena (spec §9).
#[derive(Debug)]
pub struct OverlapGraph {
    neighbours: Vec<Vec<(usize, Rc<BetterOverlap>)>>,
}

impl OverlapGraph {
    pub fn build(num_reads: usize, overlaps: &[Overlap], read_lengths: &[usize]) -> Self {
        let mut neighbours: Vec<Vec<(usize, Rc<BetterOverlap>)>> = vec![Vec::new(); num_reads];
        for ov in overlaps {
            let bo = Rc::new(BetterOverlap::new(
                ov.clone(),
                read_lengths[ov.read_one],
                read_lengths[ov.read_two],
            ));
            neighbours[ov.read_one].push((ov.read_two, bo.clone()));
            neighbours[ov.read_two].push((ov.read_one, bo));
        }
        for n in neighbours.iter_mut() {
            n.sort_by_key(|(id, _)| *id);
        }
        OverlapGraph { neighbours }
    }

    pub fn neighbours(&self, read: usize) -> &[(usize, Rc<BetterOverlap>)] {
        &self.neighbours[read]
    }

    pub fn num_reads(&self) -> usize {
        self.neighbours.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ov(r1: usize, r2: usize, l1: usize, l2: usize, t: OverlapType, s: i32) -> Overlap {
        Overlap {
            read_one: r1,
            read_two: r2,
            len_one: l1,
            len_two: l2,
            overlap_type: t,
            score: s,
        }
    }

    #[test]
    fn canonicalize_swaps_eb_be() {
        let o = ov(5, 2, 10, 12, OverlapType::Eb, 0);
        let c = o.canonicalized();
        assert_eq!((c.read_one, c.read_two), (2, 5));
        assert_eq!(c.overlap_type, OverlapType::Be);
        assert_eq!((c.len_one, c.len_two), (12, 10));
    }

    #[test]
    fn canonicalize_keeps_bb_ee_invariant() {
        let o = ov(5, 2, 10, 12, OverlapType::Bb, -1);
        let c = o.canonicalized();
        assert_eq!(c.overlap_type, OverlapType::Bb);
        let o2 = ov(5, 2, 10, 12, OverlapType::Ee, -1);
        assert_eq!(o2.canonicalized().overlap_type, OverlapType::Ee);
    }

    #[test]
    fn canonical_key_agrees_regardless_of_read_order() {
        let a = ov(2, 5, 10, 12, OverlapType::Eb, 0);
        let b = ov(5, 2, 12, 10, OverlapType::Be, 0);
        assert_eq!(a.canonical_key(), b.canonical_key());
    }

    #[test]
    fn better_overlap_suf_and_hang() {
        let o = ov(0, 1, 8, 10, OverlapType::Eb, 0);
        let bo = BetterOverlap::new(o, 20, 15);
        assert!(bo.suf(0));
        assert!(!bo.suf(1));
        assert_eq!(bo.hang(0), 20 - 8);
        assert_eq!(bo.hang(1), 15 - 10);
        assert_eq!(bo.other(0), 1);
        assert_eq!(bo.other(1), 0);
    }

    #[test]
    fn graph_neighbours_sorted_by_id() {
        let overlaps = vec![
            ov(0, 2, 5, 5, OverlapType::Eb, 0),
            ov(0, 1, 5, 5, OverlapType::Eb, 0),
        ];
        let graph = OverlapGraph::build(3, &overlaps, &[10, 10, 10]);
        let ns: Vec<usize> = graph.neighbours(0).iter().map(|(id, _)| *id).collect();
        assert_eq!(ns, vec![1, 2]);
    }
}
