//! C9: contig layout (spec §4.9).
//!
//! After containment and transitive-edge removal, every remaining read has
//! at most one surviving edge per side. A side with exactly one edge whose
//! far endpoint also has exactly one edge on the side facing back is an
//! unambiguous chain link; walking these links merges reads into ordered,
//! oriented contigs via a size-weighted union-find. No base-level consensus
//! is produced here — a contig is a path of `(read_id, strand)` members,
//! the layout of the assembly, not its consensus sequence.
//!
//! Grounded on `Contig`/`Unitigging::makeContigs` in
//! `original_source/src/layout/contig.cpp` and `unitigging.cpp`. That
//! file's `Contig::Kill()` sets `alive_ = true`, which is a bug — a killed
//! contig must read as dead. This implementation sets it to `false`.

use std::collections::HashMap;

use crate::overlap::OverlapGraph;
use crate::reads::Strand;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContigMember {
    pub read_id: usize,
    pub strand: Strand,
}

#[derive(Debug, Clone)]
pub struct Contig {
    members: Vec<ContigMember>,
    alive: bool,
}

impl Contig {
    fn singleton(read_id: usize) -> Self {
        Contig {
            members: vec![ContigMember {
                read_id,
                strand: Strand::Forward,
            }],
            alive: true,
        }
    }

    pub fn members(&self) -> &[ContigMember] {
        &self.members
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn kill(&mut self) {
        self.alive = false;
    }

    fn flip_members(members: &[ContigMember]) -> Vec<ContigMember> {
        members
            .iter()
            .rev()
            .map(|m| ContigMember {
                read_id: m.read_id,
                strand: match m.strand {
                    Strand::Forward => Strand::Reverse,
                    Strand::Reverse => Strand::Forward,
                },
            })
            .collect()
    }

    /// The contig-boundary side currently exposing `read_id`'s `native_side`
    /// (Left/Right as seen in `read_id`'s own un-flipped orientation).
    /// Flipped members expose the opposite of their native side; `None` if
    /// `read_id` isn't actually sitting at that boundary (interior member,
    /// or the read isn't in this contig at all).
    fn exposed_side(&self, read_id: usize, native_side: Side) -> Option<Side> {
        let member = self.members.iter().find(|m| m.read_id == read_id)?;
        let side = match member.strand {
            Strand::Forward => native_side,
            Strand::Reverse => native_side.opposite(),
        };
        match side {
            Side::Left if self.members.first().map(|m| m.read_id) == Some(read_id) => Some(Side::Left),
            Side::Right if self.members.last().map(|m| m.read_id) == Some(read_id) => Some(Side::Right),
            _ => None,
        }
    }

    /// Join `other` onto `self` at the given boundary sides (spec §4.9's
    /// four-case orientation table), consuming `other`.
    fn join(&mut self, other: Contig, self_side: Side, other_side: Side) {
        match (self_side, other_side) {
            (Side::Right, Side::Left) => {
                self.members.extend(other.members);
            }
            (Side::Right, Side::Right) => {
                self.members.extend(Self::flip_members(&other.members));
            }
            (Side::Left, Side::Left) => {
                let mut merged = Self::flip_members(&other.members);
                merged.extend(std::mem::take(&mut self.members));
                self.members = merged;
            }
            (Side::Left, Side::Right) => {
                let mut merged = other.members;
                merged.extend(std::mem::take(&mut self.members));
                self.members = merged;
            }
        }
    }
}

struct UnionFind {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl UnionFind {
    fn new(n: usize) -> Self {
        UnionFind {
            parent: (0..n).collect(),
            size: vec![1; n],
        }
    }

    fn find(&mut self, x: usize) -> usize {
        if self.parent[x] != x {
            self.parent[x] = self.find(self.parent[x]);
        }
        self.parent[x]
    }

    /// Union the sets containing `a` and `b`, returning `(new_root,
    /// absorbed_root)`. The larger set's root wins, ties favour `a`'s root.
    fn union(&mut self, a: usize, b: usize) -> (usize, usize) {
        let (ra, rb) = (self.find(a), self.find(b));
        let (winner, loser) = if self.size[ra] >= self.size[rb] { (ra, rb) } else { (rb, ra) };
        self.parent[loser] = winner;
        self.size[winner] += self.size[loser];
        (winner, loser)
    }
}

/// For every read and side, whether that side carries exactly one
/// surviving edge whose far endpoint also sees exactly one edge on the
/// side facing back — and if so, that edge's far `(read_id, side)`.
fn chain_links(graph: &OverlapGraph) -> HashMap<(usize, Side), (usize, Side)> {
    let mut links = HashMap::new();
    for r in 0..graph.num_reads() {
        for side in [Side::Left, Side::Right] {
            let want_suf = side == Side::Right;
            let matching: Vec<_> = graph
                .neighbours(r)
                .iter()
                .filter(|(_, ov)| ov.suf(r) == want_suf)
                .collect();
            if matching.len() != 1 {
                continue;
            }
            let (other, ov) = matching[0];
            let other_side_is_suf = ov.suf(*other);
            let other_want_suf = graph
                .neighbours(*other)
                .iter()
                .filter(|(_, o)| o.suf(*other) == other_side_is_suf)
                .count();
            if other_want_suf != 1 {
                continue;
            }
            let other_side = if other_side_is_suf { Side::Right } else { Side::Left };
            links.insert((r, side), (*other, other_side));
        }
    }
    links
}

/// Build contigs from the reduced string graph (spec §4.9).
pub fn build_contigs(graph: &OverlapGraph) -> Vec<Contig> {
    let num_reads = graph.num_reads();
    let mut contigs: Vec<Contig> = (0..num_reads).map(Contig::singleton).collect();
    let mut uf = UnionFind::new(num_reads);
    let links = chain_links(graph);

    // Each unordered link is discovered from both endpoints; process each
    // underlying edge once by keeping only the lexicographically smaller
    // (read, side) as the driver.
    let mut seen_edges = std::collections::HashSet::new();
    for (&(r, side), &(other, other_side)) in &links {
        let edge_key = if (r, side) <= (other, other_side) {
            ((r, side), (other, other_side))
        } else {
            ((other, other_side), (r, side))
        };
        if !seen_edges.insert(edge_key) {
            continue;
        }

        let root_r = uf.find(r);
        let root_other = uf.find(other);
        if root_r == root_other {
            // Already merged via another link, or a closed cycle; leave as is.
            continue;
        }

        let side_r = match contigs[root_r].exposed_side(r, side) {
            Some(s) => s,
            None => continue,
        };
        let side_other = match contigs[root_other].exposed_side(other, other_side) {
            Some(s) => s,
            None => continue,
        };

        let (new_root, absorbed) = uf.union(root_r, root_other);
        let (driver_root, driver_side, passenger_root, passenger_side) = if new_root == root_r {
            (root_r, side_r, root_other, side_other)
        } else {
            (root_other, side_other, root_r, side_r)
        };
        let passenger = std::mem::replace(&mut contigs[passenger_root], Contig::singleton(usize::MAX));
        contigs[driver_root].join(passenger, driver_side, passenger_side);
        contigs[absorbed] = contigs[driver_root].clone();
        if absorbed != driver_root {
            contigs[absorbed].kill();
        }
        debug_assert_eq!(new_root, driver_root);
    }

    contigs
        .into_iter()
        .enumerate()
        .filter(|(idx, c)| c.is_alive() && uf_is_root(&mut uf, *idx))
        .map(|(_, c)| c)
        .collect()
}

fn uf_is_root(uf: &mut UnionFind, idx: usize) -> bool {
    uf.find(idx) == idx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlap::{Overlap, OverlapType};

    fn ov(r1: usize, r2: usize, l1: usize, l2: usize, t: OverlapType) -> Overlap {
        Overlap {
            read_one: r1,
            read_two: r2,
            len_one: l1,
            len_two: l2,
            overlap_type: t,
            score: 0,
        }
    }

    #[test]
    fn isolated_read_is_a_singleton_contig() {
        let graph = OverlapGraph::build(1, &[], &[10]);
        let contigs = build_contigs(&graph);
        assert_eq!(contigs.len(), 1);
        assert_eq!(contigs[0].members().len(), 1);
        assert_eq!(contigs[0].members()[0].read_id, 0);
    }

    #[test]
    fn simple_chain_merges_in_order() {
        // 0 --(End0/Begin1)--> 1 --(End1/Begin2)--> 2, a simple unambiguous chain.
        let overlaps = vec![ov(0, 1, 4, 4, OverlapType::Eb), ov(1, 2, 4, 4, OverlapType::Eb)];
        let graph = OverlapGraph::build(3, &overlaps, &[10, 10, 10]);
        let contigs = build_contigs(&graph);
        assert_eq!(contigs.len(), 1);
        let ids: Vec<usize> = contigs[0].members().iter().map(|m| m.read_id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
        let strands: Vec<Strand> = contigs[0].members().iter().map(|m| m.strand).collect();
        assert_eq!(strands, vec![Strand::Forward, Strand::Forward, Strand::Forward]);
    }

    #[test]
    fn branching_reads_stay_separate() {
        // read 1 has two End-side neighbours -> ambiguous, no merge anywhere.
        let overlaps = vec![ov(0, 1, 4, 4, OverlapType::Eb), ov(2, 1, 4, 4, OverlapType::Eb)];
        let graph = OverlapGraph::build(3, &overlaps, &[10, 10, 10]);
        let contigs = build_contigs(&graph);
        assert_eq!(contigs.len(), 3);
    }
}
