//! C4: suffix-prefix overlap candidate filter (spec §4.4).
//!
//! For a query read's strand, walk the FM-index backward-search space one
//! query base at a time, allowing substitutions, insertions and deletions
//! within an `ε · length + α` budget, and emit a candidate every time the
//! matched suffix is immediately preceded by a sentinel (i.e. it is an exact
//! prefix-aligned boundary of some other segment). Grounded on
//! `GeneratesCandidates`/`recurse_candidates` in
//! `reference/jbaaijens-rust-overlaps/src/search.rs`, simplified to a single
//! whole-pattern search rather than that teacher's multi-seed partitioning
//! (the `algorithm_modes::kucherov` module it dispatches into was not part
//! of the retrieval pack — see DESIGN.md).
//!
//! Matching always extends by consuming one base of the query suffix at a
//! time, so `a_len` below is exactly the overlap length on the query's
//! (read_one's) side, and `b_len` is exactly the overlap length on the
//! matched segment's (read_two's) side — no separate inclusion-mode
//! bookkeeping is needed, since full containment of either read falls out
//! naturally when `a_len`/`b_len` reaches that read's full length.

use std::collections::{HashSet, VecDeque};

use crate::config::Config;
use crate::fmindex::{extend, full_interval, FmIndex, Interval};
use crate::overlap::{Overlap, OverlapType};
use crate::reads::{ReadCorpus, Strand};
use crate::text::IndexText;

/// The operation that produced a search node, restricting which operations
/// its children may apply next so the same alignment isn't reached by two
/// different edit scripts (spec §4.4: "last-operation restriction").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LastOp {
    Initial,
    MatchOrSub,
    Insertion,
    Deletion,
}

impl LastOp {
    fn allows_insertion(self) -> bool {
        matches!(self, LastOp::Initial | LastOp::MatchOrSub | LastOp::Insertion)
    }

    fn allows_deletion(self) -> bool {
        matches!(self, LastOp::Initial | LastOp::MatchOrSub | LastOp::Deletion)
    }

    fn allows_candidate(self) -> bool {
        matches!(self, LastOp::Initial | LastOp::MatchOrSub)
    }
}

struct SearchNode {
    interval: Interval,
    /// Index into the query pattern of the next base to consume, or -1
    /// once the whole pattern has been consumed.
    p_i: isize,
    errors: i32,
    a_len: usize,
    b_len: usize,
    last_op: LastOp,
}

fn classify(query_strand: Strand, target_strand: Strand) -> OverlapType {
    use Strand::*;
    match (query_strand, target_strand) {
        (Forward, Forward) => OverlapType::Eb,
        (Forward, Reverse) => OverlapType::Ee,
        (Reverse, Forward) => OverlapType::Bb,
        (Reverse, Reverse) => OverlapType::Be,
    }
}

/// Enumerate overlap candidates for one strand of one query read.
pub fn generate_candidates<F: FmIndex>(
    corpus: &ReadCorpus,
    text: &IndexText,
    index: &F,
    sa: &[usize],
    query_read: usize,
    query_strand: Strand,
    config: &Config,
) -> HashSet<Overlap> {
    let mut candidates = HashSet::new();
    let pattern = corpus.get(query_read).strand(query_strand);
    let pattern_len = pattern.len();
    if pattern_len == 0 {
        return candidates;
    }

    let query_seg_idx = text.segment_index_for(query_read, query_strand);
    let query_seg_start = text.segment(query_seg_idx).start;

    let mut queue: VecDeque<SearchNode> = VecDeque::new();
    queue.push_back(SearchNode {
        interval: full_interval(index),
        p_i: pattern_len as isize - 1,
        errors: 0,
        a_len: 0,
        b_len: 0,
        last_op: LastOp::Initial,
    });

    while let Some(node) = queue.pop_front() {
        if node.interval.is_empty() {
            continue;
        }

        if node.last_op.allows_candidate() {
            let dollar = extend(index, node.interval, 0);
            if !dollar.is_empty() {
                collect_candidates(
                    text,
                    sa,
                    dollar,
                    query_read,
                    query_strand,
                    query_seg_start + (pattern_len - node.a_len),
                    node.a_len,
                    node.b_len,
                    node.errors,
                    &mut candidates,
                );
            }
        }

        if node.p_i < 0 {
            continue;
        }

        let p_char = pattern[node.p_i as usize];
        for a in 1..=(config.alphabet_size as u8) {
            let child_interval = extend(index, node.interval, a);
            if child_interval.is_empty() {
                continue;
            }

            let sub_errors = if a == p_char { node.errors } else { node.errors + 1 };
            let sub_matched_len = std::cmp::max(node.a_len + 1, node.b_len + 1);
            if sub_errors <= config.edit_budget(sub_matched_len) {
                queue.push_back(SearchNode {
                    interval: child_interval,
                    p_i: node.p_i - 1,
                    errors: sub_errors,
                    a_len: node.a_len + 1,
                    b_len: node.b_len + 1,
                    last_op: LastOp::MatchOrSub,
                });
            }

            if a != p_char && node.last_op.allows_insertion() {
                let ins_errors = node.errors + 1;
                let ins_matched_len = std::cmp::max(node.a_len, node.b_len + 1);
                if ins_errors <= config.edit_budget(ins_matched_len) {
                    queue.push_back(SearchNode {
                        interval: child_interval,
                        p_i: node.p_i,
                        errors: ins_errors,
                        a_len: node.a_len,
                        b_len: node.b_len + 1,
                        last_op: LastOp::Insertion,
                    });
                }
            }
        }

        if node.last_op.allows_deletion() {
            let del_errors = node.errors + 1;
            let del_matched_len = std::cmp::max(node.a_len + 1, node.b_len);
            if del_errors <= config.edit_budget(del_matched_len) {
                queue.push_back(SearchNode {
                    interval: node.interval,
                    p_i: node.p_i - 1,
                    errors: del_errors,
                    a_len: node.a_len + 1,
                    b_len: node.b_len,
                    last_op: LastOp::Deletion,
                });
            }
        }
    }

    candidates
}

#[allow(clippy::too_many_arguments)]
fn collect_candidates(
    text: &IndexText,
    sa: &[usize],
    dollar: Interval,
    query_read: usize,
    query_strand: Strand,
    query_suffix_start: usize,
    a_len: usize,
    b_len: usize,
    errors: i32,
    out: &mut HashSet<Overlap>,
) {
    for p in dollar.lo..dollar.hi {
        let sa_pos = sa[p];
        let target_start = sa_pos + 1;
        let seg = match text.segment_starting_at(target_start) {
            Some(s) => s,
            None => continue,
        };
        if b_len > seg.len {
            continue;
        }
        if seg.read_id == query_read && seg.strand == query_strand && target_start == query_suffix_start {
            // exact zero-offset self match; any other self-overlap (other
            // strand, or a real internal offset) is kept (spec §4.4).
            continue;
        }

        let overlap_type = classify(query_strand, seg.strand);
        out.insert(Overlap {
            read_one: query_read,
            read_two: seg.read_id,
            len_one: a_len,
            len_two: b_len,
            overlap_type,
            score: -errors,
        });
    }
}
