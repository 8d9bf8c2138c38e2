//! C5: overlap validation (spec §4.5).
//!
//! Raw candidates out of C4 are grouped by `(min(r1,r2), max(r1,r2), type)`,
//! reduced to the highest-scoring representative per group, re-checked by a
//! banded alignment of the actual read bytes (rather than trusted on the
//! FM-index edit count alone), filtered by `min_overlap`, and canonicalized
//! so `read_one < read_two`. Grounded on `verify_all`/`verify` in
//! `reference/jbaaijens-rust-overlaps/src/verification.rs`, with the
//! ad hoc first/last-character-forcing trick in that file's
//! `modified_levenshtein` replaced by a proper banded alignment since our
//! candidates, unlike the teacher's seeded ones, can differ in length on
//! either side.

use std::collections::HashMap;

use crate::config::Config;
use crate::overlap::{Overlap, OverlapType};
use crate::reads::{ReadCorpus, Strand};

/// Banded edit distance between `a` and `b`, restricted to a diagonal band of
/// half-width `band` (plus whatever extra width the length difference
/// forces, so the band always reaches the bottom-right corner).
pub fn banded_edit_distance(a: &[u8], b: &[u8], band: usize) -> u32 {
    let n = a.len();
    let m = b.len();
    const INF: u32 = u32::MAX / 2;
    let diff = if n > m { n - m } else { m - n };
    let w = band + diff;

    let mut prev = vec![INF; m + 1];
    let mut curr = vec![INF; m + 1];
    for j in 0..=m.min(w) {
        prev[j] = j as u32;
    }

    for i in 1..=n {
        for v in curr.iter_mut() {
            *v = INF;
        }
        let lo = i.saturating_sub(w);
        let hi = (i + w).min(m);
        if lo == 0 {
            curr[0] = i as u32;
        }
        for j in lo.max(1)..=hi {
            let sub_cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            let mut best = INF;
            if prev[j - 1] < INF {
                best = best.min(prev[j - 1] + sub_cost);
            }
            if prev[j] < INF {
                best = best.min(prev[j] + 1);
            }
            if curr[j - 1] < INF {
                best = best.min(curr[j - 1] + 1);
            }
            curr[j] = best;
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[m]
}

/// Extract the two byte slices an overlap claims align, in the orientation
/// implied by its type. The query side always contributes a suffix of
/// length `len_one`; the target side always contributes a prefix of length
/// `len_two` (this is a structural invariant of C4's backward search, not
/// something that varies by type — see candidates.rs).
fn overlap_substrings(ov: &Overlap, corpus: &ReadCorpus) -> (Vec<u8>, Vec<u8>) {
    let r1 = corpus.get(ov.read_one);
    let r2 = corpus.get(ov.read_two);

    let a_strand = if ov.overlap_type.suf_one() {
        Strand::Forward
    } else {
        Strand::Reverse
    };
    let b_strand = if ov.overlap_type.suf_two() {
        Strand::Reverse
    } else {
        Strand::Forward
    };

    let a_full = r1.strand(a_strand);
    let a_part = a_full[a_full.len() - ov.len_one..].to_vec();
    let b_full = r2.strand(b_strand);
    let b_part = b_full[..ov.len_two].to_vec();
    (a_part, b_part)
}

/// Run the full validation pipeline over raw candidates, returning
/// canonical, deduplicated, re-verified overlaps.
pub fn validate(candidates: impl IntoIterator<Item = Overlap>, corpus: &ReadCorpus, config: &Config) -> Vec<Overlap> {
    // Ranking key for step 2's de-duplication (spec §4.5): highest score
    // first, ties broken by larger combined length, then by smaller
    // `read_one` (smaller is "better" so it sorts first under `>`).
    let rank = |o: &Overlap| (o.score, (o.len_one + o.len_two) as i64, -(o.read_one as i64));

    let mut best: HashMap<(usize, usize, OverlapType), Overlap> = HashMap::new();
    for c in candidates {
        let key = c.canonical_key();
        match best.get(&key) {
            Some(existing) if rank(existing) >= rank(&c) => {}
            _ => {
                best.insert(key, c);
            }
        }
    }

    let mut out = Vec::new();
    for (_, candidate) in best {
        if candidate.len_one < config.min_overlap || candidate.len_two < config.min_overlap {
            continue;
        }
        let (a_part, b_part) = overlap_substrings(&candidate, corpus);
        let longest = a_part.len().max(b_part.len());
        let band = ((config.max_error_rate * longest as f32).ceil() as usize) + config.slack as usize;
        let edits = banded_edit_distance(&a_part, &b_part, band);
        let budget = config.edit_budget(longest) as u32;
        if edits > budget {
            continue;
        }
        let mut validated = candidate;
        validated.score = -(edits as i32);
        out.push(validated.canonicalized());
    }

    out.sort_by(|a, b| a.canonical_key().cmp(&b.canonical_key()));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banded_distance_of_identical_strings_is_zero() {
        assert_eq!(banded_edit_distance(b"ACGTACGT", b"ACGTACGT", 2), 0);
    }

    #[test]
    fn banded_distance_counts_one_substitution() {
        assert_eq!(banded_edit_distance(b"ACGTACGT", b"ACGAACGT", 2), 1);
    }

    #[test]
    fn banded_distance_handles_length_difference_via_indel() {
        // "ACGTACGT" vs "ACGTTACGT" (one inserted T): edit distance 1, and
        // the band must widen enough to reach the far corner despite the
        // one-base length difference.
        assert_eq!(banded_edit_distance(b"ACGTACGT", b"ACGTTACGT", 2), 1);
    }

    fn mk_corpus(config: &Config) -> ReadCorpus {
        let mut corpus = ReadCorpus::new();
        corpus.add(b"AAACCCGGG", 0, config).unwrap();
        corpus.add(b"CCCGGGTTT", 1, config).unwrap();
        corpus
    }

    #[test]
    fn validate_keeps_highest_scoring_duplicate_and_canonicalizes() {
        let mut config = Config::default();
        config.min_overlap = 1;
        let corpus = mk_corpus(&config);

        let candidates = vec![
            Overlap {
                read_one: 1,
                read_two: 0,
                len_one: 6,
                len_two: 6,
                overlap_type: OverlapType::Be,
                score: -3,
            },
            Overlap {
                read_one: 0,
                read_two: 1,
                len_one: 6,
                len_two: 6,
                overlap_type: OverlapType::Eb,
                score: 0,
            },
        ];
        let result = validate(candidates, &corpus, &config);
        assert_eq!(result.len(), 1);
        let ov = &result[0];
        assert!(ov.is_canonical());
        assert_eq!(ov.overlap_type, OverlapType::Eb);
        assert_eq!(ov.score, 0);
    }

    #[test]
    fn validate_drops_overlaps_below_min_overlap() {
        let mut config = Config::default();
        config.min_overlap = 100;
        let corpus = mk_corpus(&config);
        let candidates = vec![Overlap {
            read_one: 0,
            read_two: 1,
            len_one: 6,
            len_two: 6,
            overlap_type: OverlapType::Eb,
            score: 0,
        }];
        assert!(validate(candidates, &corpus, &config).is_empty());
    }
}
