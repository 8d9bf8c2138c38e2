//! Property tests for the invariants enumerated in spec.md §8.
//!
//! Each property is stated as a `proptest` quantified over generated
//! inputs rather than a single example, per SPEC_FULL.md §B.4.

use proptest::prelude::*;

use genolap::config::Config;
use genolap::containment::{find_contained, remove_containment_edges};
use genolap::fmindex::{AnyFmIndex, BucketedFmIndex, FmIndex};
use genolap::overlap::{Overlap, OverlapGraph, OverlapType};
use genolap::reads::{encode_base, ReadCorpus, Strand};
use genolap::suffix_array::{build_bwt, build_suffix_array};
use genolap::text::IndexText;
use genolap::transitive::find_transitive_edges;

fn dna_strategy(min: usize, max: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(prop::sample::select(vec![b'A', b'C', b'G', b'T']), min..max)
}

proptest! {
    /// Invariant 1: reverse-complementing a read twice is the identity.
    #[test]
    fn rc_is_an_involution(bases in dna_strategy(1, 200)) {
        let config = Config::default();
        let mut corpus = ReadCorpus::new();
        let id = corpus.add(&bases, 0, &config).unwrap();
        let read = corpus.get(id);
        let rc: Vec<u8> = read.rev_comp().to_vec();
        let rc_rc: Vec<u8> = rc
            .iter()
            .rev()
            .map(|&c| genolap::reads::complement(c))
            .collect();
        prop_assert_eq!(read.bases().to_vec(), rc_rc);
    }

    /// Invariant 2: Rank is monotone and increases by at most one per step.
    #[test]
    fn rank_is_monotone_and_bounded(bases in dna_strategy(2, 150)) {
        let config = Config::default();
        let mut corpus = ReadCorpus::new();
        corpus.add(&bases, 0, &config).unwrap();
        corpus.add(&bases, 1, &config).unwrap();
        let text = IndexText::build(&corpus);
        let sa = build_suffix_array(text.text()).unwrap();
        let bwt = build_bwt(text.text(), &sa);
        let index = BucketedFmIndex::new(bwt, config.alphabet_size, config.bucket_size);

        for c in 0..=config.alphabet_size as u8 {
            let mut prev = index.rank(c, 0);
            prop_assert_eq!(prev, 0);
            for pos in 1..=index.size() {
                let r = index.rank(c, pos);
                prop_assert!(r >= prev && r <= prev + 1);
                prop_assert!(r <= pos);
                prev = r;
            }
        }
    }

    /// Invariant 3: Less/Rank reconcile to the full symbol count.
    #[test]
    fn less_and_rank_reconcile(bases in dna_strategy(2, 150)) {
        let config = Config::default();
        let mut corpus = ReadCorpus::new();
        corpus.add(&bases, 0, &config).unwrap();
        let text = IndexText::build(&corpus);
        let sa = build_suffix_array(text.text()).unwrap();
        let bwt = build_bwt(text.text(), &sa);
        let index = BucketedFmIndex::new(bwt, config.alphabet_size, config.bucket_size);

        for c in 0..=config.alphabet_size as u8 {
            prop_assert_eq!(index.less(c + 1), index.less(c) + index.rank(c, index.size()));
        }
    }
}

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

proptest! {
    /// Invariant 5: after containment removal, no surviving overlap fully
    /// covers either participating read.
    #[test]
    fn containment_removal_drops_full_coverage(
        lengths in prop::collection::vec(5usize..40, 3..8),
    ) {
        let n = lengths.len();
        let mut overlaps = Vec::new();
        for i in 0..n {
            for j in (i + 1)..n {
                // Every pair "overlaps" across its shorter read's full length,
                // forcing containment whenever lengths differ.
                let shorter = lengths[i].min(lengths[j]);
                overlaps.push(ov(i, j, shorter, shorter, OverlapType::Eb));
            }
        }
        let containment = find_contained(&overlaps, &lengths);
        let kept = remove_containment_edges(&overlaps, &containment.contained);
        for o in &kept {
            prop_assert_ne!(o.len_one, lengths[o.read_one]);
            prop_assert_ne!(o.len_two, lengths[o.read_two]);
        }
    }

    /// Invariant 9: running containment removal on its own output is a no-op.
    #[test]
    fn containment_removal_is_idempotent(
        lengths in prop::collection::vec(5usize..40, 3..8),
    ) {
        let n = lengths.len();
        let mut overlaps = Vec::new();
        for i in 0..n {
            for j in (i + 1)..n {
                let shorter = lengths[i].min(lengths[j]);
                overlaps.push(ov(i, j, shorter, shorter, OverlapType::Eb));
            }
        }
        let containment = find_contained(&overlaps, &lengths);
        let once = remove_containment_edges(&overlaps, &containment.contained);
        let containment2 = find_contained(&once, &lengths);
        let twice = remove_containment_edges(&once, &containment2.contained);
        prop_assert_eq!(once.len(), twice.len());
    }
}

#[test]
fn transitive_removal_leaves_no_witness() {
    // A dense chain 0-1-2-3 with every pair also directly overlapping
    // (so every "skip" edge has a witness) should have exactly the
    // adjacent edges survive.
    let lengths = vec![20, 20, 20, 20];
    let mut overlaps = Vec::new();
    for i in 0..4usize {
        for j in (i + 1)..4usize {
            let span = (j - i) * 5;
            overlaps.push(ov(i, j, span, span, OverlapType::Eb));
        }
    }
    let graph = OverlapGraph::build(4, &overlaps, &lengths);
    let config = Config::default();
    let redundant = find_transitive_edges(&graph, &config);

    // Invariant 6 (spot-check): no surviving edge should itself have a
    // witness satisfying the §4.8 conditions once more are removed.
    let surviving: Vec<&Overlap> = overlaps
        .iter()
        .filter(|o| !redundant.contains(&(o.read_one.min(o.read_two), o.read_one.max(o.read_two))))
        .collect();
    for o in &surviving {
        assert_eq!(
            (o.read_two as i64 - o.read_one as i64).abs(),
            1,
            "expected only adjacent edges to survive transitive reduction, found {:?}",
            o
        );
    }

    // Invariant 9: re-running reduction on the already-reduced graph removes nothing more.
    let reduced_overlaps: Vec<Overlap> = surviving.iter().map(|o| (*o).clone()).collect();
    let graph2 = OverlapGraph::build(4, &reduced_overlaps, &lengths);
    let redundant2 = find_transitive_edges(&graph2, &config);
    assert!(redundant2.is_empty());
}

#[test]
fn every_emitted_overlap_is_canonical() {
    let config = Config::default();
    let candidates = vec![
        ov(3, 1, 10, 10, OverlapType::Eb),
        ov(0, 5, 8, 8, OverlapType::Be),
    ];
    let mut corpus = ReadCorpus::new();
    for i in 0..6 {
        corpus.add(b"ACGTACGTACGTACGTACGTACGT", i, &config).unwrap();
    }
    let validated = genolap::validator::validate(candidates, &corpus, &config);
    for o in &validated {
        assert!(o.is_canonical());
    }
}

#[test]
fn encode_base_only_accepts_acgt() {
    for b in 0u8..=255 {
        let expected = matches!(b, b'A' | b'a' | b'C' | b'c' | b'G' | b'g' | b'T' | b't');
        assert_eq!(encode_base(b).is_some(), expected);
    }
    let _ = Strand::Forward;
    let _ = AnyFmIndex::Bucketed(BucketedFmIndex::new(vec![0], 4, 2));
}
