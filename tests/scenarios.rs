//! Concrete end-to-end scenarios A-F from spec.md §8, run through the full
//! pipeline (candidate generation -> validation -> containment ->
//! transitive reduction -> contig layout) rather than against any one
//! component in isolation.

use genolap::config::Config;
use genolap::overlap::OverlapType;
use genolap::pipeline;
use genolap::reads::ReadCorpus;

fn run_reads(reads: &[&[u8]], config: &Config) -> pipeline::PipelineOutput {
    let mut corpus = ReadCorpus::new();
    for (i, r) in reads.iter().enumerate() {
        corpus.add(r, i, config).expect("read should survive ingest");
    }
    pipeline::run(corpus, config).expect("pipeline should succeed")
}

fn default_test_config() -> Config {
    // The spec's default min_overlap (40) and error rate assume real-sized
    // reads; these scenarios use short hand-built reads, so relax the
    // thresholds to the scenario's own scale while keeping the same shape.
    let mut c = Config::default();
    c.min_overlap = 5;
    c
}

/// Like `default_test_config`, but with error tolerance dropped to zero.
/// Scenarios A and B use reads built only from A/C/G (never T) with no
/// run of 5+ T-free bases repeating across reads, which rules out any
/// reverse-complement collision at `min_overlap` length or above; pairing
/// that with exact-match-only keeps these scenarios to the single overlap
/// each assertion expects.
fn exact_match_config() -> Config {
    let mut c = default_test_config();
    c.max_error_rate = 0.0;
    c.slack = 0;
    c
}

#[test]
fn scenario_a_two_reads_exact_suffix_prefix_overlap() {
    let config = exact_match_config();
    let output = run_reads(&[b"CCAGGACCAG", b"GACCAGCCGA"], &config);

    assert_eq!(output.overlaps.len(), 1);
    let ov = &output.overlaps[0];
    assert_eq!((ov.read_one, ov.read_two), (0, 1));
    assert_eq!((ov.len_one, ov.len_two), (6, 6));
    assert_eq!(ov.overlap_type, OverlapType::Eb);
    assert_eq!(ov.score, 0);

    assert_eq!(output.contigs.len(), 1);
    let ids: Vec<usize> = output.contigs[0].members().iter().map(|m| m.read_id).collect();
    assert_eq!(ids, vec![0, 1]);
}

#[test]
fn scenario_b_three_reads_linear_chain() {
    let config = exact_match_config();
    let output = run_reads(&[b"CCAGCAGCCA", b"AGCCACAGGA", b"CAGGAGCCAG"], &config);

    let mut pairs: Vec<(usize, usize)> = output
        .overlaps
        .iter()
        .map(|o| (o.read_one, o.read_two))
        .collect();
    pairs.sort();
    assert_eq!(pairs, vec![(0, 1), (1, 2)]);

    assert_eq!(output.contigs.len(), 1);
    let ids: Vec<usize> = output.contigs[0].members().iter().map(|m| m.read_id).collect();
    assert_eq!(ids, vec![0, 1, 2]);
}

#[test]
fn scenario_c_containment() {
    let config = default_test_config();
    let output = run_reads(&[b"AAAAACCCCCGGGGG", b"CCCCC"], &config);

    assert!(output.overlaps.is_empty());
    assert_eq!(output.contigs.len(), 1);
    assert_eq!(output.contigs[0].members().len(), 1);
    assert_eq!(output.contigs[0].members()[0].read_id, 0);
}

#[test]
fn scenario_f_one_character_error_is_tolerated() {
    let mut config = default_test_config();
    config.max_error_rate = 0.1;
    let output = run_reads(&[b"AAAAACCCCCGGGGG", b"CCCCTGGGGGAAAAA"], &config);

    let hit = output
        .overlaps
        .iter()
        .find(|o| o.read_one == 0 && o.read_two == 1);
    assert!(hit.is_some(), "expected an overlap despite the substitution");
    assert_eq!(hit.unwrap().score, -1);
}

#[test]
fn ingest_from_fasta_file_round_trips_original_ids() {
    use std::io::Write;
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, ">first\nACGTACGTAC").unwrap();
    writeln!(file, ">second\nGTACGTACGT").unwrap();
    file.flush().unwrap();

    let config = default_test_config();
    let corpus = pipeline::ingest(file.path(), &config).unwrap();
    assert_eq!(corpus.size(), 2);
    assert_eq!(corpus.get(0).original_id(), 0);
    assert_eq!(corpus.get(1).original_id(), 1);
}
