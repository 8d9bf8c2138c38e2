//! Pipeline orchestration: FASTA ingest through contig layout (spec §6).
//!
//! Stage order mirrors `Unitigging::start`/`main` in
//! `original_source/src/overlap/main.cpp`: read and encode the corpus,
//! build the concatenated index text, suffix array, BWT and FM-index,
//! generate and validate overlap candidates for every read and strand,
//! reduce the string graph, then lay out contigs. Per-stage wall-clock
//! timing is reported when `config.verbose` is set, the same granularity
//! the original reports via `clock()`.

use std::collections::HashSet;
use std::fs::File;
use std::path::Path;
use std::time::Instant;

use bio::io::fasta;

use crate::candidates::generate_candidates;
use crate::config::Config;
use crate::contig::{build_contigs, Contig};
use crate::containment::{find_contained, remove_containment_edges};
use crate::error::{PipelineError, Result};
use crate::fmindex::{AnyFmIndex, BitBucketFmIndex, BucketedFmIndex};
use crate::overlap::{Overlap, OverlapGraph};
use crate::reads::{ReadCorpus, Strand};
use crate::suffix_array::{build_bwt, build_suffix_array};
use crate::text::IndexText;
use crate::transitive::find_transitive_edges;
use crate::validator::validate;

/// Everything produced by a full pipeline run, handed back to the CLI for
/// reporting.
pub struct PipelineOutput {
    pub corpus: ReadCorpus,
    pub overlaps: Vec<Overlap>,
    pub contigs: Vec<Contig>,
}

fn log_stage(config: &Config, name: &str, started: Instant) {
    if config.verbose {
        println!("[{:>12.3}s] {}", started.elapsed().as_secs_f64(), name);
    }
}

/// Read every record from a FASTA file into a `ReadCorpus`, filtering and
/// encoding per `config` (spec §4.1).
pub fn ingest(path: &Path, config: &Config) -> Result<ReadCorpus> {
    let file = File::open(path)?;
    let reader = fasta::Reader::new(file);
    let mut corpus = ReadCorpus::new();
    for (original_id, record) in reader.records().enumerate() {
        let record = record?;
        corpus.add(record.seq(), original_id, config);
    }
    Ok(corpus)
}

/// Run the full overlap + layout pipeline over an already-ingested corpus.
pub fn run(corpus: ReadCorpus, config: &Config) -> Result<PipelineOutput> {
    if corpus.size() < 2 {
        return Err(PipelineError::EmptyCorpus);
    }

    let overall = Instant::now();

    let text = IndexText::build(&corpus);
    if text.is_empty() {
        return Err(PipelineError::BwtBuild);
    }
    log_stage(config, "built concatenated index text", overall);

    let sa_started = Instant::now();
    let sa = build_suffix_array(text.text()).ok_or(PipelineError::BwtBuild)?;
    let bwt = build_bwt(text.text(), &sa);
    log_stage(config, "built suffix array + BWT", sa_started);

    let fm_started = Instant::now();
    let index = if config.bit_bucket {
        AnyFmIndex::BitBucket(BitBucketFmIndex::new(&bwt, config.alphabet_size))
    } else {
        AnyFmIndex::Bucketed(BucketedFmIndex::new(bwt, config.alphabet_size, config.bucket_size))
    };
    log_stage(config, "built FM-index", fm_started);

    let candidate_started = Instant::now();
    let mut candidates: HashSet<Overlap> = HashSet::new();
    for read in corpus.iter() {
        for &strand in &[Strand::Forward, Strand::Reverse] {
            let hits = generate_candidates(&corpus, &text, &index, &sa, read.internal_id(), strand, config);
            candidates.extend(hits);
        }
    }
    log_stage(
        config,
        &format!("generated {} raw candidates", candidates.len()),
        candidate_started,
    );

    let validate_started = Instant::now();
    let overlaps = validate(candidates, &corpus, config);
    log_stage(
        config,
        &format!("validated down to {} overlaps", overlaps.len()),
        validate_started,
    );

    let read_lengths: Vec<usize> = corpus.iter().map(|r| r.len()).collect();

    let containment_started = Instant::now();
    let containment = find_contained(&overlaps, &read_lengths);
    let reduced = remove_containment_edges(&overlaps, &containment.contained);
    log_stage(
        config,
        &format!("removed {} contained reads", containment.contained.len()),
        containment_started,
    );

    let transitive_started = Instant::now();
    let graph = OverlapGraph::build(corpus.size(), &reduced, &read_lengths);
    let redundant = find_transitive_edges(&graph, config);
    let final_overlaps: Vec<Overlap> = reduced
        .into_iter()
        .filter(|ov| !redundant.contains(&(ov.read_one.min(ov.read_two), ov.read_one.max(ov.read_two))))
        .collect();
    log_stage(
        config,
        &format!("removed {} transitive edges", redundant.len()),
        transitive_started,
    );

    let contig_started = Instant::now();
    let final_graph = OverlapGraph::build(corpus.size(), &final_overlaps, &read_lengths);
    let mut contigs = build_contigs(&final_graph);
    // Contained reads never keep an edge into `final_overlaps`, so they can
    // only ever surface here as untouched singletons; drop those, since
    // they are laid out as part of their container's contig, not their own.
    contigs.retain(|c| !(c.members().len() == 1 && containment.contained.contains(&c.members()[0].read_id)));
    log_stage(
        config,
        &format!("laid out {} contigs", contigs.len()),
        contig_started,
    );

    log_stage(config, "pipeline finished", overall);

    Ok(PipelineOutput {
        corpus,
        overlaps: final_overlaps,
        contigs,
    })
}
