//! CLI entry point (spec §6): `genolap <fasta_in> <overlaps_out>`.
//!
//! Parsing argv, opening files, and formatting output lines are treated
//! as external collaborators to the pipeline core (spec §1) — this file
//! owns that glue, `genolap::pipeline` owns everything algorithmic.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;

use genolap::config::Config;
use genolap::contig::Contig;
use genolap::overlap::Overlap;
use genolap::reads::{ReadCorpus, Strand};
use genolap::{pipeline, PipelineError};

#[derive(Parser)]
#[command(name = "genolap")]
#[command(about = "Overlap discovery and string-graph layout core of an OLC assembler", long_about = None)]
struct Cli {
    /// Input FASTA file of reads.
    fasta_in: PathBuf,

    /// Output path for the overlap dump.
    overlaps_out: PathBuf,

    /// Optional output path for the contig dump.
    #[arg(long)]
    contigs_out: Option<PathBuf>,

    /// Drop reads shorter than this before they receive an id.
    #[arg(long)]
    min_read_size: Option<usize>,

    /// Allowed edits per unit length of a matched overlap.
    #[arg(long)]
    max_error_rate: Option<f32>,

    /// Additive edit/overhang tolerance.
    #[arg(long)]
    slack: Option<i32>,

    /// Minimum accepted overlap length.
    #[arg(long)]
    min_overlap: Option<usize>,

    /// Bucket size for the bucketed FM-index variant.
    #[arg(long)]
    bucket_size: Option<usize>,

    /// Use the bit-bucket FM-index variant instead of the bucketed one.
    #[arg(long)]
    bit_bucket: bool,

    /// Map non-ACGT bytes to a fallback base instead of stripping them.
    #[arg(long)]
    n_alphabet: bool,

    /// Print per-stage timing and a run summary.
    #[arg(long, short)]
    verbose: bool,
}

fn build_config(cli: &Cli) -> Config {
    let mut config = Config::default();
    if let Some(v) = cli.min_read_size {
        config.min_read_size = v;
    }
    if let Some(v) = cli.max_error_rate {
        config.max_error_rate = v;
    }
    if let Some(v) = cli.slack {
        config.slack = v;
    }
    if let Some(v) = cli.min_overlap {
        config.min_overlap = v;
    }
    if let Some(v) = cli.bucket_size {
        config.bucket_size = v;
    }
    config.bit_bucket = cli.bit_bucket;
    config.fallback_non_acgt = cli.n_alphabet;
    config.verbose = cli.verbose;
    config
}

/// `<orig_id_1> <orig_id_2> <len_1> <len_2> <TYPE> <score>` per overlap,
/// in validator order (spec §6).
fn write_overlaps(path: &PathBuf, overlaps: &[Overlap], corpus: &ReadCorpus) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for ov in overlaps {
        writeln!(
            out,
            "{} {} {} {} {} {}",
            corpus.get(ov.read_one).original_id(),
            corpus.get(ov.read_two).original_id(),
            ov.len_one,
            ov.len_two,
            ov.overlap_type.as_str(),
            ov.score,
        )?;
    }
    out.flush()
}

/// One line per contig: `<orig_id>[+|-]` per read, in layout order (spec §6).
fn write_contigs(path: &PathBuf, contigs: &[Contig], corpus: &ReadCorpus) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for contig in contigs {
        let line: Vec<String> = contig
            .members()
            .iter()
            .map(|m| {
                let sign = match m.strand {
                    Strand::Forward => '+',
                    Strand::Reverse => '-',
                };
                format!("{}{}", corpus.get(m.read_id).original_id(), sign)
            })
            .collect();
        writeln!(out, "{}", line.join(" "))?;
    }
    out.flush()
}

fn main() {
    let cli = Cli::parse();
    let config = build_config(&cli);

    let corpus = match pipeline::ingest(&cli.fasta_in, &config) {
        Ok(c) => c,
        Err(err) => {
            eprintln!("genolap: {}", err);
            process::exit(err.exit_code());
        }
    };

    let output = match pipeline::run(corpus, &config) {
        Ok(o) => o,
        Err(err) => {
            eprintln!("genolap: {}", err);
            process::exit(err.exit_code());
        }
    };

    if config.verbose {
        println!();
        println!("Summary");
        println!(" + number of reads: {}", output.corpus.size());
        println!(" + number of overlaps: {}", output.overlaps.len());
        println!(" + number of contigs: {}", output.contigs.len());
    }

    if let Err(err) = write_overlaps(&cli.overlaps_out, &output.overlaps, &output.corpus) {
        eprintln!("genolap: failed to write overlaps: {}", err);
        process::exit(PipelineError::InputOpen(err).exit_code());
    }

    if let Some(contigs_out) = &cli.contigs_out {
        if let Err(err) = write_contigs(contigs_out, &output.contigs, &output.corpus) {
            eprintln!("genolap: failed to write contigs: {}", err);
            process::exit(PipelineError::InputOpen(err).exit_code());
        }
    }
}
