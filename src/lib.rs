//! genolap: the overlap and layout core of an OLC genome assembler.
//!
//! Given a corpus of reads, this crate builds a BWT/FM-index over the
//! concatenated forward+reverse-complement text, enumerates approximate
//! suffix-prefix overlap candidates with an FM-index-backed backward
//! search, validates them with banded alignment, reduces the resulting
//! string graph (containment, then transitive edges), and merges
//! unambiguous chains into linear contigs. FASTA parsing and CLI
//! argument handling live at the edges (`pipeline::ingest`,
//! `bin/genolap.rs`); the nine components in between are pure,
//! re-entrant, and single-threaded by design (see SPEC_FULL.md §5).

pub mod candidates;
pub mod config;
pub mod contig;
pub mod containment;
pub mod error;
pub mod fmindex;
pub mod overlap;
pub mod pipeline;
pub mod reads;
pub mod suffix_array;
pub mod text;
pub mod transitive;
pub mod validator;

pub use config::Config;
pub use error::{PipelineError, Result};
pub use pipeline::{ingest, run, PipelineOutput};

/// Convenience re-exports for the common pipeline types.
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::contig::{Contig, ContigMember};
    pub use crate::error::{PipelineError, Result};
    pub use crate::overlap::{Overlap, OverlapType};
    pub use crate::pipeline::{ingest, run, PipelineOutput};
    pub use crate::reads::{Read, ReadCorpus, Strand};
}
