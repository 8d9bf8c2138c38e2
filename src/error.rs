//! Error types for the overlap/layout pipeline.

use std::io;
use thiserror::Error;

/// Errors that can terminate the pipeline (spec §7).
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("failed to open input FASTA: {0}")]
    InputOpen(#[from] io::Error),

    #[error("corpus is empty after ingest filtering (fewer than 2 reads survived)")]
    EmptyCorpus,

    #[error("BWT construction failed (empty or degenerate concatenated text)")]
    BwtBuild,
}

impl PipelineError {
    /// Process exit code for this error, per spec §6/§7.
    pub fn exit_code(&self) -> i32 {
        match self {
            PipelineError::InputOpen(_) => 1,
            PipelineError::EmptyCorpus | PipelineError::BwtBuild => 2,
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
