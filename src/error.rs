use std::path::PathBuf;

use polars::prelude::PolarsError;

/// Everything that can abort a cleaning run. None of these leave an output file behind.
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error(
        "File '{}' exists already. Running this step again results in new random review IDs \
         and you'll have to recompute the embeddings.\nIf you really want to, please delete \
         file '{}' manually.",
        .path.display(),
        .path.display()
    )]
    AlreadyExists { path: PathBuf },

    #[error("Input file '{}' is missing or unreadable: {reason}", .path.display())]
    MissingInput { path: PathBuf, reason: String },

    #[error("Input is missing required column(s): {}", .missing.join(", "))]
    SchemaMismatch { missing: Vec<String> },

    #[error("Failed to transform review table: {0}")]
    Transform(#[from] PolarsError),

    #[error("Failed to write '{}': {reason}", .path.display())]
    WriteFailure { path: PathBuf, reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

