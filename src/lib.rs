//! Cleans the raw hotel review export into the review table later setup
//! steps (embeddings, search indexes) are keyed on.
//!
//! The source data has no review ids, so every run mints fresh ones. That is
//! why [`ReviewCleaningPipeline`] refuses to overwrite an existing output file.

pub mod clean;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod synthetic;

pub use config::CleaningConfig;
pub use error::PipelineError;
pub use pipeline::{CleaningSummary, ReviewCleaningPipeline};
