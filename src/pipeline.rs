use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use polars::prelude::*;
use rand::Rng;
use serde::Serialize;
use tempfile::NamedTempFile;

use crate::clean::{clean_review_text, clean_review_title, CleanedText};
use crate::config::{
    output_columns, CleaningConfig, COLUMN_MAPPING, ID_COLUMN, INDEX_COLUMN,
    MISSING_VALUE_TOKENS, TEXT_COLUMN, TITLE_COLUMN, UPVOTES_COLUMN,
};
use crate::error::PipelineError;
use crate::synthetic::{generate_review_id, random_upvotes};

// ============================================================================
// SUMMARY
// ============================================================================

/// What one run did, in a form the CLI can print or dump as JSON.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CleaningSummary {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub rows_written: usize,
    pub text_markers_stripped: usize,
    pub texts_capped: usize,
    pub titles_capped: usize,
    pub texts_defaulted: usize,
    pub titles_defaulted: usize,
    pub dry_run: bool,
    pub elapsed_ms: u128,
}

#[derive(Debug, Default)]
struct FieldCounts {
    markers_stripped: usize,
    capped: usize,
    defaulted: usize,
}

impl FieldCounts {
    fn record(&mut self, cleaned: &CleanedText) {
        self.markers_stripped += cleaned.marker_stripped as usize;
        self.capped += cleaned.capped as usize;
        self.defaulted += cleaned.defaulted as usize;
    }
}

// ============================================================================
// PIPELINE
// ============================================================================

/// Turns the raw review export into the cleaned review table.
#[derive(Debug, Clone, Default)]
pub struct ReviewCleaningPipeline {
    config: CleaningConfig,
}

impl ReviewCleaningPipeline {
    pub fn new(config: CleaningConfig) -> Result<Self, PipelineError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CleaningConfig {
        &self.config
    }

    /// Clean `input` into a new file at `output` and return the number of rows written.
    pub fn run(&self, input: &Path, output: &Path) -> Result<usize, PipelineError> {
        self.execute(input, output)
            .map(|summary| summary.rows_written)
    }

    pub fn execute(&self, input: &Path, output: &Path) -> Result<CleaningSummary, PipelineError> {
        self.execute_with_rng(input, output, &mut rand::thread_rng())
    }

    /// Same as [`execute`](Self::execute), drawing ids and upvotes from `rng`.
    pub fn execute_with_rng<R: Rng + ?Sized>(
        &self,
        input: &Path,
        output: &Path,
        rng: &mut R,
    ) -> Result<CleaningSummary, PipelineError> {
        let start = Instant::now();

        // Ids are random on every run; an existing table may already be keyed by them.
        ensure_output_absent(output)?;

        let lf = scan_reviews(input)?;
        let mut df = project_review_columns(lf)?;

        let text_counts = self.clean_text_column(&mut df)?;
        let title_counts = self.clean_title_column(&mut df)?;
        attach_synthetic_columns(&mut df, rng)?;

        let mut df = df
            .select(output_columns())?
            .with_row_count(INDEX_COLUMN, None)?;
        let rows_written = df.height();

        if !self.config.dry_run {
            write_atomically(&mut df, output)?;
        }

        Ok(CleaningSummary {
            input_path: input.to_path_buf(),
            output_path: output.to_path_buf(),
            rows_written,
            text_markers_stripped: text_counts.markers_stripped,
            texts_capped: text_counts.capped,
            titles_capped: title_counts.capped,
            texts_defaulted: text_counts.defaulted,
            titles_defaulted: title_counts.defaulted,
            dry_run: self.config.dry_run,
            elapsed_ms: start.elapsed().as_millis(),
        })
    }

    fn clean_text_column(&self, df: &mut DataFrame) -> Result<FieldCounts, PipelineError> {
        let max_chars = self.config.max_review_text_length;
        let mut counts = FieldCounts::default();

        let cleaned: Vec<String> = df
            .column(TEXT_COLUMN)?
            .utf8()?
            .into_iter()
            .map(|text| {
                let cleaned = clean_review_text(non_empty(text), max_chars);
                counts.record(&cleaned);
                cleaned.value
            })
            .collect();

        df.with_column(Series::new(TEXT_COLUMN, cleaned))?;
        Ok(counts)
    }

    fn clean_title_column(&self, df: &mut DataFrame) -> Result<FieldCounts, PipelineError> {
        let max_chars = self.config.max_review_title_length;
        let mut counts = FieldCounts::default();

        let cleaned: Vec<String> = df
            .column(TITLE_COLUMN)?
            .utf8()?
            .into_iter()
            .map(|title| {
                let cleaned = clean_review_title(non_empty(title), max_chars);
                counts.record(&cleaned);
                cleaned.value
            })
            .collect();

        df.with_column(Series::new(TITLE_COLUMN, cleaned))?;
        Ok(counts)
    }
}

// ============================================================================
// STEPS
// ============================================================================

fn ensure_output_absent(output: &Path) -> Result<(), PipelineError> {
    // symlink_metadata so a dangling link still counts as occupied
    if fs::symlink_metadata(output).is_ok() {
        return Err(PipelineError::AlreadyExists {
            path: output.to_path_buf(),
        });
    }
    Ok(())
}

fn scan_reviews(input: &Path) -> Result<LazyFrame, PipelineError> {
    let missing_input = |reason: String| PipelineError::MissingInput {
        path: input.to_path_buf(),
        reason,
    };

    if !input.is_file() {
        return Err(missing_input("no such file".to_string()));
    }
    File::open(input).map_err(|e| missing_input(e.to_string()))?;

    let null_tokens = MISSING_VALUE_TOKENS.iter().map(|t| t.to_string()).collect();

    // No type inference: every cell stays the exact string from the file, so
    // "007" or "TRUE" in a review or a hotel id is never reparsed.
    LazyCsvReader::new(input)
        .has_header(true)
        .with_delimiter(b',')
        .with_infer_schema_length(Some(0))
        .with_null_values(Some(NullValues::AllColumns(null_tokens)))
        .finish()
        .map_err(|e| missing_input(format!("Polars CSV read error: {}", e)))
}

/// Keep the eleven source columns under their output names.
fn project_review_columns(lf: LazyFrame) -> Result<DataFrame, PipelineError> {
    let schema = lf.schema()?;
    let missing: Vec<String> = COLUMN_MAPPING
        .iter()
        .filter(|(source, _)| schema.get(source).is_none())
        .map(|(source, _)| source.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(PipelineError::SchemaMismatch { missing });
    }

    let exprs: Vec<Expr> = COLUMN_MAPPING
        .iter()
        .map(|(source, renamed)| col(source).alias(renamed))
        .collect();

    Ok(lf.select(exprs).collect()?)
}

fn attach_synthetic_columns<R: Rng + ?Sized>(
    df: &mut DataFrame,
    rng: &mut R,
) -> Result<(), PipelineError> {
    let height = df.height();
    let ids: Vec<String> = (0..height).map(|_| generate_review_id(rng)).collect();
    let upvotes: Vec<i64> = (0..height).map(|_| random_upvotes(rng)).collect();

    df.with_column(Series::new(ID_COLUMN, ids))?;
    df.with_column(Series::new(UPVOTES_COLUMN, upvotes))?;
    Ok(())
}

/// Write next to `output` and rename into place, so a crash never leaves a
/// half-written file that the existence guard would accept as done.
fn write_atomically(df: &mut DataFrame, output: &Path) -> Result<(), PipelineError> {
    let write_failure = |reason: String| PipelineError::WriteFailure {
        path: output.to_path_buf(),
        reason,
    };

    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)
        .map_err(|e| write_failure(format!("cannot create {}: {}", dir.display(), e)))?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| write_failure(e.to_string()))?;
    CsvWriter::new(&mut tmp)
        .has_header(true)
        .with_delimiter(b',')
        .finish(df)
        .map_err(|e| write_failure(format!("Polars CSV write error: {}", e)))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| write_failure(e.to_string()))?;

    tmp.persist_noclobber(output).map_err(|e| {
        if e.error.kind() == io::ErrorKind::AlreadyExists {
            PipelineError::AlreadyExists {
                path: output.to_path_buf(),
            }
        } else {
            write_failure(e.error.to_string())
        }
    })?;

    Ok(())
}

/// Empty cells count as missing, like the NA tokens the reader already nulls.
fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
