use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use indicatif::{ProgressBar, ProgressStyle};

use review_prep::config::{
    HOTEL_REVIEW_FILE_NAME, MAX_REVIEW_TEXT_LENGTH, MAX_REVIEW_TITLE_LENGTH,
    RAW_REVIEW_SOURCE_FILE_NAME,
};
use review_prep::{CleaningConfig, CleaningSummary, ReviewCleaningPipeline};

// ============================================================================
// CLI DEFINITION
// ============================================================================

/// Clean the raw hotel review CSV into the review table used by later setup steps
#[derive(Parser, Debug)]
#[command(name = "clean-reviews")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:\n  \
    # Clean ./raw_hotel_reviews.csv into ./hotel_reviews.csv\n  \
    clean-reviews\n\n  \
    # Use another data directory and keep a JSON report\n  \
    clean-reviews --data-dir setup --report clean-report.json\n\n  \
    # See what would be written without touching the disk\n  \
    clean-reviews --dry-run -v")]
struct Cli {
    /// Directory holding the raw export and receiving the cleaned file
    #[arg(long, default_value = ".")]
    data_dir: PathBuf,

    /// Raw review CSV (default: <data-dir>/raw_hotel_reviews.csv)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Cleaned review CSV to create (default: <data-dir>/hotel_reviews.csv)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Maximum characters kept from each review text
    #[arg(long, default_value_t = MAX_REVIEW_TEXT_LENGTH)]
    max_text_length: usize,

    /// Maximum characters kept from each review title
    #[arg(long, default_value_t = MAX_REVIEW_TITLE_LENGTH)]
    max_title_length: usize,

    /// Run the whole cleaning step without writing the output file
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    /// Show statistics summary after cleaning (`--stats false` to hide)
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    stats: bool,

    /// Write the run summary as JSON to this path
    #[arg(long)]
    report: Option<PathBuf>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    verbose: bool,
}

// ============================================================================
// UTILITIES
// ============================================================================

fn create_progress_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(msg.to_string());
    pb.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠸", "⠴", "⠦", "⠇"]),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn print_stats(summary: &CleaningSummary, verbose: bool) {
    println!("\n📊 Summary:");
    println!("  Rows out:          {}", summary.rows_written);
    println!("  Markers stripped:  {}", summary.text_markers_stripped);
    println!("  Texts capped:      {}", summary.texts_capped);
    println!("  Titles capped:     {}", summary.titles_capped);
    println!("  Texts defaulted:   {}", summary.texts_defaulted);
    println!("  Titles defaulted:  {}", summary.titles_defaulted);

    let secs = summary.elapsed_ms as f64 / 1000.0;
    println!("  Time:              {:.2}s", secs);

    if verbose && secs > 0.0 {
        println!("  Rate:              {:.0} rows/sec", summary.rows_written as f64 / secs);
    }
}

fn write_report(summary: &CleaningSummary, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(summary)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write report: {:?}", path))?;
    println!("✅ Report written: {:?}", path);
    Ok(())
}

// ============================================================================
// CLEAN COMMAND
// ============================================================================

fn clean_reviews(cli: Cli) -> Result<()> {
    let input = cli
        .input
        .unwrap_or_else(|| cli.data_dir.join(RAW_REVIEW_SOURCE_FILE_NAME));
    let output = cli
        .output
        .unwrap_or_else(|| cli.data_dir.join(HOTEL_REVIEW_FILE_NAME));

    let pipeline = ReviewCleaningPipeline::new(CleaningConfig {
        max_review_text_length: cli.max_text_length,
        max_review_title_length: cli.max_title_length,
        dry_run: cli.dry_run,
    })?;

    if cli.verbose {
        println!("  Input:  {:?}", input);
        println!("  Output: {:?}", output);
        println!(
            "  Caps:   text={} title={} chars",
            cli.max_text_length, cli.max_title_length
        );
    }

    let pb = create_progress_spinner("Cleaning hotel reviews...");
    let result = pipeline.execute(&input, &output);
    pb.finish_and_clear();

    let summary = result?;

    if summary.dry_run {
        println!("🔍 DRY RUN - No files written");
        println!("  Would clean: {:?} → {:?}", input, output);
        println!("  Output rows: {}", summary.rows_written);
    } else {
        println!("✅ Cleaned CSV saved to {:?}", output);
    }

    if cli.stats {
        print_stats(&summary, cli.verbose);
    }

    if let Some(report) = cli.report.as_ref() {
        write_report(&summary, report)?;
    }

    Ok(())
}

// ============================================================================
// MAIN
// ============================================================================

fn main() -> Result<()> {
    let cli = Cli::parse();
    let verbose = cli.verbose;

    if let Err(e) = clean_reviews(cli) {
        eprintln!("❌ Error: {}", e);
        if verbose {
            eprintln!("\nDebug info: {:?}", e);
        }
        std::process::exit(1);
    }

    Ok(())
}
