//! File names, length caps and the fixed column mapping for the review table.

use crate::error::PipelineError;

/// Output file written by the cleaning step, relative to the data directory.
pub const HOTEL_REVIEW_FILE_NAME: &str = "hotel_reviews.csv";

/// Raw review export the cleaning step reads, relative to the data directory.
pub const RAW_REVIEW_SOURCE_FILE_NAME: &str = "raw_hotel_reviews.csv";

/// Maximum number of characters kept from a review body.
pub const MAX_REVIEW_TEXT_LENGTH: usize = 4000;

/// Maximum number of characters kept from a review title.
pub const MAX_REVIEW_TITLE_LENGTH: usize = 128;

pub const NO_TITLE_PLACEHOLDER: &str = "(No title)";
pub const NO_REVIEW_TEXT_PLACEHOLDER: &str = "(No review text)";

/// Cells read as missing, on top of empty ones. Same set pandas' CSV reader
/// treats as NaN, which is what the review export was prepared with.
pub const MISSING_VALUE_TOKENS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Source column -> output column, in output order (after `id`).
pub const COLUMN_MAPPING: [(&str, &str); 11] = [
    ("id", "hotel_id"),
    ("reviews.date", "date"),
    ("city", "hotel_city"),
    ("country", "hotel_country"),
    ("latitude", "hotel_latitude"),
    ("longitude", "hotel_longitude"),
    ("name", "hotel_name"),
    ("reviews.rating", "rating"),
    ("reviews.text", "text"),
    ("reviews.title", "title"),
    ("reviews.username", "username"),
];

pub const ID_COLUMN: &str = "id";
pub const TEXT_COLUMN: &str = "text";
pub const TITLE_COLUMN: &str = "title";
pub const UPVOTES_COLUMN: &str = "review_upvotes";

/// Header of the positional row-index column that leads the output file.
pub const INDEX_COLUMN: &str = "";

/// Columns of the cleaned table, in the order they are written.
pub fn output_columns() -> Vec<&'static str> {
    let mut columns = Vec::with_capacity(COLUMN_MAPPING.len() + 2);
    columns.push(ID_COLUMN);
    columns.extend(COLUMN_MAPPING.iter().map(|(_, renamed)| *renamed));
    columns.push(UPVOTES_COLUMN);
    columns
}

/// Tunables for one cleaning run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleaningConfig {
    pub max_review_text_length: usize,
    pub max_review_title_length: usize,
    /// Run every step except writing the output file.
    pub dry_run: bool,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            max_review_text_length: MAX_REVIEW_TEXT_LENGTH,
            max_review_title_length: MAX_REVIEW_TITLE_LENGTH,
            dry_run: false,
        }
    }
}

impl CleaningConfig {
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.max_review_text_length == 0 {
            return Err(PipelineError::InvalidConfig(
                "max review text length must be positive".to_string(),
            ));
        }
        if self.max_review_title_length == 0 {
            return Err(PipelineError::InvalidConfig(
                "max review title length must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
