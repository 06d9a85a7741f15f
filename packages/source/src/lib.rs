#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Survey data ingest.
//!
//! Two ingest paths produce the same typed [`SurveyRow`] sequence: a
//! spreadsheet file uploaded through the dashboard ([`workbook`]) and the
//! published-sheet CSV export fetched over HTTP ([`sheet`]). Both resolve
//! the required survey columns once from the header row ([`extract`]) and
//! fail before reading any data when a column is missing, so callers can
//! keep their previous dataset untouched on any error.
//!
//! [`SurveyRow`]: carbon_fleet_survey_models::SurveyRow

pub mod extract;
pub mod retry;
pub mod sheet;
pub mod workbook;

/// Errors that can occur while ingesting survey data.
///
/// Every variant is terminal for the triggering ingest; nothing here is
/// retried at this level (the periodic refresh simply tries again at its
/// next tick).
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("HTTP request returned {0}")]
    Status(reqwest::StatusCode),

    /// The response body was empty or whitespace.
    #[error("response body was empty")]
    EmptyBody,

    /// The source parsed cleanly but contained no data rows.
    #[error("no data rows found")]
    NoRecords,

    /// One or more required survey columns are absent from the header row.
    #[error("missing required columns: {}", .missing.join(", "))]
    MissingColumns {
        /// Exact header strings that were not found.
        missing: Vec<String>,
    },

    /// The workbook contains no worksheets.
    #[error("workbook contains no worksheets")]
    NoWorksheet,

    /// The uploaded file is not a spreadsheet.
    #[error("unsupported file type '{0}': expected .xlsx or .xls")]
    UnsupportedFormat(String),

    /// CSV parsing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Workbook parsing failed.
    #[error("workbook error: {0}")]
    Workbook(#[from] calamine::Error),

    /// I/O error (file read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
