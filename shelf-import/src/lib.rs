//! Ingestion of external resource lists into the catalog.
//!
//! This crate owns the duplicate-resolution rule and the adapters that turn
//! spreadsheets and CSV files into candidate resources.

pub mod merge;
pub mod progress;
pub mod sheet;
pub mod source;

pub use merge::{DuplicatePolicy, MergeStats, merge_ingested, union_tags};
pub use progress::{ImportProgress, LogProgress, SilentProgress};
pub use sheet::{CsvFileSource, DEFAULT_TIMEOUT, SheetSource, parse_sheet_csv, sheet_csv_url};
pub use source::{ImportError, IngestSource, ingest};
