//! Spreadsheet ingestion: a published sheet exported as CSV, or a local CSV
//! file with the same column layout.
//!
//! Columns (the first row is a header and is skipped):
//!
//! | 0     | 1      | 2    | 3     | 4    | 5    |
//! |-------|--------|------|-------|------|------|
//! | title | author | link | genre | tags | type |

use std::path::PathBuf;
use std::time::Duration;

use shelf_catalog::types::{DEFAULT_STATUS, NewResource, split_tags};

use crate::merge::DuplicatePolicy;
use crate::source::{ImportError, IngestSource};

/// Columns a row needs before it is considered.
const MIN_COLUMNS: usize = 6;

/// Default request timeout for spreadsheet fetches.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Parse spreadsheet CSV into candidates.
///
/// Short rows, rows without a title and malformed rows are skipped. `origin`
/// only labels log messages and errors.
pub fn parse_sheet_csv(content: &str, origin: &str) -> Result<Vec<NewResource>, ImportError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    reader.headers().map_err(|e| ImportError::Csv {
        origin: origin.to_string(),
        source: e,
    })?;

    let mut candidates = Vec::new();

    for (i, result) in reader.records().enumerate() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                log::warn!("Skipping malformed CSV row in {origin}: {e}");
                continue;
            }
        };

        if record.len() < MIN_COLUMNS {
            log::debug!(
                "Skipping row {} in {origin}: {} of {MIN_COLUMNS} columns",
                i + 2,
                record.len()
            );
            continue;
        }

        let get = |col: usize| record.get(col).unwrap_or("").trim().to_string();

        let title = get(0);
        if title.is_empty() {
            continue;
        }
        let author = get(1);

        candidates.push(NewResource {
            title,
            kind: get(5),
            genre: get(3),
            status: DEFAULT_STATUS.to_string(),
            link: get(2),
            tags: split_tags(&get(4)),
            author: (!author.is_empty()).then_some(author),
        });
    }

    Ok(candidates)
}

/// URL of the CSV export for a published spreadsheet.
pub fn sheet_csv_url(sheet_id: &str) -> String {
    format!(
        "https://docs.google.com/spreadsheets/d/{}/gviz/tq?tqx=out:csv&range=A:F",
        sheet_id.trim()
    )
}

/// A published spreadsheet fetched over HTTP. Duplicates are skipped.
#[derive(Debug, Clone)]
pub struct SheetSource {
    pub sheet_id: String,
    pub timeout: Duration,
}

impl SheetSource {
    pub fn new(sheet_id: impl Into<String>) -> Self {
        Self {
            sheet_id: sheet_id.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn download(&self, url: &str) -> Result<String, ImportError> {
        let network = |source| ImportError::Network {
            url: url.to_string(),
            source,
        };

        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .user_agent(concat!("shelf/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(network)?;

        let response = client.get(url).send().map_err(network)?;
        let status = response.status();
        if !status.is_success() {
            return Err(ImportError::Http {
                url: url.to_string(),
                status,
            });
        }
        response.text().map_err(network)
    }
}

impl IngestSource for SheetSource {
    fn name(&self) -> String {
        format!("spreadsheet {}", self.sheet_id)
    }

    fn policy(&self) -> DuplicatePolicy {
        DuplicatePolicy::Skip
    }

    fn fetch(&self) -> Result<Vec<NewResource>, ImportError> {
        let url = sheet_csv_url(&self.sheet_id);
        log::debug!("GET {url} (timeout {:?})", self.timeout);
        let body = self.download(&url)?;
        parse_sheet_csv(&body, &url)
    }
}

/// A CSV file on disk. Duplicates contribute their tags to the existing record.
#[derive(Debug, Clone)]
pub struct CsvFileSource {
    pub path: PathBuf,
}

impl CsvFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl IngestSource for CsvFileSource {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn policy(&self) -> DuplicatePolicy {
        DuplicatePolicy::UnionTags
    }

    fn fetch(&self) -> Result<Vec<NewResource>, ImportError> {
        let content = std::fs::read_to_string(&self.path).map_err(|e| ImportError::Io {
            path: self.path.display().to_string(),
            source: e,
        })?;
        parse_sheet_csv(&content, &self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv() {
        let csv = "\
Title,Author,Link,Genre,Tags,Type
Deep Work,Cal Newport,https://example.com/dw,self-improvement,\"focus, productivity\",book
\"Attention Is All You Need\",,https://arxiv.org/abs/1706.03762,AI ML,\"AI,ML\",article";

        let rows = parse_sheet_csv(csv, "test").unwrap();
        assert_eq!(rows.len(), 2);

        let first = &rows[0];
        assert_eq!(first.title, "Deep Work");
        assert_eq!(first.author.as_deref(), Some("Cal Newport"));
        assert_eq!(first.genre, "self-improvement");
        assert_eq!(first.kind, "book");
        assert_eq!(first.status, "unread");
        assert_eq!(first.tags, vec!["focus", "productivity"]);

        let second = &rows[1];
        assert_eq!(second.author, None);
        assert_eq!(second.tags, vec!["AI", "ML"]);
    }

    #[test]
    fn test_parse_csv_skips_short_and_untitled_rows() {
        let csv = "\
Title,Author,Link,Genre,Tags,Type
Only,Three,Columns
,Nobody,https://example.com,tech,x,book
SPQR,Mary Beard,https://example.com/spqr,history,rome,book";

        let rows = parse_sheet_csv(csv, "test").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "SPQR");
    }

    #[test]
    fn sheet_url_targets_csv_export() {
        assert_eq!(
            sheet_csv_url(" abc123 "),
            "https://docs.google.com/spreadsheets/d/abc123/gviz/tq?tqx=out:csv&range=A:F"
        );
    }
}
