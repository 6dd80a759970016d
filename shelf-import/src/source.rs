//! Ingestion adapters and the fetch-merge-save driver.
//!
//! Adapters only produce candidates. They never touch the store; [`ingest`]
//! merges their output and writes the catalog once.

use shelf_catalog::types::NewResource;
use shelf_store::{CatalogStore, StoreError};
use thiserror::Error;

use crate::merge::{DuplicatePolicy, MergeStats, merge_ingested};
use crate::progress::ImportProgress;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Request to {url} failed: {source}")]
    Network {
        url: String,
        source: reqwest::Error,
    },
    #[error("HTTP {status} from {url}")]
    Http {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("CSV error in {origin}: {source}")]
    Csv { origin: String, source: csv::Error },
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ImportError {
    /// Whether trying again later could succeed (timeouts, dropped
    /// connections, rate limiting, server errors).
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network { source, .. } => {
                source.is_timeout() || source.is_connect() || source.is_request()
            }
            Self::Http { status, .. } => {
                status.is_server_error() || *status == reqwest::StatusCode::TOO_MANY_REQUESTS
            }
            Self::Csv { .. } | Self::Io { .. } | Self::Store(_) => false,
        }
    }
}

/// Something that produces candidate resources from outside the catalog.
pub trait IngestSource {
    /// Human-readable label for logs.
    fn name(&self) -> String;

    /// How duplicates from this source are treated.
    fn policy(&self) -> DuplicatePolicy;

    /// Produce candidates. Every candidate's status should be "unread".
    fn fetch(&self) -> Result<Vec<NewResource>, ImportError>;
}

/// Fetch from `source`, merge into the stored catalog and save.
///
/// Nothing is written if the fetch fails or the merge changes nothing.
pub fn ingest(
    store: &CatalogStore,
    source: &dyn IngestSource,
    progress: &dyn ImportProgress,
) -> Result<MergeStats, ImportError> {
    progress.on_phase(&format!("Fetching {}", source.name()));
    let candidates = source.fetch()?;
    log::debug!("{} candidates from {}", candidates.len(), source.name());

    let mut catalog = store.load_resources()?;
    let stats = merge_ingested(&mut catalog.resources, candidates, source.policy(), progress);

    if stats.added > 0 || stats.updated > 0 {
        store.save_resources(&catalog)?;
    }

    progress.on_complete(&format!(
        "Imported {} new, {} updated, {} unchanged from {}",
        stats.added,
        stats.updated,
        stats.skipped,
        source.name()
    ));
    Ok(stats)
}
