use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;
use thiserror::Error;

use shelf_catalog::ValidationError;
use shelf_import::ImportError;
use shelf_store::{OperationError, StoreError};

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Catalog file could not be read or written
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Catalog operation failed (includes not-found lookups)
    #[error(transparent)]
    Operation(#[from] OperationError),

    /// Bad user input
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Ingestion failed
    #[error("Import failed: {0}")]
    Import(#[from] ImportError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Catch-all for other errors
    #[error("{0}")]
    Other(String),
}

impl CliError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Lookup misses and bad input are reported as warnings, not failures.
    pub(crate) fn is_user_error(&self) -> bool {
        match self {
            Self::Validation(_) => true,
            Self::Operation(e) => e.is_not_found() || matches!(e, OperationError::Validation(_)),
            _ => false,
        }
    }

    /// Log the error at the level it deserves.
    pub(crate) fn report(&self) {
        if self.is_user_error() {
            log::warn!("{}", self.if_supports_color(Stderr, |t| t.yellow()));
        } else {
            log::error!(
                "{} {}",
                "Error:".if_supports_color(Stderr, |t| t.red()),
                self
            );
        }
    }
}
