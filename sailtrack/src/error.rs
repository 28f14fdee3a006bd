//! Error types for overlay export.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Errors that can occur while writing an overlay document.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The destination file could not be created. Nothing was written.
    #[error("failed to create {}: {source}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing to the destination failed mid-document.
    #[error("write failed: {0}")]
    Write(#[from] io::Error),

    /// The markup writer rejected an event for a reason other than I/O.
    #[error("XML error: {0}")]
    Xml(quick_xml::Error),
}

impl From<quick_xml::Error> for ExportError {
    fn from(e: quick_xml::Error) -> Self {
        match e {
            // Sink failures surface as `Write` whichever layer hit them
            quick_xml::Error::Io(shared) => ExportError::Write(
                Arc::try_unwrap(shared)
                    .unwrap_or_else(|shared| io::Error::new(shared.kind(), shared.to_string())),
            ),
            other => ExportError::Xml(other),
        }
    }
}
