use std::io;

use thiserror::Error;

use crate::types::SourceId;

/// Error type for source retrieval, configuration, and delivery failures.
///
/// The normalization pipeline itself never produces these; malformed records
/// are dropped, not reported.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The source could not be reached or read at all.
    #[error("feed source '{source_id}' is unavailable: {reason}")]
    SourceUnavailable {
        /// Source that failed.
        source_id: SourceId,
        /// Transport or filesystem failure description.
        reason: String,
    },
    /// The source answered with a document that could not be parsed.
    #[error("feed source '{source_id}' returned an unreadable document: {details}")]
    SourceInconsistent {
        /// Source that returned the document.
        source_id: SourceId,
        /// Parser failure description.
        details: String,
    },
    /// The delivery collaborator rejected or failed to send the digest.
    #[error("delivery failed: {0}")]
    Delivery(String),
    /// Local I/O failure, such as writing the dry-run report.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// Invalid configuration or command line.
    #[error("configuration error: {0}")]
    Configuration(String),
}
