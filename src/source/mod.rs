//! Feed source interfaces and built-in sources.
//!
//! Ownership model:
//! - `FeedSource` is the retrieval collaborator: it yields untrusted
//!   `RawRecord`s in feed order and nothing else.
//! - `RecordView` is the only way the normalizer and pipeline read records,
//!   so any key/value shape can be fed through them.
//! - Sources never validate; a source that returns malformed entries is
//!   normal, a source that cannot be read at all reports `FeedError`.

use std::sync::Arc;

use crate::config::SourceConfig;
use crate::errors::FeedError;
use crate::transport::http::HttpTransport;
use crate::types::SourceId;
use crate::utils::has_http_scheme;

/// RSS/Atom/JSON document parsing.
pub mod feed_parser;
/// Raw record model and the name-keyed record view.
pub mod record_view;
/// Source implementation modules.
pub mod sources;

pub use record_view::{FieldValue, RawField, RawRecord, RecordView};
pub use sources::file_source::FileFeedSource;
pub use sources::http_source::HttpFeedSource;

/// Retrieval-facing feed source interface.
///
/// For a fixed upstream state, `fetch` should return records in the
/// upstream's own order; that order decides which duplicate survives.
pub trait FeedSource: Send + Sync {
    /// Stable source identifier used in logs and errors.
    fn id(&self) -> &str;
    /// Retrieve all raw records currently exposed by the source.
    fn fetch(&self) -> Result<Vec<RawRecord>, FeedError>;
}

/// In-memory source for tests and pre-fetched batches.
pub struct InMemorySource {
    id: SourceId,
    records: Arc<Vec<RawRecord>>,
}

impl InMemorySource {
    /// Create an in-memory source from prebuilt records.
    pub fn new(id: impl Into<SourceId>, records: Vec<RawRecord>) -> Self {
        Self {
            id: id.into(),
            records: Arc::new(records),
        }
    }
}

impl FeedSource for InMemorySource {
    fn id(&self) -> &str {
        &self.id
    }

    fn fetch(&self) -> Result<Vec<RawRecord>, FeedError> {
        Ok(self.records.as_ref().clone())
    }
}

/// Pick the source implementation for a configured location.
///
/// `http(s)://` locations go over the network; anything else (including
/// `file://` URLs) is read from disk.
pub fn source_for(config: &SourceConfig, transport: &HttpTransport) -> Box<dyn FeedSource> {
    let location = config.url.trim();
    let label = config.label().to_string();
    if has_http_scheme(location) {
        Box::new(HttpFeedSource::new(label, location, transport.clone()))
    } else {
        Box::new(FileFeedSource::new(label, location))
    }
}
