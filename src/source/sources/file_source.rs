use std::path::{Path, PathBuf};

use crate::errors::FeedError;
use crate::source::feed_parser::{parse_feed, parse_json_records};
use crate::source::{FeedSource, RawRecord};
use crate::transport::fs::{is_json_file, path_from_location, read_document};
use crate::types::SourceId;

/// Feed source backed by a local RSS/Atom or JSON document.
pub struct FileFeedSource {
    source_id: SourceId,
    path: PathBuf,
}

impl FileFeedSource {
    /// Create a source for `location` (a bare path or `file://` URL).
    pub fn new(source_id: impl Into<SourceId>, location: &str) -> Self {
        Self {
            source_id: source_id.into(),
            path: path_from_location(location),
        }
    }

    /// Filesystem path read on every fetch.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FeedSource for FileFeedSource {
    fn id(&self) -> &str {
        &self.source_id
    }

    fn fetch(&self) -> Result<Vec<RawRecord>, FeedError> {
        let bytes = read_document(&self.source_id, &self.path)?;
        if is_json_file(&self.path) {
            parse_json_records(&self.source_id, &bytes)
        } else {
            parse_feed(&self.source_id, &bytes)
        }
    }
}
