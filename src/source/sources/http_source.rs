use crate::errors::FeedError;
use crate::source::feed_parser::{parse_feed, parse_json_records};
use crate::source::{FeedSource, RawRecord};
use crate::transport::http::HttpTransport;
use crate::types::SourceId;

/// Feed source retrieved over HTTP(S).
pub struct HttpFeedSource {
    source_id: SourceId,
    url: String,
    transport: HttpTransport,
}

impl HttpFeedSource {
    /// Create a source for `url` using a shared transport.
    pub fn new(source_id: impl Into<SourceId>, url: &str, transport: HttpTransport) -> Self {
        Self {
            source_id: source_id.into(),
            url: url.trim().to_string(),
            transport,
        }
    }

    /// URL requested on every fetch.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl FeedSource for HttpFeedSource {
    fn id(&self) -> &str {
        &self.source_id
    }

    fn fetch(&self) -> Result<Vec<RawRecord>, FeedError> {
        let bytes = self.transport.get_bytes(&self.source_id, &self.url)?;
        if looks_like_json(&bytes) {
            parse_json_records(&self.source_id, &bytes)
        } else {
            parse_feed(&self.source_id, &bytes)
        }
    }
}

/// Sniff the body: JSON documents open with `[` or `{`, XML with `<`.
fn looks_like_json(bytes: &[u8]) -> bool {
    bytes
        .iter()
        .find(|byte| !byte.is_ascii_whitespace())
        .is_some_and(|byte| matches!(byte, b'[' | b'{'))
}
