use crate::types::FieldName;

/// Constants used by record normalization and field alias probing.
pub mod normalizer {
    use super::FieldName;

    /// Sentinel title substituted when a record has no usable title.
    pub const NO_TITLE: &str = "No title";
    /// Field carrying the item title.
    pub const TITLE_FIELD: FieldName = "title";
    /// Field carrying the item link on raw feed entries.
    pub const LINK_FIELD: FieldName = "link";
    /// Summary aliases, probed in priority order.
    pub const SUMMARY_FIELDS: [FieldName; 3] = ["summary", "description", "content"];
    /// Publication timestamp aliases, probed in priority order.
    pub const PUBLISHED_FIELDS: [FieldName; 2] = ["published", "updated"];
    /// Accepted absolute link schemes.
    pub const LINK_SCHEMES: [&str; 2] = ["http://", "https://"];
    /// Candidate records scanned per accepted item when filling a per-source cap.
    pub const SCAN_FACTOR: usize = 2;
}

/// Constants used by the aggregation pipeline and run defaults.
pub mod pipeline {
    use super::FieldName;

    /// Link aliases accepted on pipeline input, probed in priority order.
    pub const LINK_FIELDS: [FieldName; 2] = ["link", "url"];
    /// Summary aliases accepted on pipeline input, probed in priority order.
    pub const SUMMARY_FIELDS: [FieldName; 2] = ["summary", "description"];
    /// Default summary length bound, in characters.
    pub const DEFAULT_SUMMARY_MAX_LENGTH: usize = 160;
    /// Default number of items emitted per run.
    pub const DEFAULT_MAX_ITEMS_PER_RUN: usize = 15;
    /// Default per-source accepted item cap.
    pub const DEFAULT_SOURCE_MAX_ITEMS: usize = 10;
    /// Marker appended to truncated summaries.
    pub const ELLIPSIS: &str = "...";
}

/// Constants used by topic search feed construction.
pub mod topics {
    /// Default per-topic item cap.
    pub const DEFAULT_MAX_ITEMS_PER_TOPIC: usize = 5;
    /// Search feed endpoint; the encoded topic is appended after `q=`.
    pub const SEARCH_FEED_BASE: &str = "https://news.google.com/rss/search?q=";
    /// Locale suffix appended to every search feed URL.
    pub const SEARCH_FEED_LOCALE: &str = "&hl=en-US&gl=US&ceid=US:en";
}

/// Constants used by the delivery collaborator and app runner.
pub mod delivery {
    /// Environment variable consulted for the webhook URL.
    pub const WEBHOOK_ENV: &str = "SLACK_WEBHOOK_URL";
    /// Required webhook URL prefix.
    pub const WEBHOOK_SCHEME: &str = "https://";
    /// Webhook request timeout, in seconds.
    pub const WEBHOOK_TIMEOUT_SECS: u64 = 30;
    /// Header prefix used when no explicit header title is configured.
    pub const DEFAULT_HEADER_PREFIX: &str = "Tech updates for";
    /// Summary preview width used by the dry-run report.
    pub const DRY_RUN_PREVIEW_CHARS: usize = 80;
    /// Default config path relative to the working directory.
    pub const DEFAULT_CONFIG_PATH: &str = "config/sources.toml";
    /// Default dry-run report path.
    pub const DEFAULT_DRY_RUN_OUTPUT: &str = "dry_run_output.txt";
}

/// Constants used by network and file transports.
pub mod transport {
    /// User agent sent with feed requests.
    pub const USER_AGENT: &str = concat!("feedsift/", env!("CARGO_PKG_VERSION"));
    /// Feed request timeout, in seconds.
    pub const FETCH_TIMEOUT_SECS: u64 = 20;
    /// File extensions parsed as JSON record lists; everything else is parsed as XML.
    pub const JSON_EXTENSIONS: [&str; 2] = ["json", "jsonl"];
    /// URL prefix mapped onto a local file path.
    pub const FILE_SCHEME: &str = "file://";
}
