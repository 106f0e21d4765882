#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// CLI runner used by the `feed_digest` binary.
pub mod app;
/// Run and source configuration types.
pub mod config;
/// Centralized constants: field aliases, sentinels, and defaults.
pub mod constants;
/// Canonical and output item types.
pub mod data;
/// Slack payloads, webhook delivery, and dry-run reports.
pub mod delivery;
/// Canonical dedup keys for links.
pub mod identity;
/// Per-source contribution reporting.
pub mod metrics;
/// Raw record normalization and multi-source collection.
pub mod normalize;
/// Validation, dedup, shortening, and capping of item streams.
pub mod pipeline;
/// Feed source traits, record views, and built-in sources.
pub mod source;
/// Topic to search-feed expansion.
pub mod topics;
/// Input transports used by sources (filesystem and HTTP).
pub mod transport;
/// Shared type aliases.
pub mod types;
/// Text cleanup and shortening helpers.
pub mod utils;

mod errors;

pub use config::{RunConfig, SourceConfig};
pub use data::{CanonicalItem, OutputItem};
pub use delivery::{DeliverySink, SlackWebhook};
pub use errors::FeedError;
pub use identity::canonicalize;
pub use normalize::{collect_sources, normalize, normalize_batch};
pub use pipeline::{AggregateStats, Aggregator, Offer, aggregate};
pub use source::{FeedSource, FieldValue, InMemorySource, RawRecord, RecordView};
pub use types::{DedupKey, Link, SourceId, Topic};
pub use utils::shorten;
