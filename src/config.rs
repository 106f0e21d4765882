use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::pipeline::{
    DEFAULT_MAX_ITEMS_PER_RUN, DEFAULT_SOURCE_MAX_ITEMS, DEFAULT_SUMMARY_MAX_LENGTH,
};
use crate::constants::topics::DEFAULT_MAX_ITEMS_PER_TOPIC;
use crate::errors::FeedError;
use crate::types::Topic;

/// One configured feed source.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Feed location: `http(s)://` URL, `file://` URL, or a bare path.
    #[serde(default, alias = "link")]
    pub url: String,
    /// Optional display name; the URL is used when absent or blank.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Optional accepted-item cap for this source (default 10).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_items: Option<usize>,
}

impl SourceConfig {
    /// Create a config for `url` with default name and cap.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            name: None,
            max_items: None,
        }
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the per-source accepted-item cap.
    pub fn with_max_items(mut self, max_items: usize) -> Self {
        self.max_items = Some(max_items);
        self
    }

    /// Display label: the trimmed name when non-empty, otherwise the URL.
    pub fn label(&self) -> &str {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| self.url.trim())
    }

    /// Effective accepted-item cap.
    pub fn item_cap(&self) -> usize {
        self.max_items.unwrap_or(DEFAULT_SOURCE_MAX_ITEMS)
    }
}

/// Run-level configuration loaded by the app runner.
///
/// The core functions never read this; they take its values as parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Topics expanded into search feeds, in order, before explicit sources.
    pub topics: Vec<Topic>,
    /// Accepted-item cap for each topic feed.
    pub max_items_per_topic: usize,
    /// Explicit feed sources.
    pub sources: Vec<SourceConfig>,
    /// Site scrape targets. Accepted for compatibility; no scrapers exist.
    pub scrape_targets: Vec<toml::Value>,
    /// Summary length bound, in characters.
    pub summary_max_length: usize,
    /// Maximum number of items emitted per run.
    pub max_items_per_run: usize,
    /// Optional digest header; defaults to a dated title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_title: Option<String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            topics: Vec::new(),
            max_items_per_topic: DEFAULT_MAX_ITEMS_PER_TOPIC,
            sources: Vec::new(),
            scrape_targets: Vec::new(),
            summary_max_length: DEFAULT_SUMMARY_MAX_LENGTH,
            max_items_per_run: DEFAULT_MAX_ITEMS_PER_RUN,
            header_title: None,
        }
    }
}

impl RunConfig {
    /// Load a TOML config file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, FeedError> {
        if !path.exists() {
            tracing::info!(path = %path.display(), "config file not found; using defaults");
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path).map_err(|err| {
            FeedError::Configuration(format!("failed reading {}: {err}", path.display()))
        })?;
        Self::from_toml_str(&raw).map_err(|err| match err {
            FeedError::Configuration(reason) => {
                FeedError::Configuration(format!("{}: {reason}", path.display()))
            }
            other => other,
        })
    }

    /// Parse a TOML config document.
    pub fn from_toml_str(raw: &str) -> Result<Self, FeedError> {
        toml::from_str(raw).map_err(|err| FeedError::Configuration(err.to_string()))
    }

    /// Override the summary length bound.
    pub fn with_summary_max_length(mut self, summary_max_length: usize) -> Self {
        self.summary_max_length = summary_max_length;
        self
    }

    /// Override the per-run item cap.
    pub fn with_max_items_per_run(mut self, max_items_per_run: usize) -> Self {
        self.max_items_per_run = max_items_per_run;
        self
    }

    /// Add an explicit source.
    pub fn with_source(mut self, source: SourceConfig) -> Self {
        self.sources.push(source);
        self
    }

    /// Add a topic.
    pub fn with_topic(mut self, topic: impl Into<Topic>) -> Self {
        self.topics.push(topic.into());
        self
    }
}
