use crate::config::SourceConfig;
use crate::constants::topics::{SEARCH_FEED_BASE, SEARCH_FEED_LOCALE};

/// Build a search-feed source for `topic`.
///
/// The topic is form-encoded (spaces become `+`) and also used, trimmed, as
/// the source's display name.
pub fn topic_to_source(topic: &str, max_items: usize) -> SourceConfig {
    let topic = topic.trim();
    let query = urlencoding::encode(topic).replace("%20", "+");
    SourceConfig::new(format!("{SEARCH_FEED_BASE}{query}{SEARCH_FEED_LOCALE}"))
        .with_name(topic)
        .with_max_items(max_items)
}

/// Expand topics into sources, skipping blank topics and keeping order.
pub fn topics_to_sources<S: AsRef<str>>(topics: &[S], max_items: usize) -> Vec<SourceConfig> {
    topics
        .iter()
        .map(|topic| topic.as_ref())
        .filter(|topic| !topic.trim().is_empty())
        .map(|topic| topic_to_source(topic, max_items))
        .collect()
}
