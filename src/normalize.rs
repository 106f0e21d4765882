//! Record normalization: raw feed entries into `CanonicalItem`s.
//!
//! Every function here is total. A record without a usable absolute link is
//! rejected (`None`); every other missing or odd field degrades to a default.

use tracing::{debug, info, warn};

use crate::config::SourceConfig;
use crate::constants::normalizer::{
    LINK_FIELD, NO_TITLE, PUBLISHED_FIELDS, SCAN_FACTOR, SUMMARY_FIELDS, TITLE_FIELD,
};
use crate::data::CanonicalItem;
use crate::errors::FeedError;
use crate::source::{RawRecord, RecordView};
use crate::utils::has_http_scheme;

/// Normalize one record, or reject it when it has no http(s) link.
///
/// `source_name` labels the item; when blank, the item's own link is used.
pub fn normalize<R: RecordView + ?Sized>(record: &R, source_name: &str) -> Option<CanonicalItem> {
    let link = record.first_text(&[LINK_FIELD])?;
    if !has_http_scheme(&link) {
        return None;
    }

    let title = record
        .first_text(&[TITLE_FIELD])
        .unwrap_or_else(|| NO_TITLE.to_string());
    let summary = record.first_text(&SUMMARY_FIELDS).unwrap_or_default();
    let published = record.first_text(&PUBLISHED_FIELDS).unwrap_or_default();
    let source = match source_name.trim() {
        "" => link.clone(),
        name => name.to_string(),
    };

    Some(CanonicalItem {
        title,
        link,
        published,
        summary,
        source,
    })
}

/// Normalize records from one source, keeping at most `max_items` accepted
/// items in original order.
///
/// At most `2 * max_items` candidates are examined, so a source where up to
/// half the entries are malformed still fills its cap.
pub fn normalize_batch<R: RecordView>(
    records: &[R],
    source_name: &str,
    max_items: usize,
) -> Vec<CanonicalItem> {
    let scan_limit = max_items.saturating_mul(SCAN_FACTOR);
    let mut items = Vec::with_capacity(max_items.min(records.len()));
    let mut rejected = 0usize;
    for record in records.iter().take(scan_limit) {
        if items.len() >= max_items {
            break;
        }
        match normalize(record, source_name) {
            Some(item) => items.push(item),
            None => rejected += 1,
        }
    }
    debug!(
        source = source_name,
        offered = records.len(),
        accepted = items.len(),
        rejected,
        "normalized source batch"
    );
    items
}

/// Fetch and normalize every configured source, concatenating results in
/// source order and, within a source, in feed order.
///
/// Sources with a blank URL are skipped. A source whose fetch fails
/// contributes nothing; the failure is logged and the run continues.
pub fn collect_sources<F>(configs: &[SourceConfig], mut fetch: F) -> Vec<CanonicalItem>
where
    F: FnMut(&SourceConfig) -> Result<Vec<RawRecord>, FeedError>,
{
    let mut all_items = Vec::new();
    for config in configs {
        if config.url.trim().is_empty() {
            debug!(name = ?config.name, "skipping source without url");
            continue;
        }
        let label = config.label();
        match fetch(config) {
            Ok(records) => {
                let items = normalize_batch(&records, label, config.item_cap());
                info!(
                    source = label,
                    fetched = records.len(),
                    kept = items.len(),
                    "collected source"
                );
                all_items.extend(items);
            }
            Err(err) => {
                warn!(source = label, error = %err, "source fetch failed; skipping");
            }
        }
    }
    all_items
}
