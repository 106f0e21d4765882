//! Aggregation pipeline: validation, dedup, summary shortening, and the
//! per-run output cap.
//!
//! The pipeline is a single synchronous pass. The set of seen dedup keys is
//! owned by one `Aggregator` value and dies with it, so two runs over the
//! same input always produce the same output.

use std::collections::HashSet;

use tracing::debug;

use crate::constants::normalizer::{NO_TITLE, TITLE_FIELD};
use crate::constants::pipeline::{LINK_FIELDS, SUMMARY_FIELDS};
use crate::data::OutputItem;
use crate::identity::canonicalize;
use crate::source::RecordView;
use crate::types::DedupKey;
use crate::utils::{has_http_scheme, shorten};

/// What happened to one offered item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Offer {
    /// The item was emitted.
    Emitted,
    /// No usable http(s) link (or no identity); dropped.
    Malformed,
    /// Same dedup key as an earlier item; dropped.
    Duplicate,
    /// The output cap was already reached; the item was not examined.
    Full,
}

/// Per-run drop counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AggregateStats {
    /// Items emitted.
    pub emitted: usize,
    /// Items dropped for a missing or non-http(s) link.
    pub malformed: usize,
    /// Items dropped as repeats of an earlier dedup key.
    pub duplicates: usize,
}

/// Stack-local accumulator for one pipeline run.
pub struct Aggregator {
    summary_max_length: usize,
    max_items: usize,
    seen: HashSet<DedupKey>,
    output: Vec<OutputItem>,
    stats: AggregateStats,
}

impl Aggregator {
    /// Start a run with the given summary bound and output cap.
    pub fn new(summary_max_length: usize, max_items: usize) -> Self {
        Self {
            summary_max_length,
            max_items,
            seen: HashSet::new(),
            output: Vec::new(),
            stats: AggregateStats::default(),
        }
    }

    /// True once `max_items` items have been emitted.
    pub fn is_full(&self) -> bool {
        self.output.len() >= self.max_items
    }

    /// Offer the next item in traversal order.
    pub fn offer<R: RecordView + ?Sized>(&mut self, item: &R) -> Offer {
        if self.is_full() {
            return Offer::Full;
        }
        let Some(link) = item
            .first_text(&LINK_FIELDS)
            .filter(|link| has_http_scheme(link))
        else {
            self.stats.malformed += 1;
            return Offer::Malformed;
        };

        let key = canonicalize(&link);
        if key.is_empty() {
            self.stats.malformed += 1;
            return Offer::Malformed;
        }
        if !self.seen.insert(key) {
            self.stats.duplicates += 1;
            return Offer::Duplicate;
        }

        let title = item
            .first_text(&[TITLE_FIELD])
            .unwrap_or_else(|| NO_TITLE.to_string());
        let raw_summary = item.first_text(&SUMMARY_FIELDS).unwrap_or_default();
        let summary = shorten(&raw_summary, self.summary_max_length);

        self.output.push(OutputItem {
            title,
            link,
            summary,
        });
        self.stats.emitted += 1;
        Offer::Emitted
    }

    /// Counters so far.
    pub fn stats(&self) -> AggregateStats {
        self.stats
    }

    /// Finish the run and return emitted items in first-seen order.
    pub fn finish(self) -> Vec<OutputItem> {
        self.output
    }
}

/// Run the pipeline over `items` in order.
///
/// Output preserves first-occurrence order, holds at most `max_items`
/// entries, never repeats a dedup key, and only carries http(s) links.
/// Scanning stops as soon as the cap is reached.
pub fn aggregate<R: RecordView>(
    items: &[R],
    summary_max_length: usize,
    max_items: usize,
) -> Vec<OutputItem> {
    let mut aggregator = Aggregator::new(summary_max_length, max_items);
    let mut examined = 0usize;
    for item in items {
        if aggregator.offer(item) == Offer::Full {
            break;
        }
        examined += 1;
    }
    let stats = aggregator.stats();
    debug!(
        offered = items.len(),
        examined,
        emitted = stats.emitted,
        malformed = stats.malformed,
        duplicates = stats.duplicates,
        "aggregated items"
    );
    aggregator.finish()
}
