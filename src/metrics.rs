use indexmap::IndexMap;

use crate::data::CanonicalItem;
use crate::types::SourceId;

/// Per-source share of the collected items for run reporting.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceShare {
    /// Source display name.
    pub source: SourceId,
    /// Items this source contributed.
    pub count: usize,
    /// Fraction of all collected items, in `0.0..=1.0`.
    pub share: f64,
}

/// Count collected items per source, in first-seen source order.
///
/// Upstream order decides which duplicate survives and what the cap cuts, so
/// this is the quickest way to see which source dominates a run.
pub fn source_contributions(items: &[CanonicalItem]) -> Vec<SourceShare> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for item in items {
        *counts.entry(item.source.as_str()).or_insert(0) += 1;
    }
    let total = items.len();
    counts
        .into_iter()
        .map(|(source, count)| SourceShare {
            source: source.to_string(),
            count,
            share: if total == 0 {
                0.0
            } else {
                count as f64 / total as f64
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(source: &str, idx: usize) -> CanonicalItem {
        CanonicalItem {
            title: format!("t{idx}"),
            link: format!("https://x.com/{idx}"),
            published: String::new(),
            summary: String::new(),
            source: source.to_string(),
        }
    }

    #[test]
    fn contributions_keep_first_seen_order() {
        let items = vec![item("B", 0), item("A", 1), item("B", 2), item("B", 3)];
        let shares = source_contributions(&items);
        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0].source, "B");
        assert_eq!(shares[0].count, 3);
        assert!((shares[0].share - 0.75).abs() < 1e-9);
        assert_eq!(shares[1].source, "A");
        assert!((shares[1].share - 0.25).abs() < 1e-9);
    }

    #[test]
    fn contributions_of_nothing_are_empty() {
        assert!(source_contributions(&[]).is_empty());
    }
}
