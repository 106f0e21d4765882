//! Outbound delivery: Slack Block Kit payloads, webhook posting, and the
//! plain-text dry-run report.
//!
//! Items arriving here already satisfy the pipeline's guarantees; the
//! http(s) link check is repeated anyway before anything is rendered.

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::blocking::Client;
use serde_json::{Value, json};

use crate::constants::delivery::{
    DEFAULT_HEADER_PREFIX, DRY_RUN_PREVIEW_CHARS, WEBHOOK_SCHEME, WEBHOOK_TIMEOUT_SECS,
};
use crate::constants::normalizer::NO_TITLE;
use crate::data::OutputItem;
use crate::errors::FeedError;
use crate::metrics::SourceShare;
use crate::utils::{has_http_scheme, preview};

/// Consumer of the pipeline's output list.
pub trait DeliverySink {
    /// Deliver `items`. An empty list is "nothing to deliver", not a failure.
    fn deliver(&self, items: &[OutputItem]) -> Result<(), FeedError>;
}

/// Build the Block Kit `blocks` array: header, divider, one section per item.
pub fn build_blocks(items: &[OutputItem], header_title: Option<&str>, today: NaiveDate) -> Vec<Value> {
    let header = header_title
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("{DEFAULT_HEADER_PREFIX} {}", today.format("%Y-%m-%d")));

    let mut blocks = vec![
        json!({
            "type": "header",
            "text": {"type": "plain_text", "text": header, "emoji": true},
        }),
        json!({"type": "divider"}),
    ];

    for item in items {
        let link = item.link.trim();
        if !has_http_scheme(link) {
            continue;
        }
        let title = match item.title.trim() {
            "" => NO_TITLE,
            title => title,
        };
        let summary = item.summary.trim();
        blocks.push(json!({
            "type": "section",
            "text": {
                "type": "mrkdwn",
                "text": format!("*<{link}|{title}>*\n{summary}\n<{link}|Read more>"),
            },
        }));
    }
    blocks
}

/// Slack incoming-webhook sink.
pub struct SlackWebhook {
    url: String,
    header_title: Option<String>,
    client: Client,
}

impl SlackWebhook {
    /// Create a sink for `url`, which must be an `https://` URL.
    pub fn new(url: &str, header_title: Option<String>) -> Result<Self, FeedError> {
        let url = url.trim();
        if !url.starts_with(WEBHOOK_SCHEME) {
            return Err(FeedError::Configuration(
                "webhook URL must start with https://".to_string(),
            ));
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(WEBHOOK_TIMEOUT_SECS))
            .build()
            .map_err(|err| FeedError::Delivery(format!("failed building webhook client: {err}")))?;
        Ok(Self {
            url: url.to_string(),
            header_title,
            client,
        })
    }

    /// Full JSON payload posted for `items`.
    pub fn payload(&self, items: &[OutputItem], today: NaiveDate) -> Value {
        json!({"blocks": build_blocks(items, self.header_title.as_deref(), today)})
    }
}

impl DeliverySink for SlackWebhook {
    fn deliver(&self, items: &[OutputItem]) -> Result<(), FeedError> {
        if items.is_empty() {
            tracing::info!("no items to deliver");
            return Ok(());
        }
        let payload = self.payload(items, chrono::Local::now().date_naive());
        let response = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .map_err(|err| FeedError::Delivery(format!("webhook request failed: {err}")))?;
        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Delivery(format!("webhook returned HTTP {status}")));
        }
        tracing::info!(items = items.len(), "delivered digest");
        Ok(())
    }
}

/// Render the dry-run report printed instead of delivering.
pub fn render_dry_run(fetched: usize, items: &[OutputItem], sources: &[SourceShare]) -> String {
    let mut lines = vec![format!(
        "Fetched {fetched} items, {} after dedup/summarize.",
        items.len()
    )];
    for share in sources {
        lines.push(format!(
            "  {}: {} ({:.0}%)",
            share.source,
            share.count,
            share.share * 100.0
        ));
    }
    for (idx, item) in items.iter().enumerate() {
        lines.push(format!("\n{}. {}", idx + 1, item.title));
        lines.push(format!("   {}", item.link));
        lines.push(format!("   {}", preview(&item.summary, DRY_RUN_PREVIEW_CHARS)));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(title: &str, link: &str, summary: &str) -> OutputItem {
        OutputItem {
            title: title.into(),
            link: link.into(),
            summary: summary.into(),
        }
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, 25).unwrap()
    }

    #[test]
    fn blocks_have_dated_header_divider_and_sections() {
        let items = vec![output("Post", "https://x.com/p", "Summary")];
        let blocks = build_blocks(&items, None, day());
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0]["type"], "header");
        assert_eq!(blocks[0]["text"]["text"], "Tech updates for 2025-02-25");
        assert_eq!(blocks[1]["type"], "divider");
        assert_eq!(
            blocks[2]["text"]["text"],
            "*<https://x.com/p|Post>*\nSummary\n<https://x.com/p|Read more>"
        );
    }

    #[test]
    fn blocks_recheck_links_and_titles() {
        let items = vec![
            output("Bad", "ftp://x.com/p", "s"),
            output("  ", "https://x.com/ok", ""),
        ];
        let blocks = build_blocks(&items, Some("Daily digest"), day());
        assert_eq!(blocks[0]["text"]["text"], "Daily digest");
        assert_eq!(blocks.len(), 3);
        assert_eq!(
            blocks[2]["text"]["text"],
            "*<https://x.com/ok|No title>*\n\n<https://x.com/ok|Read more>"
        );
    }

    #[test]
    fn webhook_requires_https() {
        assert!(matches!(
            SlackWebhook::new("http://hooks.example.com/x", None),
            Err(FeedError::Configuration(_))
        ));
        assert!(matches!(
            SlackWebhook::new("", None),
            Err(FeedError::Configuration(_))
        ));
    }

    #[test]
    fn empty_delivery_sends_nothing_and_succeeds() {
        // The host is unroutable; success proves no request was attempted.
        let sink = SlackWebhook::new("https://127.0.0.1:9/hook", None).unwrap();
        assert!(sink.deliver(&[]).is_ok());
    }

    #[test]
    fn payload_wraps_blocks() {
        let sink = SlackWebhook::new("https://hooks.example.com/x", Some("Hdr".into())).unwrap();
        let payload = sink.payload(&[output("P", "https://x.com/p", "")], day());
        assert_eq!(payload["blocks"].as_array().unwrap().len(), 3);
        assert_eq!(payload["blocks"][0]["text"]["text"], "Hdr");
    }

    #[test]
    fn dry_run_report_lists_items_with_previews() {
        let items = vec![output("Post", "https://x.com/p", &"y".repeat(100))];
        let shares = vec![SourceShare {
            source: "Blog".into(),
            count: 2,
            share: 1.0,
        }];
        let report = render_dry_run(2, &items, &shares);
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines[0], "Fetched 2 items, 1 after dedup/summarize.");
        assert_eq!(lines[1], "  Blog: 2 (100%)");
        assert_eq!(lines[3], "1. Post");
        assert_eq!(lines[4], "   https://x.com/p");
        assert_eq!(lines[5], format!("   {}...", "y".repeat(80)));
    }
}
