use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::{Parser, error::ErrorKind};
use tracing::{info, warn};

use crate::config::{RunConfig, SourceConfig};
use crate::constants::delivery::{DEFAULT_CONFIG_PATH, DEFAULT_DRY_RUN_OUTPUT, WEBHOOK_ENV};
use crate::data::OutputItem;
use crate::delivery::{DeliverySink, SlackWebhook, render_dry_run};
use crate::errors::FeedError;
use crate::metrics::source_contributions;
use crate::normalize::collect_sources;
use crate::pipeline::aggregate;
use crate::source::{FeedSource, source_for};
use crate::topics::topics_to_sources;
use crate::transport::http::HttpTransport;

#[derive(Debug, Parser)]
#[command(
    name = "feed_digest",
    disable_help_subcommand = true,
    about = "Collect feeds into a short, deduplicated digest",
    long_about = "Fetch configured topics and feeds, normalize and deduplicate their items, shorten summaries, and deliver a capped digest to a Slack webhook (or print it with --dry-run).",
    after_help = "The webhook URL is read from --webhook-url or the SLACK_WEBHOOK_URL environment variable."
)]
/// CLI for `feed_digest`.
///
/// Common usage:
/// - Preview without sending: `feed_digest --dry-run`
/// - Use another config: `--config /etc/feedsift/sources.toml`
/// - Override run knobs: `--max-items 5 --summary-max-length 120`
struct DigestCli {
    #[arg(
        long,
        value_name = "PATH",
        default_value = DEFAULT_CONFIG_PATH,
        help = "TOML config listing topics and sources"
    )]
    config: PathBuf,
    #[arg(long = "dry-run", help = "Print the digest instead of delivering it")]
    dry_run: bool,
    #[arg(
        long = "dry-run-output",
        value_name = "PATH",
        default_value = DEFAULT_DRY_RUN_OUTPUT,
        help = "File the dry-run report is also written to"
    )]
    dry_run_output: PathBuf,
    #[arg(
        long = "webhook-url",
        value_name = "URL",
        env = WEBHOOK_ENV,
        hide_env_values = true,
        help = "Slack incoming webhook URL"
    )]
    webhook_url: Option<String>,
    #[arg(
        long = "summary-max-length",
        value_name = "CHARS",
        help = "Override the configured summary length bound"
    )]
    summary_max_length: Option<usize>,
    #[arg(
        long = "max-items",
        value_name = "COUNT",
        help = "Override the configured per-run item cap"
    )]
    max_items: Option<usize>,
}

/// Topic feeds first, then explicit sources, in configured order.
pub fn planned_sources(config: &RunConfig) -> Vec<SourceConfig> {
    let mut sources = topics_to_sources(&config.topics, config.max_items_per_topic);
    sources.extend(config.sources.iter().cloned());
    sources
}

/// Run one digest pass.
///
/// Returns `Ok(true)` when the digest was delivered, printed, or there was
/// nothing to send, and `Ok(false)` when delivery failed. Help/version
/// requests return `Ok(true)` after printing.
pub fn run_digest<I>(args_iter: I) -> Result<bool, Box<dyn Error>>
where
    I: Iterator<Item = String>,
{
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();

    let Some(cli) = parse_cli::<DigestCli, _>(
        std::iter::once("feed_digest".to_string()).chain(args_iter),
    )?
    else {
        return Ok(true);
    };

    let mut config = RunConfig::load(&cli.config)?;
    if let Some(summary_max_length) = cli.summary_max_length {
        config = config.with_summary_max_length(summary_max_length);
    }
    if let Some(max_items) = cli.max_items {
        config = config.with_max_items_per_run(max_items);
    }
    if !config.scrape_targets.is_empty() {
        warn!(
            targets = config.scrape_targets.len(),
            "scrape targets are configured but no scrapers are available"
        );
    }

    let transport = HttpTransport::new()?;
    let sources = planned_sources(&config);
    info!(sources = sources.len(), "collecting sources");
    let collected = collect_sources(&sources, |source| source_for(source, &transport).fetch());
    let items = aggregate(
        &collected,
        config.summary_max_length,
        config.max_items_per_run,
    );

    if cli.dry_run {
        let report = render_dry_run(collected.len(), &items, &source_contributions(&collected));
        println!("{report}");
        fs::write(&cli.dry_run_output, &report).map_err(FeedError::from)?;
        println!("\n(Wrote {})", cli.dry_run_output.display());
        return Ok(true);
    }

    let Some(webhook_url) = cli.webhook_url.filter(|url| !url.trim().is_empty()) else {
        warn!("no webhook URL configured; nothing delivered");
        return Ok(false);
    };
    let sink = match SlackWebhook::new(&webhook_url, config.header_title.clone()) {
        Ok(sink) => sink,
        Err(err) => {
            warn!(error = %err, "webhook rejected");
            return Ok(false);
        }
    };
    Ok(deliver_reporting(&sink, &items))
}

/// Deliver through `sink`, logging failure instead of propagating it.
pub fn deliver_reporting(sink: &dyn DeliverySink, items: &[OutputItem]) -> bool {
    match sink.deliver(items) {
        Ok(()) => true,
        Err(err) => {
            warn!(error = %err, "delivery failed");
            false
        }
    }
}

fn parse_cli<T, I>(args: I) -> Result<Option<T>, Box<dyn Error>>
where
    T: Parser,
    I: IntoIterator<Item = String>,
{
    match T::try_parse_from(args) {
        Ok(cli) => Ok(Some(cli)),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                err.print()?;
                Ok(None)
            }
            _ => Err(Box::new(FeedError::Configuration(err.to_string()))),
        },
    }
}
