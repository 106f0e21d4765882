use std::fs;

use feedsift::metrics::source_contributions;
use feedsift::source::sources::file_source::FileFeedSource;
use feedsift::{
    FeedError, FeedSource, InMemorySource, RawRecord, SourceConfig, aggregate, collect_sources,
};

fn entry(title: &str, link: &str) -> RawRecord {
    RawRecord::new()
        .with_text("title", title)
        .with_text("link", link)
        .with_wrapped("content", format!("<p>About {title}</p>"))
}

#[test]
fn sources_are_concatenated_in_config_order_and_failures_skipped() {
    let alpha = InMemorySource::new(
        "alpha",
        vec![
            entry("A1", "https://a.example.com/1"),
            entry("A2", "https://shared.example.com/post"),
        ],
    );
    let beta = InMemorySource::new(
        "beta",
        vec![
            entry("B1", "https://shared.example.com/post/"),
            entry("B2", "https://b.example.com/2"),
        ],
    );
    let configs = vec![
        SourceConfig::new("mem://alpha").with_name("Alpha"),
        SourceConfig::new("mem://broken").with_name("Broken"),
        SourceConfig::new("   "),
        SourceConfig::new("mem://beta").with_name("Beta"),
    ];

    let collected = collect_sources(&configs, |config| match config.url.as_str() {
        "mem://alpha" => alpha.fetch(),
        "mem://beta" => beta.fetch(),
        other => Err(FeedError::SourceUnavailable {
            source_id: other.to_string(),
            reason: "connection refused".into(),
        }),
    });

    let titles: Vec<&str> = collected.iter().map(|item| item.title.as_str()).collect();
    assert_eq!(titles, vec!["A1", "A2", "B1", "B2"]);
    assert_eq!(collected[0].source, "Alpha");
    assert_eq!(collected[0].summary, "<p>About A1</p>");

    let shares = source_contributions(&collected);
    assert_eq!(shares.len(), 2);
    assert_eq!(shares[0].source, "Alpha");
    assert_eq!(shares[1].count, 2);

    let output = aggregate(&collected, 160, 15);
    let titles: Vec<&str> = output.iter().map(|item| item.title.as_str()).collect();
    assert_eq!(titles, vec!["A1", "A2", "B2"]);
    assert_eq!(output[0].summary, "About A1");
}

#[test]
fn per_source_cap_applies_before_the_run_cap() {
    let records: Vec<RawRecord> = (0..8)
        .map(|idx| entry(&format!("P{idx}"), &format!("https://p.example.com/{idx}")))
        .collect();
    let source = InMemorySource::new("prolific", records);
    let configs = vec![SourceConfig::new("mem://prolific").with_max_items(3)];

    let collected = collect_sources(&configs, |_| source.fetch());
    assert_eq!(collected.len(), 3);
    assert_eq!(aggregate(&collected, 160, 2).len(), 2);
}

#[test]
fn file_feeds_flow_through_the_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("atom.xml");
    fs::write(
        &path,
        r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Example</title>
  <entry>
    <title>First &amp; best</title>
    <link rel="alternate" href="https://atom.example.com/first"/>
    <updated>2025-02-20T10:00:00Z</updated>
    <summary>Short   summary</summary>
  </entry>
  <entry>
    <title>No link</title>
    <summary>dropped</summary>
  </entry>
</feed>"#,
    )
    .unwrap();

    let location = path.display().to_string();
    let source = FileFeedSource::new("atom", &location);
    let configs = vec![SourceConfig::new(location.clone()).with_name("Atom")];
    let collected = collect_sources(&configs, |_| source.fetch());
    assert_eq!(collected.len(), 1);
    assert_eq!(collected[0].title, "First & best");
    assert_eq!(collected[0].published, "2025-02-20T10:00:00Z");

    let output = aggregate(&collected, 160, 15);
    assert_eq!(output.len(), 1);
    assert_eq!(output[0].summary, "Short summary");
}
