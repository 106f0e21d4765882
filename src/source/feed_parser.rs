//! RSS 2.0 / Atom / JSON document parsing into raw records.
//!
//! Parsing only lifts entries into `RawRecord`s. No field is required here;
//! validation belongs to the normalizer.

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use serde_json::Value;

use super::record_view::{FieldValue, RawRecord};
use crate::errors::FeedError;

/// Entry element names (RSS `item`, Atom `entry`).
const ENTRY_ELEMENTS: [&str; 2] = ["item", "entry"];

/// Parse an RSS or Atom document into raw records, in document order.
pub fn parse_feed(source_id: &str, xml: &[u8]) -> Result<Vec<RawRecord>, FeedError> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(false);

    let mut records = Vec::new();
    let mut buf = Vec::new();
    let mut entry: Option<EntryBuilder> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let name = element_name(&e);
                match entry.as_mut() {
                    Some(builder) => builder.open(&name, &e),
                    None if ENTRY_ELEMENTS.contains(&name.as_str()) => {
                        entry = Some(EntryBuilder::default());
                    }
                    None => {}
                }
            }
            Ok(Event::Empty(e)) => {
                if let Some(builder) = entry.as_mut() {
                    let name = element_name(&e);
                    builder.open(&name, &e);
                    builder.close();
                }
            }
            Ok(Event::End(e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                let closes_entry = entry.as_ref().is_some_and(|builder| builder.depth == 0)
                    && ENTRY_ELEMENTS.contains(&name.as_str());
                if closes_entry {
                    if let Some(builder) = entry.take() {
                        records.push(builder.build());
                    }
                } else if let Some(builder) = entry.as_mut() {
                    builder.close();
                }
            }
            Ok(Event::Text(e)) => {
                if let Some(builder) = entry.as_mut() {
                    let text = e
                        .unescape()
                        .map(|text| text.into_owned())
                        .unwrap_or_else(|_| String::from_utf8_lossy(&e).into_owned());
                    builder.push_text(&text);
                }
            }
            Ok(Event::CData(e)) => {
                if let Some(builder) = entry.as_mut() {
                    builder.push_text(&String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Ok(Event::Eof) => break,
            Err(err) => {
                return Err(FeedError::SourceInconsistent {
                    source_id: source_id.to_string(),
                    details: format!(
                        "XML parse error at byte {}: {err}",
                        reader.buffer_position()
                    ),
                });
            }
            _ => {}
        }
        buf.clear();
    }

    tracing::debug!(source_id, entries = records.len(), "parsed feed document");
    Ok(records)
}

/// Parse a JSON document into raw records.
///
/// Accepts an array of objects, an object carrying an `items` or `entries`
/// array, a single object, or newline-delimited objects. Non-object entries
/// are skipped.
pub fn parse_json_records(source_id: &str, bytes: &[u8]) -> Result<Vec<RawRecord>, FeedError> {
    let values = match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Array(values)) => values,
        Ok(Value::Object(mut object)) => match ["items", "entries"]
            .iter()
            .find_map(|key| match object.remove(*key) {
                Some(Value::Array(values)) => Some(values),
                _ => None,
            }) {
            Some(values) => values,
            None => vec![Value::Object(object)],
        },
        Ok(_) => Vec::new(),
        Err(_) => parse_json_lines(source_id, bytes)?,
    };

    Ok(values
        .iter()
        .filter_map(Value::as_object)
        .map(RawRecord::from_json_object)
        .collect())
}

fn parse_json_lines(source_id: &str, bytes: &[u8]) -> Result<Vec<Value>, FeedError> {
    let text = String::from_utf8_lossy(bytes);
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            serde_json::from_str::<Value>(line.trim()).map_err(|err| {
                FeedError::SourceInconsistent {
                    source_id: source_id.to_string(),
                    details: format!("invalid JSON on line {}: {err}", idx + 1),
                }
            })
        })
        .collect()
}

fn element_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.name().as_ref()).to_string()
}

/// How a direct child of an entry maps onto a raw field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FieldKind {
    /// Stored as plain text under the given name.
    Text(&'static str),
    /// Stored as a value-holder under the given name.
    Wrapped(&'static str),
}

fn field_kind(element: &str) -> Option<FieldKind> {
    let kind = match element {
        "title" => FieldKind::Text("title"),
        "link" => FieldKind::Text("link"),
        "description" => FieldKind::Text("description"),
        "summary" => FieldKind::Wrapped("summary"),
        "content" | "content:encoded" => FieldKind::Wrapped("content"),
        "published" | "pubDate" | "dc:date" => FieldKind::Text("published"),
        "updated" => FieldKind::Text("updated"),
        _ => return None,
    };
    Some(kind)
}

#[derive(Default)]
struct EntryBuilder {
    record: RawRecord,
    /// Element depth below the entry element.
    depth: usize,
    /// Field being collected while inside a direct child.
    current: Option<FieldKind>,
    text: String,
}

impl EntryBuilder {
    fn open(&mut self, name: &str, e: &BytesStart<'_>) {
        self.depth += 1;
        if self.depth != 1 {
            return;
        }
        self.current = field_kind(name);
        self.text.clear();
        if name == "link" {
            self.take_link_href(e);
        }
    }

    fn close(&mut self) {
        if self.depth == 1
            && let Some(kind) = self.current.take()
        {
            let text = std::mem::take(&mut self.text);
            self.store(kind, text);
        }
        self.depth = self.depth.saturating_sub(1);
    }

    fn push_text(&mut self, text: &str) {
        if self.current.is_some() {
            self.text.push_str(text);
        }
    }

    /// Atom links carry the URL in `href`; only `alternate` (or unlabelled)
    /// links name the entry itself.
    fn take_link_href(&mut self, e: &BytesStart<'_>) {
        let mut href = None;
        let mut rel = None;
        for attr in e.attributes().flatten() {
            let value = attr
                .unescape_value()
                .map(|value| value.into_owned())
                .unwrap_or_default();
            match attr.key.as_ref() {
                b"href" => href = Some(value),
                b"rel" => rel = Some(value),
                _ => {}
            }
        }
        if let Some(href) = href
            && rel.as_deref().is_none_or(|rel| rel == "alternate")
            && !self.record.has_field("link")
        {
            self.record.push("link", FieldValue::Text(href));
            // The element body (usually empty) must not add a second link.
            self.current = None;
        }
    }

    fn store(&mut self, kind: FieldKind, text: String) {
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        let text = text.to_string();
        match kind {
            FieldKind::Text(name) => {
                if !self.record.has_field(name) {
                    self.record.push(name, FieldValue::Text(text));
                }
            }
            FieldKind::Wrapped(name) => {
                if !self.record.has_field(name) {
                    self.record.push(name, FieldValue::Wrapped(text));
                }
            }
        }
    }

    fn build(self) -> RawRecord {
        self.record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::record_view::RecordView;

    const RSS: &str = r#"<?xml version="1.0"?>
<rss version="2.0" xmlns:content="http://purl.org/rss/1.0/modules/content/">
  <channel>
    <title>Channel title is not an item</title>
    <link>https://channel.example.com/</link>
    <item>
      <title>Rust 1.84 &amp; friends</title>
      <link>https://blog.example.com/rust-1-84</link>
      <description><![CDATA[<p>Release <b>notes</b></p>]]></description>
      <pubDate>Thu, 09 Jan 2025 00:00:00 GMT</pubDate>
      <guid>https://blog.example.com/rust-1-84</guid>
    </item>
    <item>
      <title>No link here</title>
      <content:encoded><![CDATA[<div>Body</div>]]></content:encoded>
    </item>
  </channel>
</rss>"#;

    const ATOM: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Atom feed</title>
  <entry>
    <title type="html">Atom entry</title>
    <link rel="self" href="https://example.com/self.xml"/>
    <link rel="alternate" href="https://example.com/posts/1"/>
    <updated>2025-01-02T03:04:05Z</updated>
    <summary>Short summary</summary>
    <content type="xhtml"><div xmlns="http://www.w3.org/1999/xhtml"><p>Rich</p></div></content>
  </entry>
  <entry>
    <title>Second</title>
    <link href="https://example.com/posts/2"/>
  </entry>
</feed>"#;

    #[test]
    fn parses_rss_items_in_document_order() {
        let records = parse_feed("rss", RSS.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(first.text_or_empty("title"), "Rust 1.84 & friends");
        assert_eq!(
            first.text_or_empty("link"),
            "https://blog.example.com/rust-1-84"
        );
        assert_eq!(
            first.text_or_empty("description"),
            "<p>Release <b>notes</b></p>"
        );
        assert_eq!(
            first.text_or_empty("published"),
            "Thu, 09 Jan 2025 00:00:00 GMT"
        );

        let second = &records[1];
        assert!(!second.has_field("link"));
        assert_eq!(
            second.field("content"),
            Some(FieldValue::Wrapped("<div>Body</div>".into()))
        );
    }

    #[test]
    fn parses_atom_entries_and_prefers_alternate_links() {
        let records = parse_feed("atom", ATOM.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(first.text_or_empty("link"), "https://example.com/posts/1");
        assert_eq!(first.text_or_empty("updated"), "2025-01-02T03:04:05Z");
        assert_eq!(
            first.field("summary"),
            Some(FieldValue::Wrapped("Short summary".into()))
        );
        assert_eq!(
            first.field("content"),
            Some(FieldValue::Wrapped("Rich".into()))
        );
        assert_eq!(
            records[1].text_or_empty("link"),
            "https://example.com/posts/2"
        );
    }

    #[test]
    fn xhtml_content_keeps_spaces_between_inline_elements() {
        let atom = r#"<feed xmlns="http://www.w3.org/2005/Atom"><entry>
  <link href="https://x.com/1"/>
  <content type="xhtml"><div><p>Hello <b>big</b> world</p></div></content>
</entry></feed>"#;
        let records = parse_feed("xhtml", atom.as_bytes()).unwrap();
        assert_eq!(
            records[0].field("content"),
            Some(FieldValue::Wrapped("Hello big world".into()))
        );

        let items = crate::normalize::normalize_batch(&records, "xhtml", 10);
        let output = crate::pipeline::aggregate(&items, 160, 15);
        assert_eq!(output[0].summary, "Hello big world");
    }

    #[test]
    fn mismatched_tags_are_reported() {
        let broken = "<rss><channel><item><title>x</title></channel></rss>";
        let err = parse_feed("broken", broken.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            FeedError::SourceInconsistent { ref source_id, .. } if source_id == "broken"
        ));
    }

    #[test]
    fn documents_without_entries_yield_nothing() {
        let records = parse_feed("empty", b"<rss><channel><title>t</title></channel></rss>")
            .unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn parses_json_arrays_wrappers_and_lines() {
        let array = br#"[{"title": "A", "link": "https://x.com/a"}, 5, {"url": "https://x.com/b"}]"#;
        let records = parse_json_records("json", array).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].text_or_empty("url"), "https://x.com/b");

        let wrapped = br#"{"title": "feed", "entries": [{"title": "E"}]}"#;
        let records = parse_json_records("json", wrapped).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].text_or_empty("title"), "E");

        let lines = b"{\"title\": \"L1\"}\n\n{\"title\": \"L2\"}\n";
        let records = parse_json_records("jsonl", lines).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn invalid_json_lines_are_reported() {
        let err = parse_json_records("jsonl", b"{\"title\": 1}\nnot json\n").unwrap_err();
        assert!(matches!(err, FeedError::SourceInconsistent { .. }));
    }
}
