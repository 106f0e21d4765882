/// Identifier for the source that produced an item (display name or URL).
/// Examples: `rust`, `Hacker News`, `https://blog.rust-lang.org/feed.xml`
pub type SourceId = String;
/// Absolute http(s) link carried by an item.
/// Example: `https://blog.rust-lang.org/2025/01/09/Rust-1.84.0.html`
pub type Link = String;
/// Canonical identity string derived from a link; empty means "no identity".
/// Example: `https://blog.rust-lang.org/2025/01/09/Rust-1.84.0.html`
pub type DedupKey = String;
/// Logical field name probed on a raw record.
/// Examples: `title`, `link`, `summary`, `updated`
pub type FieldName = &'static str;
/// Topic name turned into a search feed.
/// Examples: `rust`, `webassembly`
pub type Topic = String;
