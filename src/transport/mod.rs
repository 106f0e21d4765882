/// Local filesystem reads for file-backed feeds.
pub mod fs;
/// Blocking HTTP retrieval for remote feeds.
pub mod http;
