/// Local file-backed feed source implementation.
pub mod file_source;
/// HTTP-backed feed source implementation.
pub mod http_source;
