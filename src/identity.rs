//! Canonical identity for links.
//!
//! Normalization is shallow: fragment removal, one trailing slash, and
//! lower-casing of the host. Paths, query strings, and ports are
//! kept exactly as given, so links that differ only by tracking parameters
//! stay distinct.

use crate::types::DedupKey;
use crate::utils::has_http_scheme;

/// Compute the dedup key for `link`.
///
/// Returns an empty key when `link` is not an absolute http(s) URL after
/// trimming. An empty key means "no identity" and must never be treated as a
/// duplicate of another empty key.
pub fn canonicalize(link: &str) -> DedupKey {
    let trimmed = link.trim();
    if !has_http_scheme(trimmed) {
        return DedupKey::new();
    }
    let without_fragment = match trimmed.find('#') {
        Some(pos) => &trimmed[..pos],
        None => trimmed,
    };
    let without_slash = without_fragment
        .strip_suffix('/')
        .unwrap_or(without_fragment);
    lowercase_host(without_slash)
}

/// Lower-case the host portion (between `://` and the first `/` or `?`),
/// leaving userinfo, path, and query untouched.
fn lowercase_host(url: &str) -> String {
    let Some(scheme_end) = url.find("://") else {
        return url.to_string();
    };
    let authority_start = scheme_end + 3;
    let authority_len = url[authority_start..]
        .find(['/', '?'])
        .unwrap_or(url.len() - authority_start);
    let authority_end = authority_start + authority_len;
    let authority = &url[authority_start..authority_end];
    let host_start = authority.rfind('@').map(|pos| pos + 1).unwrap_or(0);

    let mut key = String::with_capacity(url.len());
    key.push_str(&url[..authority_start]);
    key.push_str(&authority[..host_start]);
    key.push_str(&authority[host_start..].to_ascii_lowercase());
    key.push_str(&url[authority_end..]);
    key
}
