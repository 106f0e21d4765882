//! Text cleanup helpers shared by the normalizer, pipeline, and delivery.

use crate::constants::normalizer::LINK_SCHEMES;
use crate::constants::pipeline::ELLIPSIS;

/// Collapse runs of whitespace into single spaces and trim.
pub fn normalize_inline_whitespace<T: AsRef<str>>(text: T) -> String {
    let mut normalized = String::new();
    let mut seen_space = false;
    for ch in text.as_ref().chars() {
        if ch.is_whitespace() {
            if !seen_space {
                normalized.push(' ');
                seen_space = true;
            }
        } else {
            normalized.push(ch);
            seen_space = false;
        }
    }
    normalized.trim().to_string()
}

/// Replace every `<...>` span (at least one character between the brackets)
/// with a single space.
///
/// This is bracket matching, not HTML parsing: entities stay encoded and an
/// unclosed `<` is kept as text.
pub fn strip_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find('<') {
        let after = &rest[open + 1..];
        match after.find('>') {
            Some(close) if close > 0 => {
                out.push_str(&rest[..open]);
                out.push(' ');
                rest = &after[close + 1..];
            }
            // `<>` never matches; keep the `<` and rescan from the next char.
            Some(_) => {
                out.push_str(&rest[..=open]);
                rest = after;
            }
            None => break,
        }
    }
    out.push_str(rest);
    out
}

/// Strip markup, collapse whitespace, and bound the result to `max_length`
/// characters, appending `...` when the text had to be cut.
///
/// With `max_length < 3` a truncated result is just the marker.
pub fn shorten(text: &str, max_length: usize) -> String {
    if text.is_empty() {
        return String::new();
    }
    let cleaned = normalize_inline_whitespace(strip_markup(text));
    if cleaned.chars().count() <= max_length {
        return cleaned;
    }
    let keep = max_length.saturating_sub(ELLIPSIS.len());
    let prefix: String = cleaned.chars().take(keep).collect();
    format!("{}{ELLIPSIS}", prefix.trim_end())
}

/// True when `link` starts with `http://` or `https://` (case-sensitive).
pub fn has_http_scheme(link: &str) -> bool {
    LINK_SCHEMES.iter().any(|scheme| link.starts_with(scheme))
}

/// Cut `text` to `width` characters with a trailing `...`, without cleaning it.
pub(crate) fn preview(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let head: String = text.chars().take(width).collect();
        format!("{head}{ELLIPSIS}")
    } else {
        text.to_string()
    }
}
