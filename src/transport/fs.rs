use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::transport::{FILE_SCHEME, JSON_EXTENSIONS};
use crate::errors::FeedError;

/// Resolve a `file://` URL or bare path into a filesystem path.
pub fn path_from_location(location: &str) -> PathBuf {
    let trimmed = location.trim();
    PathBuf::from(trimmed.strip_prefix(FILE_SCHEME).unwrap_or(trimmed))
}

/// True if the path has a JSON extension (case-insensitive).
pub fn is_json_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            JSON_EXTENSIONS
                .iter()
                .any(|json| ext.eq_ignore_ascii_case(json))
        })
        .unwrap_or(false)
}

/// Read a whole feed document, reporting failures against `source_id`.
pub fn read_document(source_id: &str, path: &Path) -> Result<Vec<u8>, FeedError> {
    fs::read(path).map_err(|err| FeedError::SourceUnavailable {
        source_id: source_id.to_string(),
        reason: format!("failed reading {}: {err}", path.display()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn path_from_location_strips_file_scheme() {
        assert_eq!(
            path_from_location("file:///tmp/feed.xml"),
            PathBuf::from("/tmp/feed.xml")
        );
        assert_eq!(
            path_from_location(" feeds/local.rss "),
            PathBuf::from("feeds/local.rss")
        );
    }

    #[test]
    fn is_json_file_matches_extensions_case_insensitively() {
        assert!(is_json_file(Path::new("items.json")));
        assert!(is_json_file(Path::new("items.JSONL")));
        assert!(!is_json_file(Path::new("feed.xml")));
        assert!(!is_json_file(Path::new("no_extension")));
    }

    #[test]
    fn read_document_reports_missing_files_as_unavailable() {
        let temp = tempdir().unwrap();
        let missing = temp.path().join("missing.xml");
        let err = read_document("local", &missing).unwrap_err();
        assert!(matches!(
            err,
            FeedError::SourceUnavailable { ref source_id, .. } if source_id == "local"
        ));

        let present = temp.path().join("present.xml");
        fs::write(&present, b"<rss/>").unwrap();
        assert_eq!(read_document("local", &present).unwrap(), b"<rss/>");
    }
}
