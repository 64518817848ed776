//! Persistence for the most recent listing search
//!
//! The list command remembers its last filter and page so a follow-up
//! `vrd list --resume` (or a bare page flip) picks up where the user
//! left off. State lives in a small JSON file next to the data
//! directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;
use veranda_db::ListingFilter;

/// File name for the saved search, stored beside the data directory
pub const SAVED_SEARCH_FILE: &str = "saved_search.json";

/// The last search a user ran: the filter plus the page they were on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedSearch {
    /// Filter criteria from the previous invocation
    #[serde(default)]
    pub filter: ListingFilter,
    /// 1-based page the user was viewing
    #[serde(default = "default_page")]
    pub page: usize,
}

fn default_page() -> usize {
    1
}

impl Default for SavedSearch {
    fn default() -> Self {
        Self {
            filter: ListingFilter::default(),
            page: 1,
        }
    }
}

/// Resolve where the saved search lives for a given database path.
///
/// The file sits beside the data directory (for the default layout,
/// `.vrd/saved_search.json` next to `.vrd/data`). If the database path
/// has no parent the file goes inside it.
pub fn store_path(db_path: &Path) -> PathBuf {
    match db_path.parent() {
        Some(parent) if parent.as_os_str().is_empty() => db_path.join(SAVED_SEARCH_FILE),
        Some(parent) => parent.join(SAVED_SEARCH_FILE),
        None => db_path.join(SAVED_SEARCH_FILE),
    }
}

/// Load the saved search, if one exists and parses.
///
/// A missing or malformed file yields `None`; a stale search is never
/// worth failing a listing over.
pub fn load(path: &Path) -> Option<SavedSearch> {
    let contents = fs::read_to_string(path).ok()?;
    match serde_json::from_str(&contents) {
        Ok(saved) => Some(saved),
        Err(e) => {
            debug!("Ignoring unreadable saved search at {}: {}", path.display(), e);
            None
        }
    }
}

/// Persist the search state for the next invocation.
pub fn save(path: &Path, search: &SavedSearch) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(search)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    fs::write(path, json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use veranda_db::SortKey;

    fn temp_file(prefix: &str) -> PathBuf {
        env::temp_dir().join(format!(
            "{}-{}-{:?}-{}.json",
            prefix,
            std::process::id(),
            std::thread::current().id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ))
    }

    #[test]
    fn test_store_path_beside_data_dir() {
        let path = store_path(Path::new("/home/u/.vrd/data"));
        assert_eq!(path, PathBuf::from("/home/u/.vrd/saved_search.json"));
    }

    #[test]
    fn test_store_path_for_bare_directory() {
        let path = store_path(Path::new("data"));
        assert_eq!(path, PathBuf::from("data/saved_search.json"));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let path = temp_file("vrd-search-store-test");

        let search = SavedSearch {
            filter: ListingFilter::new()
                .with_location("Pune")
                .with_price_range("5000000-9000000")
                .with_sort(SortKey::PriceAscending),
            page: 3,
        };

        save(&path, &search).unwrap();
        let loaded = load(&path).unwrap();
        assert_eq!(loaded, search);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_file_is_none() {
        let path = temp_file("vrd-search-store-missing");
        assert!(load(&path).is_none());
    }

    #[test]
    fn test_load_malformed_file_is_none() {
        let path = temp_file("vrd-search-store-bad");
        fs::write(&path, "{not json").unwrap();

        assert!(load(&path).is_none());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let path = temp_file("vrd-search-store-partial");
        fs::write(&path, r#"{"filter": {"location": "Pune"}}"#).unwrap();

        let loaded = load(&path).unwrap();
        assert_eq!(loaded.filter.location.as_deref(), Some("Pune"));
        assert_eq!(loaded.page, 1);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_default_is_empty_first_page() {
        let saved = SavedSearch::default();
        assert!(saved.filter.is_empty());
        assert_eq!(saved.page, 1);
    }
}
