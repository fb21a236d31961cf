//! Entry selection from the `entry` query value
//!
//! The raw value is parsed as a canonical decimal index and bounds-checked.
//! Anything that does not name an existing entry falls back to showing the
//! whole anthology.

use crate::document::EntryList;
use serde::Serialize;

/// Name of the query parameter that selects an entry.
pub const ENTRY_PARAM: &str = "entry";

/// Parse a canonical non-negative decimal index.
///
/// `"0"` and `"12"` parse; `"012"`, `"+1"`, `" 1"`, `"1.0"` and `""` do not.
pub fn parse_entry_index(raw: &str) -> Option<usize> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if raw.len() > 1 && raw.starts_with('0') {
        return None;
    }
    raw.parse().ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Single(usize),
    All,
}

impl Selection {
    /// Resolve the optional raw query value against `entries`.
    pub fn resolve(raw: Option<&str>, entries: &EntryList) -> Self {
        match raw.and_then(parse_entry_index) {
            Some(index) if index < entries.len() => Selection::Single(index),
            Some(index) => {
                log::debug!(
                    "Entry {} out of range ({} entries), showing all",
                    index,
                    entries.len()
                );
                Selection::All
            }
            None => Selection::All,
        }
    }

    /// Text to hand to the renderer.
    pub fn text(&self, entries: &EntryList) -> String {
        match self {
            Selection::Single(index) => entries
                .get(*index)
                .map(|entry| entry.as_str().to_string())
                .unwrap_or_else(|| entries.joined()),
            Selection::All => entries.joined(),
        }
    }
}

/// Navigation control that jumps to the most recent entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LastEntryLink {
    pub index: usize,
    pub href: String,
}

impl LastEntryLink {
    pub fn for_entries(entries: &EntryList) -> Option<Self> {
        entries.last_index().map(|index| Self {
            index,
            href: entry_href(index),
        })
    }
}

/// Shareable link for a single entry, `?entry=<index>`.
pub fn entry_href(index: usize) -> String {
    format!("?{}={}", ENTRY_PARAM, index)
}
