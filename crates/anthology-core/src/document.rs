//! Normalization and segmentation of an anthology document
//!
//! A document is plain text where every entry starts with the marker
//! character `●` (U+25CF). Soft-wrapped lines inside a paragraph are joined
//! with a space before the text is split; blank lines survive untouched.

use crate::errors::LoadError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;

/// Entry boundary sentinel.
pub const MARKER: char = '\u{25CF}';

/// Separator placed between entries when the whole list is shown.
pub const ENTRY_SEPARATOR: &str = "\n\n";

static NEWLINE_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:\r*\n)+").expect("valid newline pattern"));

/// One marker-delimited narrative unit. Never empty, never padded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Entry(String);

impl Entry {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First `max_chars` characters on a single line, with an ellipsis when cut.
    pub fn preview(&self, max_chars: usize) -> String {
        let flat: String = self
            .0
            .chars()
            .map(|c| if c == '\n' { ' ' } else { c })
            .collect();
        if flat.chars().count() <= max_chars {
            return flat;
        }
        let mut cut: String = flat.chars().take(max_chars).collect();
        cut.push('…');
        cut
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Entry {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Entries in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EntryList(Vec<Entry>);

impl EntryList {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.0.get(index)
    }

    /// Index of the most recent entry, `len - 1`.
    pub fn last_index(&self) -> Option<usize> {
        self.0.len().checked_sub(1)
    }

    pub fn last(&self) -> Option<&Entry> {
        self.0.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.0.iter()
    }

    /// All entries joined by a blank line.
    pub fn joined(&self) -> String {
        self.0
            .iter()
            .map(Entry::as_str)
            .collect::<Vec<_>>()
            .join(ENTRY_SEPARATOR)
    }
}

impl<'a> IntoIterator for &'a EntryList {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Collapse soft line breaks into spaces.
///
/// A lone `\n` with text on both sides becomes a single space. Runs of two or
/// more newlines, and newlines at either end of the text, are kept as they are.
/// Carriage returns directly before a `\n` are dropped, so `\r\n` reads as `\n`.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for m in NEWLINE_RUN.find_iter(text) {
        out.push_str(&text[last..m.start()]);
        let breaks = m.as_str().matches('\n').count();
        if breaks == 1 && m.start() > 0 && m.end() < text.len() {
            out.push(' ');
        } else {
            out.push_str(&"\n".repeat(breaks));
        }
        last = m.end();
    }
    out.push_str(&text[last..]);
    out
}

/// Split before every marker, trim each piece and drop the empty ones.
///
/// Text ahead of the first marker is kept as its own entry when it is not blank.
pub fn segment(text: &str) -> Vec<Entry> {
    let mut pieces = Vec::new();
    let mut start = 0;

    for (idx, _) in text.match_indices(MARKER) {
        pieces.push(&text[start..idx]);
        start = idx;
    }
    pieces.push(&text[start..]);

    pieces
        .into_iter()
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(|piece| Entry(piece.to_string()))
        .collect()
}

/// Turn a fetched body into entries: emptiness check, normalize, segment.
pub fn parse_document(text: &str) -> Result<EntryList, LoadError> {
    if text.trim().is_empty() {
        return Err(LoadError::EmptyDocument);
    }

    let normalized = normalize(text);
    if !normalized.contains(MARKER) {
        return Err(LoadError::NoEntries);
    }

    let entries = segment(&normalized);
    if entries.is_empty() {
        return Err(LoadError::NoEntries);
    }

    log::debug!("Parsed {} entries from {} bytes", entries.len(), text.len());
    Ok(EntryList(entries))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(list: &EntryList) -> Vec<&str> {
        list.iter().map(Entry::as_str).collect()
    }

    #[test]
    fn test_normalize_joins_soft_breaks() {
        assert_eq!(normalize("●A\nline2\n\n●B"), "●A line2\n\n●B");
    }

    #[test]
    fn test_normalize_handles_consecutive_single_char_lines() {
        assert_eq!(normalize("a\nb\nc"), "a b c");
    }

    #[test]
    fn test_normalize_keeps_blank_lines_and_edges() {
        assert_eq!(normalize("\nfirst\n\n\nsecond\n"), "\nfirst\n\n\nsecond\n");
    }

    #[test]
    fn test_normalize_reads_crlf_as_lf() {
        assert_eq!(normalize("●A\r\nmore\r\n\r\n●B"), "●A more\n\n●B");
        assert_eq!(normalize("a\r\r\n\nb"), "a\n\nb");
        assert_eq!(normalize("a\rb\nc"), "a\rb c");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let samples = [
            "●A\nline2\n\n●B",
            "a\nb\nc\n\n\nd\ne",
            "\n\n●x\ny\n",
            "no breaks at all",
            "●one\r\ntwo\n\n●three\nfour\nfive",
            "●a\r\n\r\nb\nc\r\nd\n\r\n●e",
            "a\r\r\n\nb",
            "stray\rreturn\nhere\r",
            "a\n   \nb\n\t\n\n●c",
            "  \n  \n",
            "●lead\nline\n\n●next",
            "text before ●mid-line marker\nwrap\n\n●after",
            "\r\n",
        ];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", sample);
        }
    }

    #[test]
    fn test_segment_keeps_marker_at_start() {
        let entries = segment("●A line2\n\n●B");
        assert_eq!(
            entries,
            vec![Entry("●A line2".to_string()), Entry("●B".to_string())]
        );
    }

    #[test]
    fn test_parse_document_example() {
        let list = parse_document("●A\nline2\n\n●B").unwrap();
        assert_eq!(texts(&list), vec!["●A line2", "●B"]);
        assert_eq!(list.last_index(), Some(1));
    }

    #[test]
    fn test_parse_document_keeps_preamble() {
        let list = parse_document("Fantasy\n\n●First\n\n●Second").unwrap();
        assert_eq!(texts(&list), vec!["Fantasy", "●First", "●Second"]);
    }

    #[test]
    fn test_parse_document_drops_empty_segments() {
        let list = parse_document("●\n\n   ●B\n\n").unwrap();
        assert_eq!(texts(&list), vec!["●", "●B"]);

        let list = parse_document("\n\n●A").unwrap();
        assert_eq!(texts(&list), vec!["●A"]);
    }

    #[test]
    fn test_parse_document_empty() {
        assert_eq!(parse_document(""), Err(LoadError::EmptyDocument));
        assert_eq!(parse_document("  \n\t\n "), Err(LoadError::EmptyDocument));
    }

    #[test]
    fn test_parse_document_without_markers() {
        assert_eq!(
            parse_document("Once upon a time\nthere was no marker."),
            Err(LoadError::NoEntries)
        );
    }

    #[test]
    fn test_rejoining_reproduces_normalized_document() {
        let docs = [
            "Preface line\nwrapped\n\n●First entry\nsoft wrap\n\nsecond paragraph\n\n\n●Second\n●Third  \n",
            "●one\r\nwrapped\r\n\r\n●two\n\r\n●three\r\n",
            "●a\n   \n\t\nb\n\n  \n●c",
            "●leading marker only",
            "intro ●mid-line\nwrap ●again\n\n●last",
            "\r\n\r\n●x\r\r\n\ny",
        ];

        for doc in docs {
            let normalized = normalize(doc);
            let list = parse_document(doc).unwrap();

            // Every entry appears in order and only whitespace sits between them.
            let mut cursor = 0;
            for entry in &list {
                let found = normalized[cursor..]
                    .find(entry.as_str())
                    .map(|offset| cursor + offset)
                    .unwrap_or_else(|| panic!("{:?} missing from {:?}", entry, normalized));
                assert!(normalized[cursor..found].trim().is_empty(), "gap in {:?}", doc);
                cursor = found + entry.as_str().len();
            }
            assert!(normalized[cursor..].trim().is_empty(), "tail in {:?}", doc);

            let stripped: String = normalized.chars().filter(|c| !c.is_whitespace()).collect();
            let rejoined: String = list
                .joined()
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect();
            assert_eq!(rejoined, stripped, "rejoin mismatch for {:?}", doc);
        }
    }

    #[test]
    fn test_joined_uses_blank_line() {
        let list = parse_document("●A\n\n●B\n\n●C").unwrap();
        assert_eq!(list.joined(), "●A\n\n●B\n\n●C");
    }

    #[test]
    fn test_preview() {
        let list = parse_document("●A short one\n\n●A much longer entry that goes on").unwrap();
        assert_eq!(list.get(0).unwrap().preview(40), "●A short one");
        assert_eq!(list.get(1).unwrap().preview(8), "●A much …");
    }
}
