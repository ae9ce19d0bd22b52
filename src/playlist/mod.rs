// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Playlist document model.
//!
//! The persisted documents (playlists, queue, history, favourites) are plain
//! UTF-8 text: a mandatory `#EXTM3U` marker line followed by one resource
//! path per line. Blank lines are ignored; `#` lines other than the marker
//! are treated as metadata, ignored on read and dropped on rewrite. All
//! operations here are pure string transformations; reading and writing the
//! documents is the queue engine's business.

use crate::remote::paths;

/// The mandatory first line of every persisted playlist document.
pub(crate) const MARKER: &str = "#EXTM3U";

/// Extracts the ordered payload lines: trimmed, blanks and `#` lines dropped.
pub(crate) fn parse(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Renders the marker line followed by one path per line.
pub(crate) fn serialize(lines: &[String]) -> String {
    let mut text = String::from(MARKER);
    for line in lines {
        text.push('\n');
        text.push_str(line);
    }
    text.push('\n');
    text
}

/// Appends a track path as the last line, normalizing it for persistence.
/// An empty document gains a fresh marker.
pub(crate) fn append(text: &str, track_path: &str) -> String {
    let normalized = paths::normalize_for_persistence(track_path);
    let mut lines = parse(text);
    lines.push(normalized);
    serialize(&lines)
}

/// Removes and returns the first payload line, along with the remainder
/// document (marker plus all subsequent lines). The popped line is gone from
/// the remainder, not flagged. An empty document pops nothing and is
/// returned unchanged.
pub(crate) fn pop_front(text: &str) -> (Option<String>, String) {
    let mut lines = parse(text);
    if lines.is_empty() {
        return (None, text.to_string());
    }
    let first = lines.remove(0);
    (Some(first), serialize(&lines))
}

/// Inserts a value at the front, truncating to `cap` entries. Returns `None`
/// when the value already heads the list — adjacent-duplicate suppression
/// only, repeats further down are left alone.
pub(crate) fn prepend_capped(text: &str, value: &str, cap: usize) -> Option<String> {
    let mut lines = parse(text);
    if lines.first().map(String::as_str) == Some(value) {
        return None;
    }
    lines.insert(0, value.to_string());
    lines.truncate(cap);
    Some(serialize(&lines))
}

/// Appends a value unless it already appears anywhere in the document.
/// Returns `None` when no write is needed.
pub(crate) fn append_deduped(text: &str, value: &str) -> Option<String> {
    let normalized = paths::normalize_for_persistence(value);
    if parse(text).contains(&normalized) {
        return None;
    }
    Some(append(text, &normalized))
}

/// Dedup-anywhere append for plain line lists without a marker, such as the
/// favourite-albums document.
pub(crate) fn append_line_deduped(text: &str, line: &str) -> Option<String> {
    let line = line.trim();
    let mut lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    if lines.contains(&line) {
        return None;
    }
    lines.push(line);
    let mut out = lines.join("\n");
    out.push('\n');
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_drops_blanks_and_metadata_lines() {
        let text = "#EXTM3U\n\n/a.mp3\n  \n#EXTINF:123,whatever\n/b.mp3\n";
        assert_eq!(parse(text), ["/a.mp3", "/b.mp3"]);
    }

    #[test]
    fn marker_only_document_is_empty() {
        assert!(parse("#EXTM3U\n").is_empty());
        assert!(parse("").is_empty());
    }

    #[test]
    fn append_then_pop_on_empty_document() {
        let appended = append("", "/music/a.mp3");
        assert!(appended.starts_with(MARKER));

        let (popped, remainder) = pop_front(&appended);
        assert_eq!(popped.as_deref(), Some("/music/a.mp3"));
        assert_eq!(remainder, "#EXTM3U\n");
    }

    #[test]
    fn append_normalizes_the_track_path() {
        let appended = append("#EXTM3U\n", "http://nas.local/music/a%20b.mp3");
        assert_eq!(parse(&appended), ["/music/a b.mp3"]);
    }

    #[test]
    fn pop_front_physically_removes_the_first_line() {
        let text = "#EXTM3U\n/a.mp3\n/b.mp3\n";
        let (popped, remainder) = pop_front(text);
        assert_eq!(popped.as_deref(), Some("/a.mp3"));
        assert_eq!(remainder, "#EXTM3U\n/b.mp3\n");

        let (popped, remainder) = pop_front(&remainder);
        assert_eq!(popped.as_deref(), Some("/b.mp3"));
        let (none, unchanged) = pop_front(&remainder);
        assert!(none.is_none());
        assert_eq!(unchanged, "#EXTM3U\n");
    }

    #[test]
    fn prepend_capped_retains_newest_hundred() {
        let mut text = String::new();
        for i in 0..101 {
            if let Some(updated) = prepend_capped(&text, &format!("/t{i}.mp3"), 100) {
                text = updated;
            }
        }
        let lines = parse(&text);
        assert_eq!(lines.len(), 100);
        assert_eq!(lines.first().map(String::as_str), Some("/t100.mp3"));
        assert_eq!(lines.last().map(String::as_str), Some("/t1.mp3"));
    }

    #[test]
    fn prepend_capped_suppresses_adjacent_duplicates_only() {
        let text = prepend_capped("#EXTM3U\n", "/a.mp3", 100).unwrap();
        assert!(prepend_capped(&text, "/a.mp3", 100).is_none());

        let text = prepend_capped(&text, "/b.mp3", 100).unwrap();
        // Not adjacent any more, so it is inserted again.
        let text = prepend_capped(&text, "/a.mp3", 100).unwrap();
        assert_eq!(parse(&text), ["/a.mp3", "/b.mp3", "/a.mp3"]);
    }

    #[test]
    fn append_deduped_skips_values_present_anywhere() {
        let text = append_deduped("#EXTM3U\n", "/a.mp3").unwrap();
        let text = append_deduped(&text, "/b.mp3").unwrap();
        assert!(append_deduped(&text, "/a.mp3").is_none());
        assert_eq!(parse(&text), ["/a.mp3", "/b.mp3"]);
    }

    #[test]
    fn append_line_deduped_keeps_plain_lists_markerless() {
        let text = append_line_deduped("", "/music/Album One/").unwrap();
        assert_eq!(text, "/music/Album One/\n");
        assert!(append_line_deduped(&text, "/music/Album One/").is_none());
        let text = append_line_deduped(&text, "/music/Album Two/").unwrap();
        assert_eq!(text, "/music/Album One/\n/music/Album Two/\n");
    }
}
