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

//! Persisted queue, history, favourites, and playlist operations.
//!
//! This module composes the remote document store with the playlist document
//! operations into the named operations the rest of the application uses:
//! a cross-session FIFO queue with an append-only played log, a capped play
//! history, dedup-append favourites, and generic playlist load/save.
//!
//! # Failure policy
//!
//! No operation here returns an error. Remote failures are logged with their
//! kind and degrade to `false`/`None`/empty, and callers surface a
//! status-line message. Queue pops are optimistic-concurrency writes
//! (ETag + `If-Match`) retried a bounded number of times; on a server that
//! returns no validator the writes are unconditional and the single-writer
//! assumption applies.

use std::{thread, time::Duration};

use tracing::warn;

use crate::{
    model::Track,
    playlist,
    remote::{
        paths,
        store::{Document, RemoteError, RemoteStore},
    },
};

const HISTORY_CAP: usize = 100;

const DEQUEUE_ATTEMPTS: u32 = 3;
const CONFLICT_BACKOFF: Duration = Duration::from_millis(150);

/// The document read/write surface the engine needs; implemented by
/// [`RemoteStore`] and by an in-memory store in tests.
pub(crate) trait DocumentStore {
    fn read(&self, path: &str) -> Result<Document, RemoteError>;
    fn write(&self, path: &str, text: &str) -> Result<(), RemoteError>;
    fn write_if(&self, path: &str, text: &str, etag: Option<&str>) -> Result<(), RemoteError>;
}

impl DocumentStore for RemoteStore {
    fn read(&self, path: &str) -> Result<Document, RemoteError> {
        self.read_document(path)
    }

    fn write(&self, path: &str, text: &str) -> Result<(), RemoteError> {
        self.write_document(path, text)
    }

    fn write_if(&self, path: &str, text: &str, etag: Option<&str>) -> Result<(), RemoteError> {
        self.write_document_if(path, text, etag)
    }
}

/// Server-relative locations of the per-user documents.
#[derive(Debug, Clone)]
pub(crate) struct DocumentPaths {
    /// Collection root; playlist lines without a leading `/` or scheme are
    /// resolved against it, and tracks under it are saved relative to it.
    pub(crate) root: String,
    pub(crate) queue: String,
    pub(crate) played: String,
    pub(crate) history: String,
    pub(crate) favourites: String,
    pub(crate) favourite_albums: String,
}

pub(crate) struct QueueEngine<S> {
    store: S,
    paths: DocumentPaths,
}

impl<S: DocumentStore> QueueEngine<S> {
    pub(crate) fn new(store: S, paths: DocumentPaths) -> Self {
        Self { store, paths }
    }

    /// Appends a track to the end of the pending queue document.
    pub(crate) fn enqueue(&self, track: &Track) -> bool {
        let Some(doc) = self.read(&self.paths.queue) else {
            return false;
        };
        let updated = playlist::append(&doc.text, &track.resource_path);
        self.put(&self.paths.queue, &updated)
    }

    /// Pops the queue head, moving it to the played-queue log.
    ///
    /// The pop itself is the commit point: read plus version validator, pop
    /// the front line, write back conditionally, retry briefly on conflict.
    /// The played-log append afterwards is best-effort — at-least-once pop,
    /// best-effort log.
    pub(crate) fn dequeue(&self) -> Option<Track> {
        for attempt in 1..=DEQUEUE_ATTEMPTS {
            let doc = self.read(&self.paths.queue)?;
            let (popped, remainder) = playlist::pop_front(&doc.text);
            let popped = popped?;

            match self
                .store
                .write_if(&self.paths.queue, &remainder, doc.etag.as_deref())
            {
                Ok(()) => {
                    let played = self.read(&self.paths.played).unwrap_or_default();
                    self.put(&self.paths.played, &playlist::append(&played.text, &popped));
                    return Some(Track::from_resource_path(&self.resolve_line(&popped)));
                }
                Err(RemoteError::Conflict) => {
                    warn!(attempt, "queue changed under us, retrying pop");
                    thread::sleep(CONFLICT_BACKOFF);
                }
                Err(err) => {
                    warn!(path = %self.paths.queue, %err, "queue pop write failed");
                    return None;
                }
            }
        }

        warn!("queue pop abandoned after repeated conflicts");
        None
    }

    /// Rewrites the pending queue as an empty (marker-only) document.
    pub(crate) fn clear_queue(&self) -> bool {
        self.put(&self.paths.queue, &playlist::serialize(&[]))
    }

    /// Prepends a track to the history document, newest first, capped and
    /// with adjacent-duplicate suppression.
    pub(crate) fn record_history(&self, track_path: &str) -> bool {
        let normalized = paths::normalize_for_persistence(track_path);
        let Some(doc) = self.read(&self.paths.history) else {
            return false;
        };
        match playlist::prepend_capped(&doc.text, &normalized, HISTORY_CAP) {
            Some(updated) => self.put(&self.paths.history, &updated),
            None => true,
        }
    }

    /// Adds a track to the favourites document unless already present.
    pub(crate) fn add_favourite_track(&self, track: &Track) -> bool {
        let Some(doc) = self.read(&self.paths.favourites) else {
            return false;
        };
        match playlist::append_deduped(&doc.text, &track.resource_path) {
            Some(updated) => self.put(&self.paths.favourites, &updated),
            None => true,
        }
    }

    /// Adds a directory path to the favourite-albums list unless present.
    pub(crate) fn add_favourite_album(&self, path: &str) -> bool {
        let normalized = paths::normalize_for_persistence(path);
        let Some(doc) = self.read(&self.paths.favourite_albums) else {
            return false;
        };
        match playlist::append_line_deduped(&doc.text, &normalized) {
            Some(updated) => self.put(&self.paths.favourite_albums, &updated),
            None => true,
        }
    }

    pub(crate) fn list_favourite_albums(&self) -> Vec<String> {
        let Some(doc) = self.read(&self.paths.favourite_albums) else {
            return vec![];
        };
        doc.text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Loads a playlist document into tracks, resolving relative lines
    /// against the collection root.
    pub(crate) fn load_playlist(&self, path: &str) -> Vec<Track> {
        let Some(doc) = self.read(path) else {
            return vec![];
        };
        playlist::parse(&doc.text)
            .iter()
            .map(|line| Track::from_resource_path(&self.resolve_line(line)))
            .collect()
    }

    /// Saves tracks as a playlist document; paths under the collection root
    /// are stored relative to it, anything else as-is.
    pub(crate) fn save_playlist(&self, path: &str, tracks: &[Track]) -> bool {
        let root = paths::normalize_for_persistence(&self.paths.root);
        let root = root.trim_end_matches('/');

        let lines: Vec<String> = tracks
            .iter()
            .map(|track| {
                let normalized = paths::normalize_for_persistence(&track.resource_path);
                match normalized.strip_prefix(root) {
                    Some(rel) => rel.trim_start_matches('/').to_string(),
                    None => normalized,
                }
            })
            .collect();

        self.put(path, &playlist::serialize(&lines))
    }

    /// Appends one track to a named playlist document.
    pub(crate) fn append_to_playlist(&self, path: &str, track: &Track) -> bool {
        let Some(doc) = self.read(path) else {
            return false;
        };
        self.put(path, &playlist::append(&doc.text, &track.resource_path))
    }

    fn resolve_line(&self, line: &str) -> String {
        if line.starts_with("http") || line.starts_with('/') {
            return line.to_string();
        }
        let root = self.paths.root.trim_end_matches('/');
        format!("{root}/{line}")
    }

    fn read(&self, path: &str) -> Option<Document> {
        match self.store.read(path) {
            Ok(doc) => Some(doc),
            Err(err) => {
                warn!(path, %err, "remote document read failed");
                None
            }
        }
    }

    fn put(&self, path: &str, text: &str) -> bool {
        match self.store.write(path, text) {
            Ok(()) => true,
            Err(err) => {
                warn!(path, %err, "remote document write failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, collections::HashMap};

    use super::*;

    #[derive(Default)]
    struct MemoryStore {
        docs: RefCell<HashMap<String, (String, u64)>>,
    }

    impl MemoryStore {
        fn text(&self, path: &str) -> String {
            self.docs
                .borrow()
                .get(path)
                .map(|(text, _)| text.clone())
                .unwrap_or_default()
        }
    }

    impl DocumentStore for MemoryStore {
        fn read(&self, path: &str) -> Result<Document, RemoteError> {
            Ok(self
                .docs
                .borrow()
                .get(path)
                .map(|(text, version)| Document {
                    text: text.clone(),
                    etag: Some(version.to_string()),
                })
                .unwrap_or_default())
        }

        fn write(&self, path: &str, text: &str) -> Result<(), RemoteError> {
            let mut docs = self.docs.borrow_mut();
            let version = docs.get(path).map(|(_, v)| v + 1).unwrap_or(1);
            docs.insert(path.to_string(), (text.to_string(), version));
            Ok(())
        }

        fn write_if(&self, path: &str, text: &str, etag: Option<&str>) -> Result<(), RemoteError> {
            if let (Some(expected), Some((_, current))) = (etag, self.docs.borrow().get(path)) {
                if expected != current.to_string() {
                    return Err(RemoteError::Conflict);
                }
            }
            self.write(path, text)
        }
    }

    /// Fails the first `failures` conditional writes with a conflict.
    struct ConflictingStore {
        inner: MemoryStore,
        failures: RefCell<u32>,
    }

    impl DocumentStore for ConflictingStore {
        fn read(&self, path: &str) -> Result<Document, RemoteError> {
            self.inner.read(path)
        }

        fn write(&self, path: &str, text: &str) -> Result<(), RemoteError> {
            self.inner.write(path, text)
        }

        fn write_if(&self, path: &str, text: &str, etag: Option<&str>) -> Result<(), RemoteError> {
            let mut failures = self.failures.borrow_mut();
            if *failures > 0 {
                *failures -= 1;
                return Err(RemoteError::Conflict);
            }
            self.inner.write_if(path, text, etag)
        }
    }

    fn test_paths() -> DocumentPaths {
        DocumentPaths {
            root: "/music/".into(),
            queue: "/music/lists/me/queued.m3u".into(),
            played: "/music/lists/me/queue-played.m3u".into(),
            history: "/music/lists/me/history.m3u".into(),
            favourites: "/music/lists/me/favourites.m3u".into(),
            favourite_albums: "/music/lists/me/albums.txt".into(),
        }
    }

    fn track(path: &str) -> Track {
        Track::from_resource_path(path)
    }

    #[test]
    fn queue_is_fifo_and_feeds_the_played_log() {
        let engine = QueueEngine::new(MemoryStore::default(), test_paths());

        assert!(engine.enqueue(&track("/music/Album/a.mp3")));
        assert!(engine.enqueue(&track("/music/Album/b.mp3")));

        let first = engine.dequeue().unwrap();
        let second = engine.dequeue().unwrap();
        assert_eq!(first.resource_path, "/music/Album/a.mp3");
        assert_eq!(second.resource_path, "/music/Album/b.mp3");
        assert!(engine.dequeue().is_none());

        let played = engine.store.text(&test_paths().played);
        assert_eq!(
            playlist::parse(&played),
            ["/music/Album/a.mp3", "/music/Album/b.mp3"]
        );
    }

    #[test]
    fn enqueue_normalizes_paths_for_persistence() {
        let engine = QueueEngine::new(MemoryStore::default(), test_paths());
        assert!(engine.enqueue(&track("http://nas.local/music/a%20b.mp3")));
        let queued = engine.store.text(&test_paths().queue);
        assert_eq!(playlist::parse(&queued), ["/music/a b.mp3"]);
    }

    #[test]
    fn dequeue_retries_past_transient_conflicts() {
        let store = ConflictingStore {
            inner: MemoryStore::default(),
            failures: RefCell::new(2),
        };
        let engine = QueueEngine::new(store, test_paths());
        assert!(engine.enqueue(&track("/music/a.mp3")));

        let popped = engine.dequeue().unwrap();
        assert_eq!(popped.resource_path, "/music/a.mp3");
    }

    #[test]
    fn dequeue_gives_up_after_persistent_conflicts() {
        let store = ConflictingStore {
            inner: MemoryStore::default(),
            failures: RefCell::new(10),
        };
        let engine = QueueEngine::new(store, test_paths());
        assert!(engine.enqueue(&track("/music/a.mp3")));
        assert!(engine.dequeue().is_none());
    }

    #[test]
    fn clear_queue_leaves_a_marker_only_document() {
        let engine = QueueEngine::new(MemoryStore::default(), test_paths());
        engine.enqueue(&track("/music/a.mp3"));
        assert!(engine.clear_queue());
        assert_eq!(engine.store.text(&test_paths().queue), "#EXTM3U\n");
    }

    #[test]
    fn history_dedups_adjacent_entries_only() {
        let engine = QueueEngine::new(MemoryStore::default(), test_paths());
        assert!(engine.record_history("/music/a.mp3"));
        assert!(engine.record_history("/music/a.mp3"));
        assert!(engine.record_history("/music/b.mp3"));
        assert!(engine.record_history("/music/a.mp3"));

        let history = engine.store.text(&test_paths().history);
        assert_eq!(
            playlist::parse(&history),
            ["/music/a.mp3", "/music/b.mp3", "/music/a.mp3"]
        );
    }

    #[test]
    fn favourites_dedup_anywhere() {
        let engine = QueueEngine::new(MemoryStore::default(), test_paths());
        assert!(engine.add_favourite_track(&track("/music/a.mp3")));
        assert!(engine.add_favourite_track(&track("/music/b.mp3")));
        assert!(engine.add_favourite_track(&track("/music/a.mp3")));

        let favourites = engine.store.text(&test_paths().favourites);
        assert_eq!(playlist::parse(&favourites), ["/music/a.mp3", "/music/b.mp3"]);
    }

    #[test]
    fn favourite_albums_are_a_plain_deduped_list() {
        let engine = QueueEngine::new(MemoryStore::default(), test_paths());
        assert!(engine.add_favourite_album("/music/Album%20One/"));
        assert!(engine.add_favourite_album("/music/Album One/"));
        assert_eq!(engine.list_favourite_albums(), ["/music/Album One/"]);
    }

    #[test]
    fn playlists_round_trip_relative_to_the_root() {
        let engine = QueueEngine::new(MemoryStore::default(), test_paths());
        let tracks = vec![
            track("/music/Album/one.mp3"),
            track("/elsewhere/two.mp3"),
        ];
        assert!(engine.save_playlist("/music/lists/me/mix.m3u", &tracks));

        let stored = engine.store.text("/music/lists/me/mix.m3u");
        assert_eq!(
            playlist::parse(&stored),
            ["Album/one.mp3", "/elsewhere/two.mp3"]
        );

        let loaded = engine.load_playlist("/music/lists/me/mix.m3u");
        let paths: Vec<&str> = loaded.iter().map(|t| t.resource_path.as_str()).collect();
        assert_eq!(paths, ["/music/Album/one.mp3", "/elsewhere/two.mp3"]);
    }
}
