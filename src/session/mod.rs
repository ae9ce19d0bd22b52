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

//! Playback session state.
//!
//! This module provides state for the in-memory loaded track list and the
//! cursor within it, plus the advance decision taken when a track ends: the
//! persisted queue always wins over the loaded list, and an exhausted list
//! simply stops. The cursor is a position in the loaded list only — it is
//! independent of the persisted queue, and this session is its sole mutator.
//!
//! The session holds no remote or audio state; popping the persisted queue
//! happens on the task worker and its result is fed into [`PlaybackSession::advance`].

use crate::model::Track;

/// The decision taken when the current track has ended.
#[derive(Debug)]
pub(crate) enum Advance {
    /// A queued track was popped from the persisted queue; play it directly,
    /// leaving the loaded list and cursor untouched.
    Queued(Track),
    /// No queued track; play this index of the loaded list.
    Next(usize),
    /// Queue empty and loaded list exhausted; remain idle.
    EndOfList,
}

#[derive(Default)]
pub(crate) struct PlaybackSession {
    tracks: Vec<Track>,
    cursor: Option<usize>,
}

impl PlaybackSession {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Replaces the loaded list wholesale. Does not start playback.
    pub(crate) fn load(&mut self, tracks: Vec<Track>, start_at: usize) {
        self.cursor = (start_at < tracks.len()).then_some(start_at);
        self.tracks = tracks;
    }

    /// Explicit append load; the cursor is left where it was.
    pub(crate) fn append(&mut self, tracks: Vec<Track>) {
        self.tracks.extend(tracks);
    }

    pub(crate) fn clear(&mut self) {
        self.tracks.clear();
        self.cursor = None;
    }

    pub(crate) fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub(crate) fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub(crate) fn track(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    /// Moves the cursor to a bounds-checked index, returning the track there.
    pub(crate) fn select(&mut self, index: usize) -> Option<&Track> {
        if index < self.tracks.len() {
            self.cursor = Some(index);
            self.tracks.get(index)
        } else {
            None
        }
    }

    /// The index before the cursor, when there is one.
    pub(crate) fn previous(&self) -> Option<usize> {
        match self.cursor {
            Some(index) if index > 0 => Some(index - 1),
            _ => None,
        }
    }

    /// Removes a track from the loaded list, shifting the cursor so it keeps
    /// pointing at the same track when the removal was before it. Never
    /// auto-advances playback.
    pub(crate) fn remove(&mut self, index: usize) -> Option<Track> {
        if index >= self.tracks.len() {
            return None;
        }
        let removed = self.tracks.remove(index);
        if let Some(cursor) = self.cursor {
            if index < cursor {
                self.cursor = Some(cursor - 1);
            } else if cursor >= self.tracks.len() {
                self.cursor = None;
            }
        }
        Some(removed)
    }

    /// Decides what to play after the current track ended, given the result
    /// of popping the persisted queue. An empty queue and an empty loaded
    /// list both resolve to [`Advance::EndOfList`] without error.
    pub(crate) fn advance(&self, queued: Option<Track>) -> Advance {
        if let Some(track) = queued {
            return Advance::Queued(track);
        }
        match self.cursor {
            Some(index) if index + 1 < self.tracks.len() => Advance::Next(index + 1),
            _ => Advance::EndOfList,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracks(names: &[&str]) -> Vec<Track> {
        names
            .iter()
            .map(|n| Track::from_resource_path(&format!("/music/Album/{n}")))
            .collect()
    }

    #[test]
    fn load_sets_cursor_or_none_when_empty() {
        let mut session = PlaybackSession::new();
        session.load(tracks(&["a.mp3", "b.mp3"]), 1);
        assert_eq!(session.cursor(), Some(1));

        session.load(vec![], 0);
        assert_eq!(session.cursor(), None);
    }

    #[test]
    fn queued_track_wins_over_the_loaded_list() {
        let mut session = PlaybackSession::new();
        session.load(tracks(&["a.mp3", "b.mp3", "c.mp3"]), 0);

        let queued = Track::from_resource_path("/music/Other/q.mp3");
        match session.advance(Some(queued)) {
            Advance::Queued(track) => assert_eq!(track.resource_path, "/music/Other/q.mp3"),
            other => panic!("expected queued advance, got {other:?}"),
        }
        // The cursor is untouched by a queued advance.
        assert_eq!(session.cursor(), Some(0));
    }

    #[test]
    fn empty_queue_advances_the_cursor() {
        let mut session = PlaybackSession::new();
        session.load(tracks(&["a.mp3", "b.mp3"]), 0);

        assert!(matches!(session.advance(None), Advance::Next(1)));

        session.select(1);
        assert!(matches!(session.advance(None), Advance::EndOfList));
    }

    #[test]
    fn empty_queue_and_empty_list_is_end_of_list() {
        let session = PlaybackSession::new();
        assert!(matches!(session.advance(None), Advance::EndOfList));
    }

    #[test]
    fn previous_stops_at_the_front() {
        let mut session = PlaybackSession::new();
        session.load(tracks(&["a.mp3", "b.mp3"]), 1);
        assert_eq!(session.previous(), Some(0));

        session.select(0);
        assert_eq!(session.previous(), None);
    }

    #[test]
    fn removal_before_the_cursor_shifts_it() {
        let mut session = PlaybackSession::new();
        session.load(tracks(&["a.mp3", "b.mp3", "c.mp3"]), 2);

        session.remove(0);
        assert_eq!(session.cursor(), Some(1));
        assert_eq!(session.tracks().len(), 2);

        // Removing the cursor's own track while it was last clears it.
        session.remove(1);
        assert_eq!(session.cursor(), None);
    }

    #[test]
    fn removal_after_the_cursor_leaves_it_alone() {
        let mut session = PlaybackSession::new();
        session.load(tracks(&["a.mp3", "b.mp3", "c.mp3"]), 0);
        session.remove(2);
        assert_eq!(session.cursor(), Some(0));
    }

    #[test]
    fn select_rejects_out_of_bounds_indices() {
        let mut session = PlaybackSession::new();
        session.load(tracks(&["a.mp3"]), 0);
        assert!(session.select(3).is_none());
        assert_eq!(session.cursor(), Some(0));
    }
}
