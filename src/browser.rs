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

//! Remote collection browser state.
//!
//! This module provides state for the directory browser widget: the current
//! remote directory, its listed entries, the selection within them, and the
//! trail of parent directories so that ascending restores the previous
//! selection. Listings arrive asynchronously from the task worker.

use ratatui::widgets::ListState;

use crate::model::Resource;

pub(crate) struct RemoteBrowser {
    pub(crate) current_path: String,
    pub(crate) entries: Vec<Resource>,
    pub(crate) state: ListState,
    pub(crate) loading: bool,

    parents: Vec<(String, ListState)>,
}

impl RemoteBrowser {
    pub(crate) fn new(root_path: String) -> Self {
        Self {
            current_path: root_path,
            entries: vec![],
            state: ListState::default(),
            loading: true,
            parents: vec![],
        }
    }

    pub(crate) fn selected(&self) -> Option<&Resource> {
        self.entries.get(self.state.selected()?)
    }

    /// Installs a finished listing. Stale responses for directories we have
    /// already navigated away from are dropped.
    pub(crate) fn set_entries(&mut self, path: &str, entries: Vec<Resource>) {
        if path != self.current_path {
            return;
        }
        self.loading = false;
        let keep = self
            .state
            .selected()
            .filter(|&i| i < entries.len())
            .or_else(|| (!entries.is_empty()).then_some(0));
        self.entries = entries;
        self.state.select(keep);
    }

    /// Steps into a child collection; the caller requests the new listing.
    pub(crate) fn descend(&mut self, child_path: String) {
        let previous = std::mem::replace(&mut self.current_path, child_path);
        let previous_state = std::mem::take(&mut self.state);
        self.parents.push((previous, previous_state));
        self.entries.clear();
        self.loading = true;
    }

    /// Steps back to the parent collection, restoring its selection, and
    /// returns the path to re-list. At the root this is a no-op.
    pub(crate) fn ascend(&mut self) -> Option<String> {
        let (path, state) = self.parents.pop()?;
        self.current_path = path.clone();
        self.state = state;
        self.entries.clear();
        self.loading = true;
        Some(path)
    }

    /// Drops cached entries and re-lists the current directory.
    pub(crate) fn begin_refresh(&mut self) -> String {
        self.entries.clear();
        self.loading = true;
        self.current_path.clone()
    }

    pub(crate) fn next(&mut self) {
        Self::step_forward(&mut self.state, self.entries.len());
    }

    pub(crate) fn previous(&mut self) {
        Self::step_back(&mut self.state, self.entries.len());
    }

    fn step_forward(state: &mut ListState, len: usize) {
        if len == 0 {
            return;
        }
        let i = match state.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        state.select(Some(i));
    }

    fn step_back(state: &mut ListState, len: usize) {
        if len == 0 {
            return;
        }
        let i = match state.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        state.select(Some(i));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, is_directory: bool) -> Resource {
        Resource {
            raw_name: name.to_string(),
            raw_path: format!("/music/{name}"),
            is_directory,
        }
    }

    #[test]
    fn descend_and_ascend_restore_the_parent_selection() {
        let mut browser = RemoteBrowser::new("/music/".into());
        browser.set_entries("/music/", vec![entry("A", true), entry("B", true)]);
        browser.next();
        assert_eq!(browser.state.selected(), Some(1));

        browser.descend("/music/B/".into());
        browser.set_entries("/music/B/", vec![entry("b.mp3", false)]);
        assert_eq!(browser.state.selected(), Some(0));

        let parent = browser.ascend().unwrap();
        assert_eq!(parent, "/music/");
        assert_eq!(browser.state.selected(), Some(1));
        assert!(browser.ascend().is_none());
    }

    #[test]
    fn stale_listings_are_ignored() {
        let mut browser = RemoteBrowser::new("/music/".into());
        browser.descend("/music/A/".into());
        browser.set_entries("/music/", vec![entry("late", false)]);
        assert!(browser.entries.is_empty());
        assert!(browser.loading);
    }
}
