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

//! Remote playlist picker.
//!
//! Lists the `.m3u` documents of either the per-user playlists directory or
//! the collection root; selecting one loads it into the tracks view.

mod render;

use ratatui::widgets::ListState;

use crate::{components, model::Resource};

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum PlaylistSource {
    User,
    Root,
}

pub(crate) struct PlaylistsView {
    pub(crate) entries: Vec<Resource>,
    pub(crate) state: ListState,
    pub(crate) source: PlaylistSource,
}

impl PlaylistsView {
    pub(crate) fn new() -> Self {
        Self {
            entries: vec![],
            state: ListState::default(),
            source: PlaylistSource::User,
        }
    }

    pub(crate) fn set_entries(&mut self, entries: Vec<Resource>) {
        self.state
            .select((!entries.is_empty()).then_some(0));
        self.entries = entries;
    }

    pub(crate) fn selected(&self) -> Option<&Resource> {
        self.entries.get(self.state.selected()?)
    }

    pub(crate) fn next(&mut self) {
        components::list_select_next(&mut self.state, self.entries.len());
    }

    pub(crate) fn previous(&mut self) {
        components::list_select_previous(&mut self.state, self.entries.len());
    }
}
