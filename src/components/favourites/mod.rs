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

//! Favourite albums view.
//!
//! Shows the directories recorded in the remote favourite-albums document;
//! selecting one loads that album's tracks.

mod render;

use ratatui::widgets::ListState;

use crate::components;

pub(crate) struct FavouritesView {
    pub(crate) albums: Vec<String>,
    pub(crate) state: ListState,
}

impl FavouritesView {
    pub(crate) fn new() -> Self {
        Self {
            albums: vec![],
            state: ListState::default(),
        }
    }

    pub(crate) fn set_albums(&mut self, albums: Vec<String>) {
        self.state.select((!albums.is_empty()).then_some(0));
        self.albums = albums;
    }

    pub(crate) fn selected(&self) -> Option<&String> {
        self.albums.get(self.state.selected()?)
    }

    pub(crate) fn next(&mut self) {
        components::list_select_next(&mut self.state, self.albums.len());
    }

    pub(crate) fn previous(&mut self) {
        components::list_select_previous(&mut self.state, self.albums.len());
    }
}
