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

//! Reusable view components for the main content area.
//!
//! Each component pairs a state struct (selection, cached entries) with its
//! rendering logic in a `render` sub-module. Event routing stays in the
//! central key handler; these structs only hold and move selection state.

pub(crate) mod favourites;
pub(crate) mod playlists;
pub(crate) mod tracks;

pub(crate) use favourites::FavouritesView;
pub(crate) use playlists::PlaylistsView;
pub(crate) use tracks::TracksView;

use ratatui::widgets::ListState;

/// Moves a list selection forward, wrapping at the end.
pub(crate) fn list_select_next(state: &mut ListState, len: usize) {
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

/// Moves a list selection backwards, wrapping at the front.
pub(crate) fn list_select_previous(state: &mut ListState, len: usize) {
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
