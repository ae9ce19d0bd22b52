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

//! Loaded track list view.
//!
//! This module coordinates the table selection for the tracks of the
//! current playback session. The track data itself lives in
//! [`crate::session::PlaybackSession`]; this view only owns the UI cursor,
//! which is distinct from the session's playback cursor.

mod render;

use ratatui::widgets::TableState;

pub(crate) struct TracksView {
    pub(crate) table_state: TableState,
}

impl TracksView {
    pub(crate) fn new() -> Self {
        Self {
            table_state: TableState::new(),
        }
    }

    pub(crate) fn selected(&self) -> Option<usize> {
        self.table_state.selected()
    }

    /// Re-aims the selection after the track list changed, preferring the
    /// session's playback cursor.
    pub(crate) fn reset(&mut self, len: usize, cursor: Option<usize>) {
        let selection = cursor
            .filter(|&i| i < len)
            .or_else(|| (len > 0).then_some(0));
        self.table_state.select(selection);
    }

    pub(crate) fn select_next(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.table_state.select(Some(i));
    }

    pub(crate) fn select_previous(&mut self, len: usize) {
        if len == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.table_state.select(Some(i));
    }
}
