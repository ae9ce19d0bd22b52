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

//! UI rendering logic for the loaded track list.

use ratatui::{
    Frame,
    layout::{Constraint, Rect},
    style::{Color, Style, Stylize},
    text::Line,
    widgets::{Block, Cell, Row, Table},
};

use crate::{
    components::TracksView, render::icons::ICON_PLAY, session::PlaybackSession, theme::Theme,
};

impl TracksView {
    pub(crate) fn draw(
        &mut self,
        f: &mut Frame,
        area: Rect,
        session: &PlaybackSession,
        theme: &Theme,
    ) {
        let cursor = session.cursor();

        let rows = session.tracks().iter().enumerate().map(|(index, track)| {
            let playing = cursor == Some(index);
            let marker = if playing { ICON_PLAY } else { "" };
            let marker_cell =
                Cell::from(Line::from(marker).style(Style::default().fg(theme.accent_colour)));

            let album_style = Style::default().fg(theme.table_album_fg);
            let track_style = if playing {
                Style::default().fg(theme.accent_colour).bold()
            } else {
                Style::default().fg(theme.table_track_fg)
            };

            Row::new(vec![
                marker_cell,
                Cell::from(Line::from(track.album_name.as_str()).style(album_style)),
                Cell::from(Line::from(track.display_name.as_str()).style(track_style)),
            ])
        });

        let table = Table::new(
            rows,
            [
                Constraint::Length(2),
                Constraint::Percentage(35),
                Constraint::Percentage(65),
            ],
        )
        .header(
            Row::new(vec![Cell::from(""), Cell::from("Album"), Cell::from("Track")])
                .style(Style::default().bold().fg(theme.accent_colour))
                .bottom_margin(1),
        )
        .row_highlight_style(Style::default().bg(Color::Blue).fg(Color::White))
        .block(Block::default());

        f.render_stateful_widget(table, area, &mut self.table_state);
    }
}
