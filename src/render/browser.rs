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

//! Render the remote collection browser.
//!
//! This module renders the visual representation of the current remote
//! directory: collections first, then playable files, with the decoded
//! directory path as the pane title.

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem},
};

use crate::{
    browser::RemoteBrowser,
    remote::paths,
    render::icons::{ICON_FOLDER, ICON_PLAYLIST, ICON_TRACK},
    theme::Theme,
};

/// Renders the browser widget for the current remote directory.
pub(crate) fn draw_browser(f: &mut Frame, area: Rect, browser: &mut RemoteBrowser, theme: &Theme) {
    let title = if browser.loading {
        format!(" {} (loading...) ", paths::percent_decode(&browser.current_path))
    } else {
        format!(" {} ", paths::percent_decode(&browser.current_path))
    };

    let items: Vec<ListItem> = browser
        .entries
        .iter()
        .map(|entry| {
            let (icon, colour) = if entry.is_directory {
                (ICON_FOLDER, theme.browser_dir_fg)
            } else if entry.is_playlist() {
                (ICON_PLAYLIST, theme.browser_playlist_fg)
            } else {
                (ICON_TRACK, theme.browser_file_fg)
            };
            ListItem::new(format!("{icon} {}", entry.display_name()))
                .style(Style::default().fg(colour))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(
                    Style::default()
                        .fg(theme.accent_colour)
                        .add_modifier(Modifier::BOLD),
                ),
        )
        .highlight_style(Style::default().bg(Color::Blue).fg(Color::White))
        .highlight_symbol(">> ");

    f.render_stateful_widget(list, area, &mut browser.state);
}
