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

//! Render the music player interface.
//!
//! This module renders the visual representation of the current track, the
//! playback state reported by the engine's status poll, progress bars, and
//! the volume level.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Padding, Paragraph},
};

use crate::{
    App,
    player::PlayerState,
    render::icons::{ICON_ENDED, ICON_PAUSE, ICON_PLAY, ICON_STOP},
    util,
};

/// Renders the main player widget including track info and controls.
pub(crate) fn draw_player(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::TOP | Borders::BOTTOM)
        .border_style(Style::default().fg(app.theme.border_colour))
        .padding(Padding::horizontal(1));

    let inner_area = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner_area);

    let info_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(30)])
        .split(chunks[0]);

    if let Some(track) = &app.now_playing {
        let icon = match app.player_state {
            PlayerState::Playing => ICON_PLAY,
            PlayerState::Paused => ICON_PAUSE,
            PlayerState::Stopped => ICON_STOP,
            PlayerState::Ended => ICON_ENDED,
        };

        let track_line = Line::from(vec![
            Span::styled(
                format!(" {} ", icon),
                Style::default().add_modifier(Modifier::BOLD),
            )
            .fg(Color::White),
            Span::styled(
                track.display_name.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            )
            .fg(app.theme.accent_colour),
            Span::raw(" from "),
            Span::styled(
                track.album_name.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            )
            .fg(app.theme.accent_colour),
        ]);
        f.render_widget(Paragraph::new(track_line), info_chunks[0]);

        let duration = app.player_duration;
        let time = app.player_time;
        let remaining = (duration - time).max(0.0);

        let time_line = Line::from(vec![
            Span::styled(
                util::format::format_time(time),
                Style::default().add_modifier(Modifier::BOLD),
            )
            .fg(app.theme.accent_colour),
            Span::styled(" / ", Style::default().add_modifier(Modifier::BOLD)).fg(Color::White),
            Span::styled(
                util::format::format_time(duration),
                Style::default().add_modifier(Modifier::BOLD),
            )
            .fg(app.theme.accent_colour),
            Span::styled(" (-", Style::default().add_modifier(Modifier::BOLD)).fg(Color::White),
            Span::styled(
                util::format::format_time(remaining),
                Style::default().add_modifier(Modifier::BOLD),
            )
            .fg(app.theme.accent_colour),
            Span::styled(")", Style::default().add_modifier(Modifier::BOLD)).fg(Color::White),
        ]);

        let time_p = Paragraph::new(time_line).alignment(Alignment::Right);

        f.render_widget(time_p, info_chunks[1]);
    }

    let control_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(26)])
        .split(chunks[2]);

    let volume = app.volume;
    let vol_ratio = (volume as f64 / 100.0).clamp(0.0, 1.0);

    let volume_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(5)])
        .split(control_chunks[1]);

    let volume_gauge = Gauge::default()
        .gauge_style(
            Style::default()
                .fg(app.theme.accent_colour)
                .bg(app.theme.gauge_track_colour),
        )
        .ratio(vol_ratio)
        .label("")
        .use_unicode(true);
    f.render_widget(volume_gauge, volume_layout[0]);

    let volume_label = Paragraph::new(format!(" {}%", volume))
        .alignment(Alignment::Right)
        .fg(Color::White);
    f.render_widget(volume_label, volume_layout[1]);

    let position = if app.player_duration > 0.0 {
        (app.player_time / app.player_duration).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let position_gauge = Gauge::default()
        .gauge_style(
            Style::default()
                .fg(app.theme.accent_colour)
                .bg(app.theme.gauge_track_colour),
        )
        .ratio(position)
        .label("")
        .use_unicode(true);

    f.render_widget(position_gauge, chunks[4]);
}
