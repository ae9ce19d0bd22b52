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

//! Application logic, event handling, and command dispatching.
//!
//! This module acts as the central hub for the "Controller" logic of the
//! application. It organizes how various inputs are translated into internal
//! state changes.
//!
//! # Organization
//!
//! * [`AppEvent`]: Everything that can happen — keyboard input, task worker
//!   results, player status snapshots, UI ticks.
//! * [`handlers`]: One function per event, mutating the [`App`] state and
//!   dispatching follow-up tasks.
//! * [`key_handlers`]: The keyboard router, translating key presses into
//!   events and tasks for the active view.

mod handlers;
mod key_handlers;

use std::io::Stdout;

use anyhow::{Result, anyhow};
use crossterm::event::KeyEvent;
use ratatui::{Terminal, prelude::CrosstermBackend};

use crate::{
    App, MainView,
    components::playlists::PlaylistSource,
    model::{Resource, Track},
    player::PlayerStatus,
    render::draw,
};

#[derive(Debug)]
pub(crate) enum AppEvent {
    Key(KeyEvent),

    SetMainView(MainView),

    DirectoryListed { path: String, entries: Vec<Resource> },
    PlaylistsListed { entries: Vec<Resource> },
    FavouriteAlbumsListed(Vec<String>),
    TracksLoaded { tracks: Vec<Track>, append: bool },

    QueueAdvanced(Option<Track>),

    SaveLoadedAs(String),
    AddSelectedToPlaylist(String),
    ShowPlaylists(PlaylistSource),
    ShowFavourites,
    ClearLoaded,
    SetVolume(u32),

    PlayerStatus(PlayerStatus),

    Tick,

    Message(String),
    Error(String),
    FatalError(String),

    ExitApplication,
}

/// Runs the main application loop, handling events and rendering the UI in
/// the terminal.
///
/// This function loops until a 'quit' event is received or the event channel
/// is closed.
pub(crate) fn process_events(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
) -> Result<()> {
    while let Ok(event) = app.event_rx.recv() {
        if matches!(event, AppEvent::ExitApplication) {
            break;
        }

        match event {
            AppEvent::Key(key) => key_handlers::process_key_event(app, key)?,
            AppEvent::SetMainView(view) => handlers::handle_set_main_view(app, view),
            AppEvent::DirectoryListed { path, entries } => {
                handlers::handle_directory_listed(app, path, entries)
            }
            AppEvent::PlaylistsListed { entries } => {
                handlers::handle_playlists_listed(app, entries)
            }
            AppEvent::FavouriteAlbumsListed(albums) => {
                handlers::handle_favourite_albums_listed(app, albums)
            }
            AppEvent::TracksLoaded { tracks, append } => {
                handlers::handle_tracks_loaded(app, tracks, append)
            }
            AppEvent::QueueAdvanced(queued) => handlers::handle_queue_advanced(app, queued)?,
            AppEvent::SaveLoadedAs(name) => handlers::handle_save_loaded_as(app, name)?,
            AppEvent::AddSelectedToPlaylist(name) => {
                handlers::handle_add_selected_to_playlist(app, name)?
            }
            AppEvent::ShowPlaylists(source) => handlers::handle_show_playlists(app, source)?,
            AppEvent::ShowFavourites => handlers::handle_show_favourites(app)?,
            AppEvent::ClearLoaded => handlers::handle_clear_loaded(app),
            AppEvent::SetVolume(volume) => handlers::handle_set_volume(app, volume)?,
            AppEvent::PlayerStatus(status) => handlers::handle_player_status(app, status)?,
            AppEvent::Message(message) => handlers::handle_message(app, message),
            AppEvent::Error(message) => handlers::handle_error(app, message),
            AppEvent::FatalError(message) => return Err(anyhow!(message)),
            AppEvent::Tick | AppEvent::ExitApplication => handlers::handle_tick(app),
        }

        // Render after every event processed
        terminal.draw(|f| draw(f, app))?;
    }

    Ok(())
}
