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

//! Keyboard input routing.
//!
//! Translates low-level key events into application events and background
//! tasks. The commander gets first refusal on every key press (so that `:`
//! command mode captures typing); everything else is routed by the active
//! main view.

use anyhow::Result;
use crossterm::event::{Event, KeyCode, KeyEvent};

use crate::{
    App, MainView,
    events::{AppEvent, handlers},
    tasks::AppTask,
};

const SEEK_DELTA: i32 = 5;
const VOLUME_DELTA: i32 = 5;

/// Maps keyboard input to application actions and playback commands.
///
/// This function acts as the primary input router for the TUI. It handles:
///
/// * **Application Control**: Life-cycle events like exiting the program.
/// * **Navigation**: Moving through the remote browser, the loaded track
///   list, and the playlist/favourites pickers.
/// * **Playback**: Controlling the audio engine (play, pause, seek, volume).
/// * **Queue and Lists**: Enqueueing to the persisted queue, favouriting,
///   and removing tracks.
///
/// # Errors
///
/// Returns an error if a command fails to send to a background worker.
pub(super) fn process_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    let event = Event::Key(key);
    let handled = app
        .commander
        .handle_event(event, &app.task_tx, &app.event_tx);
    if handled {
        return Ok(());
    }

    process_global_key_event(app, key)
}

fn process_global_key_event(app: &mut App, key: KeyEvent) -> Result<()> {
    match key.code {
        KeyCode::Char('q') => {
            app.event_tx.send(AppEvent::ExitApplication)?;
        }

        KeyCode::Char('1') => app.event_tx.send(AppEvent::SetMainView(MainView::Tracks))?,
        KeyCode::Char('2') => app.event_tx.send(AppEvent::SetMainView(MainView::Browse))?,
        KeyCode::Char('3') => app
            .event_tx
            .send(AppEvent::ShowPlaylists(app.playlists_view.source))?,
        KeyCode::Char('4') | KeyCode::Char('F') => app.event_tx.send(AppEvent::ShowFavourites)?,

        // Navigation: Down / j
        KeyCode::Char('j') | KeyCode::Down => match app.main_view {
            MainView::Tracks => app.tracks_view.select_next(app.session.tracks().len()),
            MainView::Browse => app.browser.next(),
            MainView::Playlists => app.playlists_view.next(),
            MainView::Favourites => app.favourites_view.next(),
        },

        // Navigation: Up / k
        KeyCode::Char('k') | KeyCode::Up => match app.main_view {
            MainView::Tracks => app.tracks_view.select_previous(app.session.tracks().len()),
            MainView::Browse => app.browser.previous(),
            MainView::Playlists => app.playlists_view.previous(),
            MainView::Favourites => app.favourites_view.previous(),
        },

        KeyCode::Enter => activate_selection(app)?,

        // Browser: descend into / climb out of collections
        KeyCode::Char('l') => {
            if app.main_view == MainView::Browse {
                if let Some(entry) = app.browser.selected().filter(|e| e.is_directory) {
                    let path = entry.raw_path.clone();
                    app.browser.descend(path.clone());
                    app.task_tx.send(AppTask::ListDirectory { path })?;
                }
            }
        }
        KeyCode::Char('h') => {
            if app.main_view == MainView::Browse {
                if let Some(path) = app.browser.ascend() {
                    app.task_tx.send(AppTask::ListDirectory { path })?;
                }
            }
        }

        // Browser: append to the loaded list without replacing it
        KeyCode::Char('a') => {
            if app.main_view == MainView::Browse {
                if let Some(entry) = app.browser.selected() {
                    if entry.is_directory {
                        app.task_tx.send(AppTask::LoadDirectoryTracks {
                            path: entry.raw_path.clone(),
                            append: true,
                        })?;
                    } else if entry.is_playlist() {
                        app.task_tx.send(AppTask::LoadPlaylist {
                            path: entry.raw_path.clone(),
                            append: true,
                        })?;
                    }
                }
            }
        }

        // Re-list the current remote directory
        KeyCode::Char('S') => {
            if app.main_view == MainView::Browse {
                let path = app.browser.begin_refresh();
                app.task_tx.send(AppTask::ListDirectory { path })?;
            }
        }

        // Persisted queue
        KeyCode::Char('c') => {
            if app.main_view == MainView::Tracks {
                if let Some(track) = selected_track(app) {
                    app.task_tx.send(AppTask::Enqueue(track))?;
                }
            }
        }
        KeyCode::Char('C') => app.task_tx.send(AppTask::ClearQueue)?,

        // Favourites
        KeyCode::Char('f') => match app.main_view {
            MainView::Tracks => {
                if let Some(track) = selected_track(app) {
                    app.task_tx.send(AppTask::AddFavouriteTrack(track))?;
                }
            }
            MainView::Browse => {
                if let Some(entry) = app.browser.selected().filter(|e| e.is_directory) {
                    app.task_tx
                        .send(AppTask::AddFavouriteAlbum(entry.raw_path.clone()))?;
                }
            }
            _ => {}
        },

        KeyCode::Delete | KeyCode::Char('D') => {
            if app.main_view == MainView::Tracks {
                if let Some(index) = app.tracks_view.selected() {
                    if app.session.remove(index).is_some() {
                        let len = app.session.tracks().len();
                        let selection = (len > 0).then(|| index.min(len - 1));
                        app.tracks_view.table_state.select(selection);
                        handlers::set_message(app, "Track removed".to_string());
                    }
                }
            }
        }

        // Playback controls
        KeyCode::Char(' ') | KeyCode::Char('x') => app.audio_player.toggle_pause()?,
        KeyCode::Char('v') => app.audio_player.stop()?,
        KeyCode::Char('z') => {
            if let Some(previous) = app.session.previous() {
                handlers::play_at(app, previous)?;
            }
        }
        KeyCode::Char('b') => app.task_tx.send(AppTask::AdvanceQueue)?,
        KeyCode::Left => app.audio_player.seek(-SEEK_DELTA)?,
        KeyCode::Right => app.audio_player.seek(SEEK_DELTA)?,
        KeyCode::Char('+') | KeyCode::Char('=') => app.audio_player.adjust_volume(VOLUME_DELTA)?,
        KeyCode::Char('-') | KeyCode::Char('_') => app.audio_player.adjust_volume(-VOLUME_DELTA)?,

        _ => {}
    }

    Ok(())
}

/// Enter activates whatever the active view has selected.
fn activate_selection(app: &mut App) -> Result<()> {
    match app.main_view {
        MainView::Tracks => {
            if let Some(index) = app.tracks_view.selected() {
                handlers::play_at(app, index)?;
            }
        }

        MainView::Browse => {
            if let Some(entry) = app.browser.selected() {
                if entry.is_directory {
                    app.task_tx.send(AppTask::LoadDirectoryTracks {
                        path: entry.raw_path.clone(),
                        append: false,
                    })?;
                } else if entry.is_playlist() {
                    app.task_tx.send(AppTask::LoadPlaylist {
                        path: entry.raw_path.clone(),
                        append: false,
                    })?;
                } else if entry.is_audio() {
                    // Play the file on its own; its directory can be loaded
                    // with Enter on the directory itself.
                    let track = crate::model::Track::from_resource_path(&entry.raw_path);
                    app.session.load(vec![track], 0);
                    app.tracks_view.reset(1, Some(0));
                    handlers::play_at(app, 0)?;
                }
            }
        }

        MainView::Playlists => {
            if let Some(entry) = app.playlists_view.selected() {
                app.task_tx.send(AppTask::LoadPlaylist {
                    path: entry.raw_path.clone(),
                    append: false,
                })?;
            }
        }

        MainView::Favourites => {
            if let Some(album) = app.favourites_view.selected() {
                app.task_tx.send(AppTask::LoadDirectoryTracks {
                    path: album.clone(),
                    append: false,
                })?;
            }
        }
    }

    Ok(())
}

fn selected_track(app: &App) -> Option<crate::model::Track> {
    app.tracks_view
        .selected()
        .and_then(|index| app.session.track(index))
        .cloned()
}
