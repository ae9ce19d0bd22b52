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

//! Asynchronous application task processing.
//!
//! This module implements the command pattern used to offload remote I/O
//! from the main UI thread. It provides a dedicated worker loop that owns
//! the WebDAV store and the queue engine, translates [`AppTask`] requests
//! into remote operations, and broadcasts the results back to the
//! application via [`AppEvent`]s.
//!
//! Every remote operation that can fail reports its outcome as a
//! status-line message; the store and engine have already logged the
//! underlying error kind by the time it degrades to an empty result here.

use anyhow::Result;
use std::{
    sync::mpsc::{Receiver, Sender},
    thread,
};

use crate::{
    config::AppConfig,
    events::AppEvent,
    model::Track,
    queue::QueueEngine,
    remote::store::{RemoteError, RemoteStore},
};

#[derive(Debug)]
pub(crate) enum AppTask {
    ListDirectory { path: String },
    LoadDirectoryTracks { path: String, append: bool },
    LoadPlaylist { path: String, append: bool },
    LoadNamedPlaylist { name: String },
    ListPlaylists { dir: String },
    SavePlaylist { name: String, tracks: Vec<Track> },
    AppendToPlaylist { name: String, track: Track },

    Enqueue(Track),
    AdvanceQueue,
    ClearQueue,

    RecordHistory(String),

    AddFavouriteTrack(Track),
    AddFavouriteAlbum(String),
    ListFavouriteAlbums,
}

/// Spawns a background thread to process application tasks.
///
/// The worker initializes its own store handle and queue engine (they share
/// one HTTP connection pool) and enters a blocking loop, listening for
/// incoming [`AppTask`]s.
///
/// # Arguments
///
/// * `config` - The application configuration.
/// * `task_rx` - The receiving end of the task channel.
/// * `event_tx` - The sending end of the channel for broadcasting results.
pub(crate) fn spawn_task_worker(
    config: &AppConfig,
    task_rx: Receiver<AppTask>,
    event_tx: Sender<AppEvent>,
) {
    let config = config.clone();

    thread::spawn(move || {
        let store = RemoteStore::new(&config.server_url, &config.username, &config.password);
        let engine = QueueEngine::new(store.clone(), config.document_paths());

        while let Ok(task) = task_rx.recv() {
            if let Err(e) = handle_task(&config, &store, &engine, task, &event_tx) {
                let _ = event_tx.send(AppEvent::Error(e.to_string()));
            }
        }
    });
}

/// Orchestrates the execution of a single task and sends the result back
/// through the application event channel.
fn handle_task(
    config: &AppConfig,
    store: &RemoteStore,
    engine: &QueueEngine<RemoteStore>,
    task: AppTask,
    event_tx: &Sender<AppEvent>,
) -> Result<()> {
    match task {
        AppTask::ListDirectory { path } => {
            let entries = match store.list_directory(&path) {
                Ok(entries) => entries,
                Err(err) => {
                    event_tx.send(AppEvent::Error(listing_message(&path, &err)))?;
                    vec![]
                }
            };
            event_tx.send(AppEvent::DirectoryListed { path, entries })?;
        }

        AppTask::LoadDirectoryTracks { path, append } => {
            let entries = match store.list_directory(&path) {
                Ok(entries) => entries,
                Err(err) => {
                    event_tx.send(AppEvent::Error(listing_message(&path, &err)))?;
                    vec![]
                }
            };
            let tracks: Vec<Track> = entries
                .iter()
                .filter(|entry| !entry.is_directory && entry.is_audio())
                .map(|entry| Track::from_resource_path(&entry.raw_path))
                .collect();
            event_tx.send(AppEvent::Message(format!("Loaded {} tracks", tracks.len())))?;
            event_tx.send(AppEvent::TracksLoaded { tracks, append })?;
        }

        AppTask::LoadPlaylist { path, append } => {
            let tracks = engine.load_playlist(&path);
            if tracks.is_empty() {
                event_tx.send(AppEvent::Message("Playlist is empty".into()))?;
            } else {
                event_tx.send(AppEvent::Message(format!("Loaded {} tracks", tracks.len())))?;
            }
            event_tx.send(AppEvent::TracksLoaded { tracks, append })?;
        }

        AppTask::LoadNamedPlaylist { name } => {
            let path = playlist_path(config, &name);
            handle_task(
                config,
                store,
                engine,
                AppTask::LoadPlaylist {
                    path,
                    append: false,
                },
                event_tx,
            )?;
        }

        AppTask::ListPlaylists { dir } => {
            let entries = match store.list_directory(&dir) {
                Ok(entries) => entries,
                Err(err) => {
                    event_tx.send(AppEvent::Error(listing_message(&dir, &err)))?;
                    vec![]
                }
            };
            let playlists: Vec<_> = entries
                .into_iter()
                .filter(|entry| !entry.is_directory && entry.is_playlist())
                .collect();
            event_tx.send(AppEvent::PlaylistsListed { entries: playlists })?;
        }

        AppTask::SavePlaylist { name, tracks } => {
            let path = playlist_path(config, &name);
            let message = if engine.save_playlist(&path, &tracks) {
                format!("Saved {name}")
            } else {
                format!("Failed to save {name}")
            };
            event_tx.send(AppEvent::Message(message))?;
        }

        AppTask::AppendToPlaylist { name, track } => {
            let path = playlist_path(config, &name);
            let message = if engine.append_to_playlist(&path, &track) {
                format!("Added to {name}")
            } else {
                format!("Failed to update {name}")
            };
            event_tx.send(AppEvent::Message(message))?;
        }

        AppTask::Enqueue(track) => {
            let message = if engine.enqueue(&track) {
                format!("Queued: {}", track.display_name)
            } else {
                "Failed to update the queue".to_string()
            };
            event_tx.send(AppEvent::Message(message))?;
        }

        AppTask::AdvanceQueue => {
            event_tx.send(AppEvent::QueueAdvanced(engine.dequeue()))?;
        }

        AppTask::ClearQueue => {
            let message = if engine.clear_queue() {
                "Queue cleared".to_string()
            } else {
                "Failed to clear the queue".to_string()
            };
            event_tx.send(AppEvent::Message(message))?;
        }

        AppTask::RecordHistory(path) => {
            // Fire-and-forget: playback has already started, a failed
            // history write is only worth a log line.
            engine.record_history(&path);
        }

        AppTask::AddFavouriteTrack(track) => {
            let message = if engine.add_favourite_track(&track) {
                format!("Favourite: {}", track.display_name)
            } else {
                "Failed to update favourites".to_string()
            };
            event_tx.send(AppEvent::Message(message))?;
        }

        AppTask::AddFavouriteAlbum(path) => {
            let message = if engine.add_favourite_album(&path) {
                "Album added to favourites".to_string()
            } else {
                "Failed to update favourite albums".to_string()
            };
            event_tx.send(AppEvent::Message(message))?;
        }

        AppTask::ListFavouriteAlbums => {
            let albums = engine.list_favourite_albums();
            if albums.is_empty() {
                event_tx.send(AppEvent::Message("No favourite albums yet".into()))?;
            }
            event_tx.send(AppEvent::FavouriteAlbumsListed(albums))?;
        }
    }

    Ok(())
}

fn playlist_path(config: &AppConfig, name: &str) -> String {
    let mut name = name.to_string();
    if !name.to_lowercase().ends_with(".m3u") {
        name.push_str(".m3u");
    }
    format!("{}{}", config.user_playlists_dir(), name)
}

fn listing_message(path: &str, err: &RemoteError) -> String {
    format!("Listing of {path} failed: {err}")
}
