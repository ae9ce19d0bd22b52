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

//! MPV-backed audio playback engine and status polling.
//!
//! This module provides the core audio playback logic, leveraging `libmpv`
//! for audio decoding and streaming. It manages a background worker thread
//! that executes [`AudioPlayerCommand`]s and polls the engine's properties
//! every 500 ms, broadcasting a [`PlayerStatus`] snapshot to the UI.
//!
//! End-of-track detection deliberately rides on the status poll rather than
//! on MPV's own end-file events: the track is considered ended when the
//! engine has gone idle with the last observed playhead within a second of
//! the last observed duration.

use anyhow::{Context, Result};
use std::{
    sync::mpsc::{self, Receiver, Sender},
    thread,
    time::{Duration, Instant},
};
use tracing::info;

use crate::{
    events::AppEvent,
    player::{PlayerState, PlayerStatus},
};

const STATUS_POLL_INTERVAL: Duration = Duration::from_millis(500);

const DEFAULT_VOLUME: i32 = 80;

#[derive(Debug)]
pub(crate) enum AudioPlayerCommand {
    Play { source: String, label: String },
    TogglePause,
    Seek(i32),
    Stop,
    AdjustVolume(i32),
    SetVolume(u32),
}

/// Spawns the audio worker thread to process playback commands.
///
/// This function takes ownership of the command receiver and the event
/// sender, moving them into a dedicated background thread.
///
/// If the internal worker returns an error, it is caught here and broadcast
/// as a fatal application event.
pub(crate) fn spawn_player_worker(
    command_rx: Receiver<AudioPlayerCommand>,
    event_tx: Sender<AppEvent>,
) {
    let error_tx = event_tx.clone();

    thread::spawn(move || {
        if let Err(e) = audio_player_worker(command_rx, event_tx) {
            let _ = error_tx.send(AppEvent::FatalError(format!("MPV worker failure: {:?}", e)));
        }
    });
}

/// Tracks what the engine last told us, so the end of a track can still be
/// recognised after MPV has gone idle and dropped its properties.
struct EngineView {
    label: String,
    last_position: f64,
    last_duration: f64,
    volume: i32,
    active: bool,
}

impl EngineView {
    fn new() -> Self {
        Self {
            label: String::new(),
            last_position: 0.0,
            last_duration: 0.0,
            volume: DEFAULT_VOLUME,
            active: false,
        }
    }
}

/// The primary execution loop for the audio player backend.
///
/// Initializes a local `libmpv` context, then alternates between draining
/// the command channel and polling the engine status.
///
/// # Errors
///
/// Returns an error if the MPV context fails to initialize or if the event
/// channel closes.
fn audio_player_worker(
    command_rx: Receiver<AudioPlayerCommand>,
    event_tx: Sender<AppEvent>,
) -> Result<()> {
    let mut handler = (|| {
        let mut builder = mpv::MpvHandlerBuilder::new().context("Failed to create MPV builder")?;
        builder
            .set_option("vo", "null")
            .context("Failed to set no video output")?;
        builder.build().context("Failed to build MPV handler")
    })()?;

    let mut view = EngineView::new();
    let mut last_poll = Instant::now() - STATUS_POLL_INTERVAL;

    loop {
        process_commands(&mut handler, &command_rx, &mut view, &event_tx)?;

        // Drain the MPV event queue; it doubles as a short sleep. Playback
        // state is derived from the poll below, not from these events.
        let _ = handler.wait_event(0.05);

        if last_poll.elapsed() >= STATUS_POLL_INTERVAL {
            last_poll = Instant::now();
            let status = poll_status(&mut handler, &mut view);
            event_tx
                .send(AppEvent::PlayerStatus(status))
                .context("Failed to send player status")?;
        }
    }
}

/// Drains and executes all pending commands from the application channel.
fn process_commands(
    handler: &mut mpv::MpvHandler,
    command_rx: &mpsc::Receiver<AudioPlayerCommand>,
    view: &mut EngineView,
    event_tx: &mpsc::Sender<AppEvent>,
) -> Result<()> {
    while let Ok(command) = command_rx.try_recv() {
        match command {
            AudioPlayerCommand::Play { source, label } => {
                info!(%label, "starting playback");
                if let Err(e) = handler.command(&["loadfile", &source, "replace"]) {
                    // A refused source is a message, not a crash.
                    let _ = event_tx.send(AppEvent::Error(format!(
                        "Cannot play '{}': {:?}",
                        label, e
                    )));
                    continue;
                }
                handler.set_property("pause", false)?;
                handler.set_property("volume", view.volume as f64)?;
                view.label = label;
                view.last_position = 0.0;
                view.last_duration = 0.0;
                view.active = true;
            }
            AudioPlayerCommand::TogglePause => {
                handler.command(&["cycle", "pause"])?;
            }
            AudioPlayerCommand::Seek(delta) => {
                // Only seek while something is actually loaded.
                if handler.get_property::<f64>("time-pos").is_ok() {
                    handler.command(&["seek", &delta.to_string(), "relative"])?;
                }
            }
            AudioPlayerCommand::Stop => {
                handler.command(&["stop"])?;
                view.active = false;
                view.last_position = 0.0;
                view.last_duration = 0.0;
            }
            AudioPlayerCommand::AdjustVolume(delta) => {
                view.volume = (view.volume + delta).clamp(0, 100);
                handler.set_property("volume", view.volume as f64)?;
            }
            AudioPlayerCommand::SetVolume(volume) => {
                view.volume = (volume as i32).clamp(0, 100);
                handler.set_property("volume", view.volume as f64)?;
            }
        }
    }

    Ok(())
}

/// Reads the engine properties and derives the current playback state.
///
/// While the engine is busy, the playhead and duration are cached; once it
/// goes idle, a playhead within one second of the cached duration means the
/// track finished. That condition fires exactly once, after which the view
/// resets and subsequent polls report `Stopped`.
fn poll_status(handler: &mut mpv::MpvHandler, view: &mut EngineView) -> PlayerStatus {
    let idle = handler.get_property::<bool>("idle-active").unwrap_or(true);

    if !idle {
        if let Ok(position) = handler.get_property::<f64>("time-pos") {
            if position >= 0.0 {
                view.last_position = position;
            }
        }
        if let Ok(duration) = handler.get_property::<f64>("duration") {
            if duration > 0.0 {
                view.last_duration = duration;
            }
        }
        view.active = true;
    }

    let paused = handler.get_property::<bool>("pause").unwrap_or(false);

    let state = if idle {
        if view.active
            && view.last_duration > 0.0
            && view.last_position >= view.last_duration - 1.0
        {
            PlayerState::Ended
        } else {
            PlayerState::Stopped
        }
    } else if paused {
        PlayerState::Paused
    } else {
        PlayerState::Playing
    };

    let status = PlayerStatus {
        title: view.label.clone(),
        position_secs: if idle { 0.0 } else { view.last_position },
        duration_secs: if idle { 0.0 } else { view.last_duration },
        volume: view.volume as u32,
        state,
    };

    if state == PlayerState::Ended {
        view.active = false;
        view.last_position = 0.0;
        view.last_duration = 0.0;
    }

    status
}
