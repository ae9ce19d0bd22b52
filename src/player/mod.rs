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

//! Audio playback control and state management.
//!
//! This module provides the high-level [`AudioPlayer`] interface used by the
//! UI to control music playback. It manages a background worker thread that
//! interfaces with the underlying audio library (MPV), ensuring that heavy
//! audio operations do not block the main application thread.
//!
//! The worker polls the engine's status on a fixed interval; that poll is
//! the only thing that detects the end of a track.

mod commands;

use std::sync::mpsc;

use anyhow::Result;

use crate::{events::AppEvent, player::commands::AudioPlayerCommand};

/// Represents the current playback status of the audio engine.
///
/// `Ended` is reported exactly once per track, when the poll observes the
/// engine gone idle with the playhead at the end of a known duration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum PlayerState {
    Playing,
    Paused,
    Stopped,
    Ended,
}

/// A snapshot of the engine state, polled on a fixed interval.
#[derive(Clone, Debug)]
pub(crate) struct PlayerStatus {
    pub(crate) title: String,
    pub(crate) position_secs: f64,
    pub(crate) duration_secs: f64,
    pub(crate) volume: u32,
    pub(crate) state: PlayerState,
}

/// A handle to the audio playback engine.
///
/// This struct acts as a command proxy; it does not perform audio processing
/// itself but instead sends instructions to a background worker thread.
pub(crate) struct AudioPlayer {
    /// Channel for sending commands to the background worker thread.
    command_tx: mpsc::Sender<AudioPlayerCommand>,
}

impl AudioPlayer {
    /// Spawns the audio worker thread and returns a new player handle.
    ///
    /// # Arguments
    ///
    /// * `event_tx` - A channel to send application-level events (status
    ///   snapshots or errors) back to the main event loop.
    pub(crate) fn new(event_tx: mpsc::Sender<AppEvent>) -> Result<Self> {
        let (command_tx, command_rx) = mpsc::channel::<AudioPlayerCommand>();

        commands::spawn_player_worker(command_rx, event_tx);

        Ok(Self { command_tx })
    }

    /// Instructs the worker to load and play a stream URI or local file.
    ///
    /// # Arguments
    ///
    /// * `source` - The stream URI or local path to play.
    /// * `label` - The display name reported back in status snapshots.
    pub(crate) fn play(&self, source: &str, label: &str) -> Result<()> {
        self.command_tx.send(AudioPlayerCommand::Play {
            source: source.to_string(),
            label: label.to_string(),
        })?;
        Ok(())
    }

    /// Toggles the playback state between paused and playing.
    pub(crate) fn toggle_pause(&self) -> Result<()> {
        self.command_tx.send(AudioPlayerCommand::TogglePause)?;
        Ok(())
    }

    /// Stop playback.
    pub(crate) fn stop(&self) -> Result<()> {
        self.command_tx.send(AudioPlayerCommand::Stop)?;
        Ok(())
    }

    /// Adjusts the playback position forward or backwards relative to the
    /// current position.
    ///
    /// # Arguments
    ///
    /// * `delta` - The amount to seek in seconds (positive or negative).
    pub(crate) fn seek(&self, delta: i32) -> Result<()> {
        self.command_tx.send(AudioPlayerCommand::Seek(delta))?;
        Ok(())
    }

    /// Adjusts the playback volume relative to the current level; the worker
    /// clamps to 0..=100.
    pub(crate) fn adjust_volume(&self, delta: i32) -> Result<()> {
        self.command_tx
            .send(AudioPlayerCommand::AdjustVolume(delta))?;
        Ok(())
    }

    /// Sets the playback volume to an absolute level, clamped to 0..=100.
    pub(crate) fn set_volume(&self, volume: u32) -> Result<()> {
        self.command_tx.send(AudioPlayerCommand::SetVolume(volume))?;
        Ok(())
    }
}
