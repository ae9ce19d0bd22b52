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

//! Command-line input logic and state management.
//!
//! This module implements the logic for the command-line processing
//! component, handling a text input component, and dispatching a
//! corresponding application event or background task when typing is
//! finished and a command is submitted.

use std::sync::mpsc::Sender;

use anyhow::Result;
use crossterm::event::{Event, KeyCode};
use tui_input::{Input, backend::crossterm::EventHandler};

use crate::{MainView, components::playlists::PlaylistSource, events::AppEvent, tasks::AppTask};

pub(crate) struct Commander {
    active: bool,
    pub(crate) input: Input,
}

impl Commander {
    pub(crate) fn new() -> Self {
        Self {
            active: false,
            input: Input::default(),
        }
    }

    pub(crate) fn active(&self) -> bool {
        self.active
    }

    pub(crate) fn handle_event(
        &mut self,
        event: Event,
        task_tx: &Sender<AppTask>,
        event_tx: &Sender<AppEvent>,
    ) -> bool {
        if self.active {
            match event {
                Event::Key(key_event) => {
                    match key_event.code {
                        KeyCode::Esc => {
                            self.active = false;
                            self.input.reset();
                            true
                        }

                        KeyCode::Enter => {
                            let buffer = self.input.value().trim().to_string();
                            if !buffer.is_empty() {
                                let _ = self.run_command(&buffer, task_tx, event_tx);
                            }
                            self.input.reset();
                            self.active = false;
                            true
                        }

                        _ => {
                            // Delegate all key events to the managed input component.
                            self.input.handle_event(&event);
                            true
                        }
                    }
                }

                _ => false,
            }
        } else {
            match event {
                Event::Key(key_event) => match key_event.code {
                    KeyCode::Char(':') => {
                        self.active = true;
                        true
                    }

                    _ => false,
                },

                _ => false,
            }
        }
    }

    fn run_command(
        &self,
        buffer: &str,
        task_tx: &Sender<AppTask>,
        event_tx: &Sender<AppEvent>,
    ) -> Result<()> {
        let parts: Vec<&str> = buffer.split_whitespace().collect();

        match parts.as_slice() {
            ["q"] => event_tx.send(AppEvent::ExitApplication)?,

            ["save", name_parts @ ..] if !name_parts.is_empty() => {
                event_tx.send(AppEvent::SaveLoadedAs(name_parts.join(" ")))?
            }

            ["load", name_parts @ ..] if !name_parts.is_empty() => task_tx.send(
                AppTask::LoadNamedPlaylist {
                    name: name_parts.join(" "),
                },
            )?,

            ["add", name_parts @ ..] if !name_parts.is_empty() => {
                event_tx.send(AppEvent::AddSelectedToPlaylist(name_parts.join(" ")))?
            }

            ["lists"] => event_tx.send(AppEvent::ShowPlaylists(PlaylistSource::User))?,
            ["rootlists"] => event_tx.send(AppEvent::ShowPlaylists(PlaylistSource::Root))?,

            ["clear"] => event_tx.send(AppEvent::ClearLoaded)?,

            ["cq"] => task_tx.send(AppTask::ClearQueue)?,

            ["v", volume] => {
                if let Ok(volume) = volume.parse::<u32>() {
                    event_tx.send(AppEvent::SetVolume(volume))?;
                }
            }

            ["1"] => event_tx.send(AppEvent::SetMainView(MainView::Tracks))?,
            ["2"] => event_tx.send(AppEvent::SetMainView(MainView::Browse))?,
            ["3"] => event_tx.send(AppEvent::SetMainView(MainView::Playlists))?,
            ["4"] => event_tx.send(AppEvent::SetMainView(MainView::Favourites))?,

            [] => {} // empty (no command)

            [cmd, ..] => event_tx.send(AppEvent::Message(format!("Unknown command: {cmd}")))?,
        }

        Ok(())
    }
}
