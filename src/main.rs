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

//! # Remote Music Player TUI.
//!
//! A terminal-based player for a music collection served over WebDAV.
//!
//! This application coordinates a TUI frontend built with `ratatui` and a
//! background processing layer that talks to the remote server: directory
//! listings, playlist documents, a persisted play queue, history, and
//! favourites all live on the server and are read and rewritten as small
//! text documents.
//!
//! It uses an event-driven architecture where:
//!
//! * The **Main Thread** manages the terminal lifecycle and UI rendering.
//! * A **Task Worker** owns the WebDAV client and queue engine, handling all
//!   remote I/O via asynchronous task processing.
//! * A **Player Worker** owns the MPV handle, executing playback commands
//!   and polling the engine status.
//! * **Event Loops** capture user input and system ticks to drive the UI
//!   state.
//!
//! ## Architecture
//!
//! The application follows a strict setup-run-teardown pattern to ensure the
//! terminal state is preserved even in the event of a crash. Communication
//! between the UI and background workers is handled via `std::sync::mpsc`
//! channels; no mutable state is shared across threads.

mod browser;
mod commander;
mod components;
mod config;
mod events;
mod model;
mod player;
mod playlist;
mod queue;
mod remote;
mod render;
mod session;
mod tasks;
mod theme;
mod util;

use anyhow::{Context, Result};
use crossterm::{
    event::{self},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    fs::File,
    io::{self},
    sync::{
        Mutex,
        mpsc::{self, Receiver, Sender},
    },
    thread,
    time::Duration,
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::{
    browser::RemoteBrowser,
    commander::Commander,
    components::{FavouritesView, PlaylistsView, TracksView},
    config::AppConfig,
    events::{AppEvent, process_events},
    model::Track,
    player::{AudioPlayer, PlayerState},
    remote::paths::PathCodec,
    session::PlaybackSession,
    tasks::{AppTask, spawn_task_worker},
    theme::Theme,
};

const LOG_FILE: &str = "davui.log";

#[derive(Debug, PartialEq)]
enum MainView {
    Tracks,
    Browse,
    Playlists,
    Favourites,
}

/// Application state.
struct App {
    pub config: AppConfig,

    pub theme: Theme,
    pub main_view: MainView,

    pub event_tx: Sender<AppEvent>,
    pub event_rx: Receiver<AppEvent>,

    pub task_tx: Sender<AppTask>,

    pub audio_player: AudioPlayer,
    pub codec: PathCodec,

    pub session: PlaybackSession,
    pub browser: RemoteBrowser,

    pub tracks_view: TracksView,
    pub playlists_view: PlaylistsView,
    pub favourites_view: FavouritesView,

    pub commander: Commander,

    pub player_state: PlayerState,
    pub now_playing: Option<Track>,
    pub player_time: f64,
    pub player_duration: f64,
    pub volume: u32,

    pub status_message: String,
    pub message_ticks: u8,
}

impl App {
    /// Create a new instance of application state.
    pub fn new(config: AppConfig, task_tx: Sender<AppTask>) -> Result<Self> {
        let (event_tx, event_rx) = mpsc::channel();

        let audio_player_event_tx = event_tx.clone();

        let codec = PathCodec::new(&config.server_url, &config.username, &config.password);
        let browser = RemoteBrowser::new(config.root_path.clone());

        Ok(Self {
            theme: Theme::default(),
            main_view: MainView::Browse,
            event_tx,
            event_rx,
            task_tx,
            audio_player: AudioPlayer::new(audio_player_event_tx)?,
            codec,
            session: PlaybackSession::new(),
            browser,
            tracks_view: TracksView::new(),
            playlists_view: PlaylistsView::new(),
            favourites_view: FavouritesView::new(),
            commander: Commander::new(),
            player_state: PlayerState::Stopped,
            now_playing: None,
            player_time: 0.0,
            player_duration: 0.0,
            volume: 0,
            status_message: String::new(),
            message_ticks: 0,
            config,
        })
    }
}

/// The entry point of the application.
///
/// Sets up logging and the communication channels, initializes the
/// application state, manages the terminal lifecycle, and returns an error
/// if any part of the execution fails.
fn main() -> Result<()> {
    init_logging()?;

    let config = config::load_config();

    let (task_tx, task_rx) = mpsc::channel();

    let mut app = App::new(config, task_tx).context("Failed to initalise application")?;

    let mut terminal = setup_terminal(&app)?;
    let res = run(&mut terminal, &mut app, task_rx);
    restore_terminal(&mut terminal);

    res.context("Application error occurred")
}

/// Initializes tracing to a log file; stdout belongs to the TUI.
fn init_logging() -> Result<()> {
    let log_file = File::create(LOG_FILE).context("Failed to create log file")?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(Mutex::new(log_file)),
        )
        .with(EnvFilter::from_default_env().add_directive("davui=info".parse()?))
        .init();

    Ok(())
}

/// Prepares the terminal for the TUI application.
///
/// This function performs the following side effects:
/// * Sets the terminal background color based on the provided theme.
/// * Enables raw mode to capture all keyboard input.
/// * Switches the terminal to the alternate screen buffer.
///
/// # Errors
///
/// Returns an error if raw mode cannot be enabled or if the alternate screen
/// cannot be entered.
fn setup_terminal(app: &App) -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    // Set the background of the entire terminal window, without this we'd get
    // a thin black outline
    util::term::set_terminal_bg(&theme::Theme::to_hex(app.theme.background_colour));

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;

    Ok(terminal)
}

/// Restores the terminal to its original state.
///
/// This reverses the changes made by [`setup_terminal`], including disabling
/// raw mode, leaving the alternate screen, and resetting the background color.
/// It also ensures the cursor is made visible again.
///
/// This function is designed to be "best-effort" and does not return a result,
/// as it is typically called during cleanup or panic handling.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) {
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    util::term::reset_terminal_bg();
    terminal.show_cursor().ok();
}

/// Starts the application's background workers and enters the main event loop.
///
/// This function spawns several long-running background threads:
/// * A task worker to process remote [`AppTask`]s against the WebDAV server.
/// * An input thread to poll for system keyboard events.
/// * A tick thread to trigger periodic UI refreshes.
///
/// After spawning the workers, it hands control to [`process_events`] to
/// manage the UI and state updates.
///
/// # Errors
///
/// Returns an error if the event processing loop encounters an unrecoverable
/// application error.
fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    task_rx: Receiver<AppTask>,
) -> Result<()> {
    // Spawn a background worker to process remote tasks asynchronously.
    let task_event_tx = app.event_tx.clone();
    spawn_task_worker(&app.config, task_rx, task_event_tx);

    // Spawn a thread to translate raw key events to application events.
    let tx_keys = app.event_tx.clone();
    thread::spawn(move || {
        loop {
            if let Ok(event::Event::Key(key)) = event::read() {
                tx_keys.send(AppEvent::Key(key)).ok();
            }
        }
    });

    // Spawn a thread to send a periodic tick application event, this is
    // effectively the minimum "frame rate" for rendering the TUI application.
    let tx_tick = app.event_tx.clone();
    thread::spawn(move || {
        loop {
            let _ = tx_tick.send(AppEvent::Tick);
            thread::sleep(Duration::from_millis(250));
        }
    });

    // Initial trigger to populate the browser with the collection root
    app.task_tx
        .send(AppTask::ListDirectory {
            path: app.config.root_path.clone(),
        })
        .unwrap();

    // Application event loop, process events until the user quits
    process_events(terminal, app)
}
