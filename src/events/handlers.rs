use anyhow::Result;
use tracing::error;

use crate::{
    App, MainView,
    components::playlists::PlaylistSource,
    config::AppConfig,
    model::{Resource, Track},
    player::{PlayerState, PlayerStatus},
    remote::paths::{self, PathCodec},
    session::Advance,
    tasks::AppTask,
};

// Status messages linger for this many UI ticks (250 ms each).
const MESSAGE_TICKS: u8 = 12;

pub(super) fn handle_set_main_view(app: &mut App, main_view: MainView) {
    app.main_view = main_view;
}

pub(super) fn handle_directory_listed(app: &mut App, path: String, entries: Vec<Resource>) {
    app.browser.set_entries(&path, entries);
}

pub(super) fn handle_playlists_listed(app: &mut App, entries: Vec<Resource>) {
    app.playlists_view.set_entries(entries);
}

pub(super) fn handle_favourite_albums_listed(app: &mut App, albums: Vec<String>) {
    app.favourites_view.set_albums(albums);
}

pub(super) fn handle_tracks_loaded(app: &mut App, tracks: Vec<Track>, append: bool) {
    if append {
        app.session.append(tracks);
    } else {
        app.session.load(tracks, 0);
        app.main_view = MainView::Tracks;
    }
    app.tracks_view
        .reset(app.session.tracks().len(), app.session.cursor());
}

/// The current track ended (or next was requested) and the task worker has
/// popped the persisted queue: a queued track always wins, then the loaded
/// list, then idle.
pub(super) fn handle_queue_advanced(app: &mut App, queued: Option<Track>) -> Result<()> {
    match app.session.advance(queued) {
        Advance::Queued(track) => {
            set_message(app, format!("Playing from queue: {}", track.display_name));
            play_track(app, &track, true)?;
        }
        Advance::Next(index) => play_at(app, index)?,
        Advance::EndOfList => set_message(app, "End of list".to_string()),
    }

    Ok(())
}

pub(super) fn handle_save_loaded_as(app: &mut App, name: String) -> Result<()> {
    if app.session.is_empty() {
        set_message(app, "Nothing to save".to_string());
        return Ok(());
    }
    app.task_tx.send(AppTask::SavePlaylist {
        name,
        tracks: app.session.tracks().to_vec(),
    })?;

    Ok(())
}

pub(super) fn handle_add_selected_to_playlist(app: &mut App, name: String) -> Result<()> {
    let selected = app
        .tracks_view
        .selected()
        .and_then(|index| app.session.track(index))
        .cloned();
    match selected {
        Some(track) => app.task_tx.send(AppTask::AppendToPlaylist { name, track })?,
        None => set_message(app, "No track selected".to_string()),
    }

    Ok(())
}

pub(super) fn handle_show_playlists(app: &mut App, source: PlaylistSource) -> Result<()> {
    app.playlists_view.source = source;
    let dir = match source {
        PlaylistSource::User => app.config.user_playlists_dir(),
        PlaylistSource::Root => app.config.root_path.clone(),
    };
    app.task_tx.send(AppTask::ListPlaylists { dir })?;
    app.main_view = MainView::Playlists;

    Ok(())
}

pub(super) fn handle_show_favourites(app: &mut App) -> Result<()> {
    app.task_tx.send(AppTask::ListFavouriteAlbums)?;
    app.main_view = MainView::Favourites;

    Ok(())
}

pub(super) fn handle_clear_loaded(app: &mut App) {
    app.session.clear();
    app.tracks_view.reset(0, None);
    set_message(app, "Track list cleared".to_string());
}

pub(super) fn handle_set_volume(app: &mut App, volume: u32) -> Result<()> {
    app.audio_player.set_volume(volume)?;

    Ok(())
}

/// Applies a polled status snapshot. The transition into `Ended` is the sole
/// trigger for advancing playback; the advance itself is remote I/O, so it
/// is handed to the task worker.
pub(super) fn handle_player_status(app: &mut App, status: PlayerStatus) -> Result<()> {
    let ended = status.state == PlayerState::Ended && app.player_state != PlayerState::Ended;

    app.player_state = status.state;
    app.player_time = status.position_secs;
    app.player_duration = status.duration_secs;
    app.volume = status.volume;

    if ended {
        app.task_tx.send(AppTask::AdvanceQueue)?;
    }

    Ok(())
}

pub(super) fn handle_message(app: &mut App, message: String) {
    set_message(app, message);
}

pub(super) fn handle_error(app: &mut App, message: String) {
    error!("{message}");
    set_message(app, message);
}

pub(super) fn handle_tick(app: &mut App) {
    if app.message_ticks > 0 {
        app.message_ticks -= 1;
        if app.message_ticks == 0 {
            app.status_message.clear();
        }
    }
}

pub(super) fn set_message(app: &mut App, message: String) {
    app.status_message = message;
    app.message_ticks = MESSAGE_TICKS;
}

/// Selects and plays a track of the loaded list, moving both the playback
/// cursor and the table selection to it.
pub(super) fn play_at(app: &mut App, index: usize) -> Result<()> {
    let Some(track) = app.session.select(index).cloned() else {
        return Ok(());
    };
    app.tracks_view.table_state.select(Some(index));
    play_track(app, &track, false)
}

/// Starts playback of a track, recording history for list plays. Queue pops
/// already land in the played-queue log instead.
pub(super) fn play_track(app: &mut App, track: &Track, from_queue: bool) -> Result<()> {
    let source = playable_source(&app.config, &app.codec, &track.resource_path);
    let label = if from_queue {
        format!("[Queue] {}", track.display_name)
    } else {
        track.display_name.clone()
    };

    app.audio_player.play(&source, &label)?;
    app.now_playing = Some(track.clone());

    if !from_queue {
        // History is fire-and-forget; playback must not wait on the remote.
        app.task_tx
            .send(AppTask::RecordHistory(track.resource_path.clone()))?;
    }

    Ok(())
}

/// The playable form of a track: a path under the local mirror when one is
/// configured, otherwise a stream URI with embedded credentials.
fn playable_source(config: &AppConfig, codec: &PathCodec, path: &str) -> String {
    match config.local_mirror() {
        Some(mirror) => paths::local_mirror_path(path, &config.root_path, mirror),
        None => codec.stream_uri(path),
    }
}
