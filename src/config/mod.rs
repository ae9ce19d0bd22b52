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

//! Application configuration.
//!
//! This module manages the application configuration file: the server
//! location and credentials, the collection root, the playlists directory,
//! and the optional local mirror of the collection. The per-user document
//! paths (queue, history, favourites) are all derived from here.

use serde::{Deserialize, Serialize};

use crate::queue::DocumentPaths;

const CONFIG_NAME: &str = "davui";

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AppConfig {
    pub version: u32,
    /// Base URL of the WebDAV server, e.g. `http://nas.local/music/`.
    pub server_url: String,
    pub username: String,
    pub password: String,
    /// Server path of the music collection root.
    pub root_path: String,
    /// Server path under which playlist documents live; a per-user
    /// subdirectory is appended when a username is configured.
    pub playlists_dir: String,
    /// Optional local directory mirroring the collection root; when set,
    /// playback opens local files instead of streaming.
    pub local_mirror: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server_url: "http://change-me.local/music/".into(),
            username: String::new(),
            password: String::new(),
            root_path: "/music/".into(),
            playlists_dir: "/music/lists/".into(),
            local_mirror: String::new(),
        }
    }
}

impl AppConfig {
    /// The playlists directory for the configured user, `/`-terminated.
    pub fn user_playlists_dir(&self) -> String {
        let mut dir = if self.playlists_dir.is_empty() {
            "/".to_string()
        } else {
            self.playlists_dir.clone()
        };
        if !dir.ends_with('/') {
            dir.push('/');
        }
        if !self.username.is_empty() {
            dir.push_str(&self.username);
            dir.push('/');
        }
        dir
    }

    pub fn local_mirror(&self) -> Option<&str> {
        (!self.local_mirror.is_empty()).then_some(self.local_mirror.as_str())
    }

    /// Locations of the persisted documents, derived from the per-user
    /// playlists directory.
    pub(crate) fn document_paths(&self) -> DocumentPaths {
        let user_dir = self.user_playlists_dir();
        DocumentPaths {
            root: self.root_path.clone(),
            queue: format!("{user_dir}queued.m3u"),
            played: format!("{user_dir}queue-played.m3u"),
            history: format!("{user_dir}history.m3u"),
            favourites: format!("{user_dir}favourites.m3u"),
            favourite_albums: format!("{user_dir}albums.txt"),
        }
    }
}

pub fn load_config() -> AppConfig {
    confy::load(CONFIG_NAME, None).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_directory_is_appended_and_slash_terminated() {
        let config = AppConfig {
            username: "maria".into(),
            playlists_dir: "/music/lists".into(),
            ..AppConfig::default()
        };
        assert_eq!(config.user_playlists_dir(), "/music/lists/maria/");

        let anonymous = AppConfig {
            username: String::new(),
            ..AppConfig::default()
        };
        assert_eq!(anonymous.user_playlists_dir(), "/music/lists/");
    }

    #[test]
    fn document_paths_live_in_the_user_directory() {
        let config = AppConfig {
            username: "maria".into(),
            ..AppConfig::default()
        };
        let paths = config.document_paths();
        assert_eq!(paths.queue, "/music/lists/maria/queued.m3u");
        assert_eq!(paths.history, "/music/lists/maria/history.m3u");
        assert_eq!(paths.root, "/music/");
    }
}
