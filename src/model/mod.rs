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

//! Domain models and core data structures.
//!
//! This module defines the central entities of the application—remote
//! resources as reported by directory listings, and playable track
//! references—used for browsing and playback.

use crate::remote::paths;

/// File extensions treated as playable audio when loading a directory.
const AUDIO_EXTENSIONS: [&str; 6] = [".mp3", ".ogg", ".flac", ".wav", ".m4a", ".opus"];

/// A file or directory entry as reported by a remote listing call.
///
/// `raw_path` is the server-supplied, percent-encoded href and is the only
/// stable identifier for the resource across calls.
#[derive(Debug, Clone)]
pub(crate) struct Resource {
    pub(crate) raw_name: String,
    pub(crate) raw_path: String,
    pub(crate) is_directory: bool,
}

impl Resource {
    /// The decoded, human-readable name of this entry.
    pub(crate) fn display_name(&self) -> String {
        paths::percent_decode(&self.raw_name)
    }

    pub(crate) fn is_audio(&self) -> bool {
        let lower = self.raw_name.to_lowercase();
        AUDIO_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
    }

    pub(crate) fn is_playlist(&self) -> bool {
        self.raw_name.to_lowercase().ends_with(".m3u")
    }
}

/// A playable track reference.
///
/// `resource_path` may be absolute-on-server, scheme-relative, or a raw line
/// as stored in a playlist document; it is normalized before persistence and
/// percent-encoded before HTTP use.
#[derive(Debug, Clone)]
pub(crate) struct Track {
    pub(crate) display_name: String,
    pub(crate) resource_path: String,
    pub(crate) album_name: String,
}

impl Track {
    /// Builds a track from a resource path, deriving the display name and
    /// album from the decoded trailing path segments.
    pub(crate) fn from_resource_path(path: &str) -> Self {
        let decoded = paths::percent_decode(path);
        let trimmed = decoded.trim_end_matches('/');
        let mut segments = trimmed.rsplit('/');
        let display_name = segments.next().unwrap_or(trimmed).to_string();
        let album_name = segments
            .next()
            .filter(|s| !s.is_empty() && !s.contains("://"))
            .unwrap_or("-")
            .to_string();

        Self {
            display_name,
            resource_path: path.to_string(),
            album_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_name_and_album_from_path_segments() {
        let track = Track::from_resource_path("/music/Some%20Album/01%20-%20Song.mp3");
        assert_eq!(track.display_name, "01 - Song.mp3");
        assert_eq!(track.album_name, "Some Album");
        assert_eq!(track.resource_path, "/music/Some%20Album/01%20-%20Song.mp3");
    }

    #[test]
    fn track_album_falls_back_for_bare_names() {
        let track = Track::from_resource_path("song.mp3");
        assert_eq!(track.display_name, "song.mp3");
        assert_eq!(track.album_name, "-");
    }

    #[test]
    fn audio_and_playlist_detection() {
        let file = Resource {
            raw_name: "Track.FLAC".into(),
            raw_path: "/music/Track.FLAC".into(),
            is_directory: false,
        };
        let list = Resource {
            raw_name: "mix.m3u".into(),
            raw_path: "/music/mix.m3u".into(),
            is_directory: false,
        };
        assert!(file.is_audio());
        assert!(!file.is_playlist());
        assert!(list.is_playlist());
        assert!(!list.is_audio());
    }
}
