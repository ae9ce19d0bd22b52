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

//! Unicode symbols for the TUI.
//!
//! This module contains standardized icons used across the interface to
//! represent media controls, resource kinds, and system status. These are
//! selected for compatibility with most modern terminal emulators and fonts.

// Standard Media Controls (Unicode)
pub(crate) const ICON_PLAY: &str = "\u{25B6}";
pub(crate) const ICON_PAUSE: &str = "\u{23F8}";
pub(crate) const ICON_STOP: &str = "\u{23F9}";
pub(crate) const ICON_ENDED: &str = "\u{23ED}";

// Resource kinds in the browser (using Variation Selector-15 [\u{FE0E}]),
// this forces terminals to render the icons as monochrome text rather than
// colorful emojis, ensuring they respect the TUI's color styling.
pub(crate) const ICON_FOLDER: &str = "\u{1F4C1}\u{FE0E}";
pub(crate) const ICON_TRACK: &str = "\u{266A}";
pub(crate) const ICON_PLAYLIST: &str = "\u{1F4DC}\u{FE0E}";
