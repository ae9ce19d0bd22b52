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

/// Formats a duration in whole seconds into a human-readable `MM:SS` string.
///
/// This is used primarily for displaying track positions and total durations
/// in the player interface. Fractional seconds from the engine's status poll
/// are truncated.
pub(crate) fn format_time(seconds: f64) -> String {
    let total_seconds = seconds.max(0.0) as u64;
    let mins = total_seconds / 60;
    let secs = total_seconds % 60;
    format!("{:02}:{:02}", mins, secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_style_formatting() {
        assert_eq!(format_time(0.0), "00:00");
        assert_eq!(format_time(65.7), "01:05");
        assert_eq!(format_time(3600.0), "60:00");
        assert_eq!(format_time(-3.0), "00:00");
    }
}
