//! Editing modes selected by the chart editor's tools.

use serde::{Deserialize, Serialize};

/// What the active editing tool is currently picking.
///
/// Unrecognized names map to [`EditingMode::None`], the least visible state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum EditingMode {
    /// No selection task in progress.
    #[default]
    None,
    /// Picking a timing on the track.
    Timing,
    /// Picking a track position (timing plus lane).
    Track,
    /// Picking an arc coordinate on the wall.
    Coordinate,
}

impl EditingMode {
    /// Parse a mode name, case-insensitively.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "timing" => EditingMode::Timing,
            "track" => EditingMode::Track,
            "coordinate" => EditingMode::Coordinate,
            _ => EditingMode::None,
        }
    }

    /// Get display name for this mode.
    pub fn name(self) -> &'static str {
        match self {
            EditingMode::None => "none",
            EditingMode::Timing => "timing",
            EditingMode::Track => "track",
            EditingMode::Coordinate => "coordinate",
        }
    }

    /// Check if this mode picks on the track surface.
    pub fn picks_track(self) -> bool {
        matches!(self, EditingMode::Timing | EditingMode::Track)
    }

    /// Check if this mode picks on the wall surface.
    pub fn picks_wall(self) -> bool {
        self == EditingMode::Coordinate
    }
}

impl From<String> for EditingMode {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<&str> for EditingMode {
    fn from(name: &str) -> Self {
        Self::from_name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(EditingMode::from_name("timing"), EditingMode::Timing);
        assert_eq!(EditingMode::from_name("Track"), EditingMode::Track);
        assert_eq!(EditingMode::from_name(" COORDINATE "), EditingMode::Coordinate);
        assert_eq!(EditingMode::from_name("none"), EditingMode::None);
    }

    #[test]
    fn test_unknown_is_none() {
        assert_eq!(EditingMode::from_name("arctap"), EditingMode::None);
        assert_eq!(EditingMode::from(""), EditingMode::None);
    }

    #[test]
    fn test_name_roundtrip() {
        for mode in [
            EditingMode::None,
            EditingMode::Timing,
            EditingMode::Track,
            EditingMode::Coordinate,
        ] {
            assert_eq!(EditingMode::from_name(mode.name()), mode);
        }
    }

    #[test]
    fn test_surface_flags() {
        assert!(EditingMode::Timing.picks_track());
        assert!(EditingMode::Track.picks_track());
        assert!(!EditingMode::Coordinate.picks_track());
        assert!(!EditingMode::None.picks_track());

        assert!(EditingMode::Coordinate.picks_wall());
        assert!(!EditingMode::Track.picks_wall());
    }

    #[test]
    fn test_deserialize_lenient() {
        let mode: EditingMode = serde_json::from_str("\"coordinate\"").unwrap();
        assert_eq!(mode, EditingMode::Coordinate);
        let mode: EditingMode = serde_json::from_str("\"bogus\"").unwrap();
        assert_eq!(mode, EditingMode::None);
        assert_eq!(serde_json::to_string(&EditingMode::Timing).unwrap(), "\"timing\"");
    }
}
