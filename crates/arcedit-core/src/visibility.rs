//! Which editing surface is live.

use serde::Serialize;

use crate::mode::EditingMode;

/// Visibility flags of the cursor's visuals.
///
/// Only [`VisibilityPolicy::evaluate`] produces these; `wall_panel` always
/// equals `wall`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct VisibilityState {
    track: bool,
    wall: bool,
    wall_panel: bool,
    arc_tap_cursor: bool,
}

impl VisibilityState {
    /// Everything hidden.
    pub fn hidden() -> Self {
        Self::default()
    }

    pub fn track(&self) -> bool {
        self.track
    }

    pub fn wall(&self) -> bool {
        self.wall
    }

    pub fn wall_panel(&self) -> bool {
        self.wall_panel
    }

    pub fn arc_tap_cursor(&self) -> bool {
        self.arc_tap_cursor
    }
}

/// Decides the live surface from the editing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VisibilityPolicy {
    /// Keep the track crosshair up even when no tool is picking.
    pub visible_when_idle: bool,
}

impl VisibilityPolicy {
    pub fn new(visible_when_idle: bool) -> Self {
        Self { visible_when_idle }
    }

    /// Check if the track crosshair is live in `mode`.
    pub fn track_live(&self, mode: EditingMode) -> bool {
        self.visible_when_idle || mode.picks_track()
    }

    /// Check if the wall crosshair is live in `mode`.
    pub fn wall_live(&self, mode: EditingMode) -> bool {
        mode.picks_wall()
    }

    /// Flags for `mode`. The arc-tap marker flag is owned by the marker and passed through.
    pub fn evaluate(&self, mode: EditingMode, arc_tap_cursor: bool) -> VisibilityState {
        let wall = self.wall_live(mode);
        VisibilityState {
            track: self.track_live(mode),
            wall,
            wall_panel: wall,
            arc_tap_cursor,
        }
    }
}
