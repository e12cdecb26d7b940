//! Grid attachment: snapping cursor coordinates to beat lines and lane lines.

use serde::{Deserialize, Serialize};

/// Snap mode for the chart grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnapMode {
    /// No snapping; coordinates pass through unchanged.
    None,
    /// Snap the timeline axis to beat lines only.
    Beatlines,
    /// Snap wall coordinates to lane lines only.
    Lanes,
    /// Snap to both beat lines and lane lines.
    #[default]
    All,
}

impl SnapMode {
    /// Cycle to the next snap mode.
    pub fn next(self) -> Self {
        match self {
            SnapMode::None => SnapMode::Beatlines,
            SnapMode::Beatlines => SnapMode::Lanes,
            SnapMode::Lanes => SnapMode::All,
            SnapMode::All => SnapMode::None,
        }
    }

    /// Check if beat line snapping is enabled.
    pub fn snaps_to_beatlines(self) -> bool {
        matches!(self, SnapMode::Beatlines | SnapMode::All)
    }

    /// Check if lane line snapping is enabled.
    pub fn snaps_to_lanes(self) -> bool {
        matches!(self, SnapMode::Lanes | SnapMode::All)
    }
}

/// Grid service queried by the cursor to attach coordinates to grid lines.
///
/// Implementations must be pure: the same input gives the same output for as
/// long as the grid configuration is unchanged.
pub trait GridSnap {
    /// Snap a track-axis (world z) coordinate to the nearest beat line.
    fn attach_beatline(&self, z: f32) -> f32;

    /// Snap an arc-space x coordinate to the nearest vertical lane line.
    fn attach_vertical_line(&self, arc_x: f32) -> f32;

    /// Snap an arc-space y coordinate to the nearest horizontal lane line.
    fn attach_horizontal_line(&self, arc_y: f32) -> f32;
}

/// Return the line closest to `value`, or `value` itself when there are no lines.
///
/// Lines need not be sorted. Non-finite lines are ignored; on a tie the first
/// line wins.
pub fn snap_to_nearest(value: f32, lines: &[f32]) -> f32 {
    let mut best = value;
    let mut best_dist = f32::INFINITY;
    for &line in lines {
        if !line.is_finite() {
            continue;
        }
        let dist = (line - value).abs();
        if dist < best_dist {
            best_dist = dist;
            best = line;
        }
    }
    best
}

/// Evenly spaced lines over `[start, end]` with `divisions` intervals.
pub fn divide_range(start: f32, end: f32, divisions: u32) -> Vec<f32> {
    if divisions == 0 {
        return vec![start];
    }
    let step = (end - start) / divisions as f32;
    (0..=divisions).map(|i| start + step * i as f32).collect()
}

/// Line-set grid: explicit beat line positions plus arc-space lane lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapGrid {
    pub mode: SnapMode,
    /// Beat line positions along world z.
    pub beatlines: Vec<f32>,
    /// Vertical lane lines in arc x.
    pub vertical_lines: Vec<f32>,
    /// Horizontal lane lines in arc y.
    pub horizontal_lines: Vec<f32>,
}

impl Default for SnapGrid {
    fn default() -> Self {
        Self {
            mode: SnapMode::default(),
            beatlines: Vec::new(),
            vertical_lines: divide_range(0.0, 1.0, 4),
            horizontal_lines: divide_range(0.0, 1.0, 4),
        }
    }
}

impl SnapGrid {
    /// Create an empty grid (everything passes through).
    pub fn new() -> Self {
        Self {
            mode: SnapMode::All,
            beatlines: Vec::new(),
            vertical_lines: Vec::new(),
            horizontal_lines: Vec::new(),
        }
    }

    /// Set beat lines every `spacing` units from the judgement line back along the track.
    pub fn with_uniform_beatlines(mut self, spacing: f32, count: usize) -> Self {
        self.beatlines = if spacing > 0.0 {
            (0..count).map(|i| -(i as f32) * spacing).collect()
        } else {
            Vec::new()
        };
        self
    }

    /// Set lane lines dividing the unit arc square.
    pub fn with_lane_divisions(mut self, vertical: u32, horizontal: u32) -> Self {
        self.vertical_lines = divide_range(0.0, 1.0, vertical);
        self.horizontal_lines = divide_range(0.0, 1.0, horizontal);
        self
    }

    /// Set the snap mode.
    pub fn with_mode(mut self, mode: SnapMode) -> Self {
        self.mode = mode;
        self
    }
}

impl GridSnap for SnapGrid {
    fn attach_beatline(&self, z: f32) -> f32 {
        if !self.mode.snaps_to_beatlines() {
            return z;
        }
        snap_to_nearest(z, &self.beatlines)
    }

    fn attach_vertical_line(&self, arc_x: f32) -> f32 {
        if !self.mode.snaps_to_lanes() {
            return arc_x;
        }
        snap_to_nearest(arc_x, &self.vertical_lines)
    }

    fn attach_horizontal_line(&self, arc_y: f32) -> f32 {
        if !self.mode.snaps_to_lanes() {
            return arc_y;
        }
        snap_to_nearest(arc_y, &self.horizontal_lines)
    }
}
