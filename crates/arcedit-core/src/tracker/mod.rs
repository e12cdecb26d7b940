//! Cursor tracking: turning the pointer ray into snapped editing coordinates.
//!
//! [`CursorTracker`] owns one hit tester per editing surface and runs them
//! once per frame:
//! - the track tester always raycasts, and draws its crosshair when the track is live
//! - the wall tester does the same for the wall
//! - the visibility policy decides which surface is live from the editing mode
//!
//! Collaborators (grid, arc mapping, timing) are passed in per call, so the
//! tracker holds no references and can be owned by whichever editor session
//! needs it.

mod marker;
mod track;
mod wall;

pub use marker::ArcTapMarker;
pub use track::TrackPlaneHitTester;
pub use wall::WallPlaneHitTester;

use glam::Vec3;
use kurbo::Point;

use crate::arc_space::ArcSpace;
use crate::camera::Ray;
use crate::config::CursorConfig;
use crate::mode::EditingMode;
use crate::render::{RenderCommand, Renderable};
use crate::snap::GridSnap;
use crate::timing::{TimingGroup, TimingLookup};
use crate::visibility::{VisibilityPolicy, VisibilityState};

/// External inputs of one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    pub ray: Ray,
    pub beatline_enwiden_ratio: f32,
    pub camera_enwiden_ratio: f32,
    pub mode: EditingMode,
}

impl FrameInput {
    /// Frame with both enwiden ratios at zero.
    pub fn new(ray: Ray, mode: EditingMode) -> Self {
        Self {
            ray,
            beatline_enwiden_ratio: 0.0,
            camera_enwiden_ratio: 0.0,
            mode,
        }
    }

    /// Set the enwiden ratios.
    pub fn with_ratios(mut self, beatline: f32, camera: f32) -> Self {
        self.beatline_enwiden_ratio = beatline;
        self.camera_enwiden_ratio = camera;
        self
    }

    fn sanitized(&self) -> Self {
        Self {
            beatline_enwiden_ratio: sanitize_ratio("beatline", self.beatline_enwiden_ratio),
            camera_enwiden_ratio: sanitize_ratio("camera", self.camera_enwiden_ratio),
            ..*self
        }
    }
}

/// Enwiden ratios are non-negative; anything else is treated as zero.
fn sanitize_ratio(name: &str, ratio: f32) -> f32 {
    if ratio.is_finite() && ratio >= 0.0 {
        ratio
    } else {
        log::warn!("Ignoring invalid {} enwiden ratio {}", name, ratio);
        0.0
    }
}

/// Grid and coordinate services used while snapping.
#[derive(Clone, Copy)]
pub struct SnapContext<'a> {
    pub grid: &'a dyn GridSnap,
    pub arc_space: &'a dyn ArcSpace,
}

impl<'a> SnapContext<'a> {
    pub fn new(grid: &'a dyn GridSnap, arc_space: &'a dyn ArcSpace) -> Self {
        Self { grid, arc_space }
    }
}

/// Tracks the pointer over the track and wall surfaces of one editor session.
#[derive(Debug, Clone)]
pub struct CursorTracker {
    config: CursorConfig,
    policy: VisibilityPolicy,
    visibility: VisibilityState,
    mode: EditingMode,
    track: TrackPlaneHitTester,
    wall: WallPlaneHitTester,
    marker: ArcTapMarker,
}

impl Default for CursorTracker {
    fn default() -> Self {
        Self::new(CursorConfig::default())
    }
}

impl CursorTracker {
    pub fn new(config: CursorConfig) -> Self {
        Self {
            policy: VisibilityPolicy::new(config.visible_when_idle),
            visibility: VisibilityState::hidden(),
            mode: EditingMode::None,
            track: TrackPlaneHitTester::new(&config),
            wall: WallPlaneHitTester::new(),
            marker: ArcTapMarker::new(),
            config,
        }
    }

    pub fn config(&self) -> &CursorConfig {
        &self.config
    }

    /// Keep the track crosshair up when idle. Applies from the next frame.
    pub fn set_visible_when_idle(&mut self, visible: bool) {
        self.config.visible_when_idle = visible;
        self.policy.visible_when_idle = visible;
    }

    /// Run one frame and return the render commands it produced.
    ///
    /// The track runs before the wall: a drawn track crosshair moves the wall
    /// panel to the snapped timing, and the wall raycasts at that depth.
    pub fn update(&mut self, input: &FrameInput, ctx: &SnapContext<'_>) -> Vec<RenderCommand> {
        let input = input.sanitized();
        let mut commands = Vec::new();

        self.mode = input.mode;
        let next = self.policy.evaluate(input.mode, self.marker.is_enabled());
        self.transition(next, &mut commands);

        let anchor = self
            .track
            .update(&input, next.track(), ctx.grid, &self.config, &mut commands);
        if let Some(z) = anchor {
            self.move_wall_panel(z, &mut commands);
        }

        self.wall
            .update(&input, next.wall(), ctx, &self.config, &mut commands);

        log::trace!(
            "Cursor frame: mode={} track_hit={} wall_hit={} commands={}",
            input.mode.name(),
            self.track.is_hit(),
            self.wall.is_hit(),
            commands.len()
        );
        commands
    }

    fn transition(&mut self, next: VisibilityState, out: &mut Vec<RenderCommand>) {
        if next == self.visibility {
            return;
        }
        log::debug!(
            "Cursor visibility ({}): track={} wall={} arc_tap={}",
            self.mode.name(),
            next.track(),
            next.wall(),
            next.arc_tap_cursor()
        );
        if next.wall_panel() != self.visibility.wall_panel() {
            out.push(RenderCommand::SetEnabled {
                target: Renderable::WallPanel,
                enabled: next.wall_panel(),
            });
        }
        self.visibility = next;
    }

    fn move_wall_panel(&mut self, z: f32, out: &mut Vec<RenderCommand>) {
        if z == self.wall.depth() {
            return;
        }
        log::debug!("Wall panel moved to z={}", z);
        self.wall.set_depth(z);
        out.push(RenderCommand::MoveWallPanel { z });
    }

    pub fn visibility(&self) -> VisibilityState {
        self.visibility
    }

    /// Mode seen by the last frame.
    pub fn mode(&self) -> EditingMode {
        self.mode
    }

    pub fn track(&self) -> &TrackPlaneHitTester {
        &self.track
    }

    pub fn wall(&self) -> &WallPlaneHitTester {
        &self.wall
    }

    pub fn is_track_hit(&self) -> bool {
        self.track.is_hit()
    }

    pub fn track_point(&self) -> Vec3 {
        self.track.point()
    }

    pub fn is_wall_hit(&self) -> bool {
        self.wall.is_hit()
    }

    pub fn wall_point(&self) -> Vec3 {
        self.wall.point()
    }

    /// Track point with z on the nearest beat line, regardless of mode.
    pub fn attached_track_point(&self, grid: &dyn GridSnap) -> Vec3 {
        self.track.attached_point(grid)
    }

    /// Wall point snapped to lane lines, regardless of mode.
    pub fn attached_wall_point(&self, ctx: &SnapContext<'_>) -> Vec3 {
        self.wall.attached_point(ctx)
    }

    /// Chart timing (ms) under the cursor, corrected by the audio offset.
    ///
    /// Zero until gameplay data is loaded.
    pub fn attached_timing(
        &self,
        grid: &dyn GridSnap,
        timing: &dyn TimingLookup,
        group: TimingGroup,
    ) -> f32 {
        if !timing.is_loaded() {
            return 0.0;
        }
        let point = self.attached_track_point(grid);
        timing.timing_for_position(-point.z * 1000.0, group) - timing.audio_offset()
    }

    pub fn marker(&self) -> &ArcTapMarker {
        &self.marker
    }

    pub fn arc_tap_cursor_enabled(&self) -> bool {
        self.marker.is_enabled()
    }

    pub fn arc_tap_cursor_is_sfx(&self) -> bool {
        self.marker.is_sfx()
    }

    pub fn arc_tap_cursor_position(&self) -> Point {
        self.marker.position()
    }

    /// Show or hide the arc-tap marker.
    pub fn set_arc_tap_cursor_enabled(&mut self, enabled: bool) -> Vec<RenderCommand> {
        let mut commands = self.marker.set_enabled(enabled);
        let next = self.policy.evaluate(self.mode, self.marker.is_enabled());
        self.transition(next, &mut commands);
        commands
    }

    /// Switch the arc-tap marker between its regular and SFX variants.
    pub fn set_arc_tap_cursor_is_sfx(&mut self, is_sfx: bool) -> Vec<RenderCommand> {
        self.marker.set_sfx(is_sfx)
    }

    pub fn set_arc_tap_cursor_position(&mut self, position: Point) -> Vec<RenderCommand> {
        self.marker.set_position(position)
    }
}
