//! Render-side effects of the cursor, expressed as commands.
//!
//! The cursor never touches a rendering backend. It owns the guide-line point
//! buffers and reports every change as a [`RenderCommand`]; a
//! [`CursorRenderer`] applies them to whatever draws the scene.

use kurbo::{Line, Point};
use serde::{Deserialize, Serialize};

/// Visual elements driven by the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Renderable {
    /// Track guide across the lanes at the snapped timing.
    TrackX,
    /// Track guide along the timeline at the pointer's lateral position.
    TrackY,
    /// Wall guide across the wall at the snapped height.
    WallX,
    /// Wall guide from the floor at the snapped lateral position.
    WallY,
    /// Translucent panel behind the wall guides.
    WallPanel,
    ArcTapCursor,
    SfxArcTapCursor,
}

/// A single side effect for the renderer to apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum RenderCommand {
    SetEnabled { target: Renderable, enabled: bool },
    /// Drop all accumulated points of a line renderer.
    ResetPoints { target: Renderable },
    /// Replace a line renderer's points with a single segment (surface-local 2D).
    DrawLine { target: Renderable, from: Point, to: Point },
    /// Move the wall panel along the track axis.
    MoveWallPanel { z: f32 },
    /// Move a marker proxy (surface-local 2D).
    MoveMarker { target: Renderable, position: Point },
}

/// Consumer of cursor render commands.
pub trait CursorRenderer {
    /// Apply one command.
    fn apply(&mut self, command: &RenderCommand);

    /// Apply a batch of commands in order.
    fn apply_all(&mut self, commands: &[RenderCommand]) {
        for command in commands {
            self.apply(command);
        }
    }
}

/// Renderer that just records what it was asked to do.
#[derive(Debug, Clone, Default)]
pub struct CommandLog {
    pub commands: Vec<RenderCommand>,
}

impl CommandLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return everything recorded so far.
    pub fn take(&mut self) -> Vec<RenderCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl CursorRenderer for CommandLog {
    fn apply(&mut self, command: &RenderCommand) {
        self.commands.push(command.clone());
    }
}

/// Point buffer of one line renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct GuideLine {
    target: Renderable,
    enabled: bool,
    points: Vec<Point>,
}

impl GuideLine {
    pub fn new(target: Renderable) -> Self {
        Self {
            target,
            enabled: false,
            points: Vec::new(),
        }
    }

    pub fn target(&self) -> Renderable {
        self.target
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The drawn segment, if any.
    pub fn segment(&self) -> Option<Line> {
        match self.points.as_slice() {
            [from, to] => Some(Line::new(*from, *to)),
            _ => None,
        }
    }

    /// Drawn length; zero when nothing is drawn.
    pub fn length(&self) -> f64 {
        self.segment().map_or(0.0, |line| (line.p1 - line.p0).hypot())
    }

    /// Replace the buffer with a single segment.
    pub fn draw(&mut self, from: Point, to: Point, out: &mut Vec<RenderCommand>) {
        self.points.clear();
        self.points.push(from);
        self.points.push(to);
        out.push(RenderCommand::DrawLine {
            target: self.target,
            from,
            to,
        });
    }

    /// Toggle the renderer. Any change also clears the buffer.
    pub fn set_enabled(&mut self, enabled: bool, out: &mut Vec<RenderCommand>) {
        if self.enabled == enabled {
            return;
        }
        self.enabled = enabled;
        self.points.clear();
        out.push(RenderCommand::SetEnabled {
            target: self.target,
            enabled,
        });
        out.push(RenderCommand::ResetPoints { target: self.target });
    }
}

/// The crosshair of two guide lines belonging to one surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Crosshair {
    /// Line parallel to the surface's width axis.
    pub across: GuideLine,
    /// Line parallel to the surface's height axis.
    pub along: GuideLine,
}

impl Crosshair {
    pub fn new(across: Renderable, along: Renderable) -> Self {
        Self {
            across: GuideLine::new(across),
            along: GuideLine::new(along),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.across.is_enabled()
    }

    /// Toggle both lines together.
    pub fn set_enabled(&mut self, enabled: bool, out: &mut Vec<RenderCommand>) {
        self.across.set_enabled(enabled, out);
        self.along.set_enabled(enabled, out);
    }
}
