//! Hit testing against the vertical wall plane.

use glam::Vec3;
use kurbo::Point;

use super::{FrameInput, SnapContext};
use crate::config::CursorConfig;
use crate::render::{Crosshair, RenderCommand, Renderable};
use crate::surface::{HitResult, PlaneSurface, track_half_width, wall_height};

/// Casts the pointer ray onto the wall and draws the lane-snapped crosshair.
#[derive(Debug, Clone)]
pub struct WallPlaneHitTester {
    surface: PlaneSurface,
    half_width: f32,
    height: f32,
    /// Track z the wall panel currently stands at.
    depth: f32,
    hit: HitResult,
    /// Snapped point of the last frame the crosshair was drawn.
    attached: Option<Vec3>,
    crosshair: Crosshair,
}

impl WallPlaneHitTester {
    pub fn new() -> Self {
        let half_width = track_half_width(0.0);
        let height = wall_height(0.0);
        Self {
            surface: PlaneSurface::wall(half_width, height, 0.0),
            half_width,
            height,
            depth: 0.0,
            hit: HitResult::miss(),
            attached: None,
            crosshair: Crosshair::new(Renderable::WallX, Renderable::WallY),
        }
    }

    /// Run one frame. The raycast always happens; snapping and drawing only when `live`.
    pub fn update(
        &mut self,
        input: &FrameInput,
        live: bool,
        ctx: &SnapContext<'_>,
        config: &CursorConfig,
        out: &mut Vec<RenderCommand>,
    ) {
        self.half_width = track_half_width(input.beatline_enwiden_ratio);
        self.height = wall_height(input.camera_enwiden_ratio);
        self.surface.fit_wall(self.half_width, self.height, self.depth);
        self.hit = self.surface.raycast(&input.ray, config.max_ray_distance);
        self.attached = None;

        if !live {
            self.crosshair.set_enabled(false, out);
            return;
        }

        self.crosshair.set_enabled(self.hit.hit, out);
        if !self.hit.hit {
            return;
        }

        let attached = self.attached_point(ctx);
        self.attached = Some(attached);
        let x_edge = f64::from(self.half_width);
        let x = f64::from(attached.x);
        let y = f64::from(attached.y);
        self.crosshair
            .across
            .draw(Point::new(-x_edge, y), Point::new(x_edge, y), out);
        self.crosshair
            .along
            .draw(Point::new(x, 0.0), Point::new(x, f64::from(self.height)), out);
    }

    /// Move the wall to a new track z. Takes effect on the next raycast.
    pub fn set_depth(&mut self, z: f32) {
        self.depth = z;
    }

    pub fn depth(&self) -> f32 {
        self.depth
    }

    pub fn is_hit(&self) -> bool {
        self.hit.hit
    }

    /// Raw intersection of the last frame.
    pub fn point(&self) -> Vec3 {
        self.hit.point
    }

    pub fn hit(&self) -> HitResult {
        self.hit
    }

    /// Last raw point snapped to lane lines in arc space, back in world x/y (z = 0).
    pub fn attached_point(&self, ctx: &SnapContext<'_>) -> Vec3 {
        let point = self.hit.point;
        let arc = ctx.arc_space;
        let x = arc.arc_x_to_world(ctx.grid.attach_vertical_line(arc.world_x_to_arc(point.x)));
        let y = arc.arc_y_to_world(ctx.grid.attach_horizontal_line(arc.world_y_to_arc(point.y)));
        Vec3::new(x, y, 0.0)
    }

    /// Snapped point computed during the last frame, if the crosshair was drawn.
    pub fn drawn_point(&self) -> Option<Vec3> {
        self.attached
    }

    pub fn half_width(&self) -> f32 {
        self.half_width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn surface(&self) -> &PlaneSurface {
        &self.surface
    }

    pub fn crosshair(&self) -> &Crosshair {
        &self.crosshair
    }
}

impl Default for WallPlaneHitTester {
    fn default() -> Self {
        Self::new()
    }
}
