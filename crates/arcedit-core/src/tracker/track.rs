//! Hit testing against the horizontal track plane.

use glam::Vec3;
use kurbo::Point;

use super::FrameInput;
use crate::config::CursorConfig;
use crate::render::{Crosshair, RenderCommand, Renderable};
use crate::snap::GridSnap;
use crate::surface::{HitResult, PlaneSurface, track_half_width};

/// Casts the pointer ray onto the track and draws the beat-snapped crosshair.
#[derive(Debug, Clone)]
pub struct TrackPlaneHitTester {
    surface: PlaneSurface,
    half_width: f32,
    length: f32,
    hit: HitResult,
    crosshair: Crosshair,
}

impl TrackPlaneHitTester {
    pub fn new(config: &CursorConfig) -> Self {
        let half_width = track_half_width(0.0);
        Self {
            surface: PlaneSurface::track(half_width, config.track_length),
            half_width,
            length: config.track_length,
            hit: HitResult::miss(),
            crosshair: Crosshair::new(Renderable::TrackX, Renderable::TrackY),
        }
    }

    /// Run one frame.
    ///
    /// The raycast always happens; snapping and drawing only when `live`.
    /// Returns the snapped track z when the crosshair was drawn.
    pub fn update(
        &mut self,
        input: &FrameInput,
        live: bool,
        grid: &dyn GridSnap,
        config: &CursorConfig,
        out: &mut Vec<RenderCommand>,
    ) -> Option<f32> {
        self.half_width = track_half_width(input.beatline_enwiden_ratio);
        self.length = config.track_length;
        self.surface.fit_track(self.half_width, self.length);
        self.hit = self.surface.raycast(&input.ray, config.max_ray_distance);

        if !live {
            self.crosshair.set_enabled(false, out);
            return None;
        }

        self.crosshair.set_enabled(self.hit.hit, out);
        if !self.hit.hit {
            return None;
        }

        let z = grid.attach_beatline(self.hit.point.z);
        let x_edge = f64::from(self.half_width);
        let snapped = f64::from(z);
        let lateral = f64::from(self.hit.point.x);
        self.crosshair.across.draw(
            Point::new(-x_edge, snapped),
            Point::new(x_edge, snapped),
            out,
        );
        self.crosshair.along.draw(
            Point::new(lateral, 0.0),
            Point::new(lateral, -f64::from(self.length)),
            out,
        );
        Some(z)
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

    /// Last raw point with z attached to the nearest beat line.
    pub fn attached_point(&self, grid: &dyn GridSnap) -> Vec3 {
        let point = self.hit.point;
        Vec3::new(point.x, point.y, grid.attach_beatline(point.z))
    }

    pub fn half_width(&self) -> f32 {
        self.half_width
    }

    pub fn surface(&self) -> &PlaneSurface {
        &self.surface
    }

    pub fn crosshair(&self) -> &Crosshair {
        &self.crosshair
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::Ray;
    use crate::mode::EditingMode;
    use crate::snap::SnapGrid;

    fn frame(x: f32, z: f32, beatline_enwiden_ratio: f32) -> FrameInput {
        FrameInput {
            ray: Ray::new(Vec3::new(x, 10.0, z), Vec3::NEG_Y),
            beatline_enwiden_ratio,
            camera_enwiden_ratio: 0.0,
            mode: EditingMode::Track,
        }
    }

    fn grid() -> SnapGrid {
        SnapGrid::new().with_uniform_beatlines(1.5, 40)
    }

    #[test]
    fn test_attached_point_example() {
        let config = CursorConfig::default();
        let mut tester = TrackPlaneHitTester::new(&config);
        let mut out = Vec::new();
        let z = tester.update(&frame(2.0, -3.2, 0.0), true, &grid(), &config, &mut out);

        assert!((z.unwrap() + 3.0).abs() < 1e-5);
        let attached = tester.attached_point(&grid());
        assert!((attached.x - 2.0).abs() < 1e-5);
        assert!(attached.y.abs() < 1e-5);
        assert!((attached.z + 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_crosshair_geometry() {
        let config = CursorConfig::default();
        let mut tester = TrackPlaneHitTester::new(&config);
        let mut out = Vec::new();
        tester.update(&frame(2.0, -3.2, 0.0), true, &grid(), &config, &mut out);

        let across = tester.crosshair().across.segment().unwrap();
        assert!((across.p0.x + 8.5).abs() < 1e-6);
        assert!((across.p1.x - 8.5).abs() < 1e-6);
        assert!((across.p0.y + 3.0).abs() < 1e-5);

        let along = tester.crosshair().along.segment().unwrap();
        assert!((along.p0.x - 2.0).abs() < 1e-5);
        assert!((along.p1.y + 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_ratio_widens_crosshair() {
        let config = CursorConfig::default();
        let mut tester = TrackPlaneHitTester::new(&config);
        let mut out = Vec::new();
        tester.update(&frame(10.0, -3.0, 1.0), true, &grid(), &config, &mut out);
        assert!(tester.is_hit());
        assert!((tester.half_width() - 12.75).abs() < 1e-6);
        assert!((tester.crosshair().across.length() - 25.5).abs() < 1e-5);
    }

    #[test]
    fn test_miss_clears_lines() {
        let config = CursorConfig::default();
        let mut tester = TrackPlaneHitTester::new(&config);
        let mut out = Vec::new();
        tester.update(&frame(2.0, -3.2, 0.0), true, &grid(), &config, &mut out);
        tester.update(&frame(40.0, -3.2, 0.0), true, &grid(), &config, &mut out);

        assert!(!tester.is_hit());
        assert!(tester.crosshair().across.length().abs() < f64::EPSILON);
        assert!(tester.crosshair().along.length().abs() < f64::EPSILON);
        assert!(!tester.crosshair().is_enabled());
    }

    #[test]
    fn test_not_live_still_raycasts() {
        let config = CursorConfig::default();
        let mut tester = TrackPlaneHitTester::new(&config);
        let mut out = Vec::new();
        let z = tester.update(&frame(2.0, -3.2, 0.0), false, &grid(), &config, &mut out);

        assert!(z.is_none());
        assert!(tester.is_hit());
        assert!((tester.point().z + 3.2).abs() < 1e-5);
        assert_eq!(tester.crosshair().across.point_count(), 0);
        assert!(out.is_empty());
    }
}
