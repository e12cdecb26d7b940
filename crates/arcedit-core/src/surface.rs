//! Finite collision planes for the track and the wall.

use glam::Vec3;

use crate::camera::Ray;

/// Furthest distance along a pointer ray that still counts as a hit.
pub const MAX_RAY_DISTANCE: f32 = 120.0;

/// Length of the track surface along the timeline axis.
pub const TRACK_LENGTH: f32 = 100.0;

/// Half-width of the track at an enwiden ratio of zero.
pub const BASE_HALF_WIDTH: f32 = 8.5;

/// Height of the wall at a camera enwiden ratio of zero.
pub const BASE_WALL_HEIGHT: f32 = 5.5;

/// Extra wall height per unit of camera enwiden ratio.
pub const WALL_HEIGHT_PER_RATIO: f32 = 2.745;

const PARALLEL_EPSILON: f32 = 1.0e-6;

/// Half-width shared by both surfaces for a beatline enwiden ratio.
pub fn track_half_width(beatline_enwiden_ratio: f32) -> f32 {
    BASE_HALF_WIDTH * (1.0 + beatline_enwiden_ratio * 0.5)
}

/// Wall height for a camera enwiden ratio.
pub fn wall_height(camera_enwiden_ratio: f32) -> f32 {
    BASE_WALL_HEIGHT + camera_enwiden_ratio * WALL_HEIGHT_PER_RATIO
}

/// Which of the two editing surfaces a plane represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    /// Horizontal plane at `y = 0`, extending towards negative z.
    Track,
    /// Vertical plane facing the camera at the wall panel depth.
    Wall,
}

impl SurfaceKind {
    /// Plane normal and the two in-plane axes (width axis, height axis).
    fn axes(self) -> (Vec3, Vec3, Vec3) {
        match self {
            SurfaceKind::Track => (Vec3::Y, Vec3::X, Vec3::Z),
            SurfaceKind::Wall => (Vec3::Z, Vec3::X, Vec3::Y),
        }
    }
}

/// Outcome of casting a ray against a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitResult {
    pub hit: bool,
    /// Intersection in chart space; zero on a miss.
    pub point: Vec3,
}

impl HitResult {
    /// A miss.
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Vec3::ZERO,
        }
    }

    /// A hit at `point`.
    pub fn at(point: Vec3) -> Self {
        Self { hit: true, point }
    }
}

impl Default for HitResult {
    fn default() -> Self {
        Self::miss()
    }
}

/// A finite rectangle used as a collision surface.
///
/// `width` runs along chart x for both kinds; `height` runs along z for the
/// track and along y for the wall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneSurface {
    kind: SurfaceKind,
    center: Vec3,
    width: f32,
    height: f32,
}

impl PlaneSurface {
    /// Track surface for the given half-width and length.
    pub fn track(half_width: f32, length: f32) -> Self {
        let mut surface = Self {
            kind: SurfaceKind::Track,
            center: Vec3::ZERO,
            width: 0.0,
            height: 0.0,
        };
        surface.fit_track(half_width, length);
        surface
    }

    /// Wall surface for the given half-width and height, at depth `z`.
    pub fn wall(half_width: f32, height: f32, z: f32) -> Self {
        let mut surface = Self {
            kind: SurfaceKind::Wall,
            center: Vec3::ZERO,
            width: 0.0,
            height: 0.0,
        };
        surface.fit_wall(half_width, height, z);
        surface
    }

    /// Resize the track: spans `[-half_width, half_width]` in x and `[-length, 0]` in z.
    pub fn fit_track(&mut self, half_width: f32, length: f32) {
        self.width = half_width * 2.0;
        self.height = length;
        self.center = Vec3::new(0.0, 0.0, -length / 2.0);
    }

    /// Resize the wall: spans `[-half_width, half_width]` in x and `[0, height]` in y.
    pub fn fit_wall(&mut self, half_width: f32, height: f32, z: f32) {
        self.width = half_width * 2.0;
        self.height = height;
        self.center = Vec3::new(0.0, height / 2.0, z);
    }

    pub fn kind(&self) -> SurfaceKind {
        self.kind
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Intersect a ray with the rectangle, up to `max_distance` along the ray.
    ///
    /// Both faces are solid. Rays parallel to the plane never hit.
    pub fn raycast(&self, ray: &Ray, max_distance: f32) -> HitResult {
        let (normal, u, v) = self.kind.axes();
        let denom = normal.dot(ray.direction);
        if denom.abs() <= PARALLEL_EPSILON {
            return HitResult::miss();
        }

        let t = (self.center - ray.origin).dot(normal) / denom;
        if !(0.0..=max_distance).contains(&t) {
            return HitResult::miss();
        }

        let point = ray.at(t);
        let local = point - self.center;
        if local.dot(u).abs() > self.width / 2.0 || local.dot(v).abs() > self.height / 2.0 {
            return HitResult::miss();
        }

        HitResult::at(point)
    }
}
