//! Gameplay camera and pointer rays.

use glam::{Mat4, Vec3};
use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};

/// A half-line in chart (world) space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    /// Start of the ray.
    pub origin: Vec3,
    /// Unit direction. Zero if the ray was built from a degenerate direction.
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray, normalizing the direction.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at distance `t` along the ray.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Anything that can turn the current pointer position into a world ray.
pub trait RaySource {
    /// Ray through the given pointer position (in viewport pixels).
    fn pointer_ray(&self, pointer: Point) -> Ray;
}

/// Perspective camera looking down the track.
///
/// Pointer positions are in viewport pixels with the origin at the top left,
/// matching what windowing backends report.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayCamera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub viewport: Size,
}

impl Default for GameplayCamera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 9.0, 9.0),
            target: Vec3::new(0.0, -5.5, -20.0),
            up: Vec3::Y,
            fov_degrees: 50.0,
            near: 0.1,
            far: 1000.0,
            viewport: Size::new(1280.0, 720.0),
        }
    }
}

impl GameplayCamera {
    /// Create a camera with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Combined projection * view matrix.
    pub fn view_projection(&self) -> Mat4 {
        let aspect = (self.viewport.width / self.viewport.height.max(1.0)) as f32;
        let proj = Mat4::perspective_rh(self.fov_degrees.to_radians(), aspect, self.near, self.far);
        let view = Mat4::look_at_rh(self.position, self.target, self.up);
        proj * view
    }

    /// Convert a pointer position to normalized device coordinates.
    pub fn pointer_to_ndc(&self, pointer: Point) -> (f32, f32) {
        let width = self.viewport.width.max(1.0);
        let height = self.viewport.height.max(1.0);
        let ndc_x = (2.0 * pointer.x / width - 1.0) as f32;
        let ndc_y = (1.0 - 2.0 * pointer.y / height) as f32;
        (ndc_x, ndc_y)
    }
}

impl RaySource for GameplayCamera {
    fn pointer_ray(&self, pointer: Point) -> Ray {
        let (ndc_x, ndc_y) = self.pointer_to_ndc(pointer);
        let inv = self.view_projection().inverse();
        let near = inv.project_point3(Vec3::new(ndc_x, ndc_y, 0.0));
        let far = inv.project_point3(Vec3::new(ndc_x, ndc_y, 1.0));
        Ray::new(near, far - near)
    }
}
