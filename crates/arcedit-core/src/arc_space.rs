//! Mapping between world x/y and the chart's arc coordinates.

/// World x of arc x = 0.
pub const ARC_X_ORIGIN: f32 = 4.25;
/// World units per arc x unit. Negative: arc x grows towards world -x.
pub const ARC_X_SCALE: f32 = -8.5;
/// World y of arc y = 0.
pub const ARC_Y_ORIGIN: f32 = 1.0;
/// World units per arc y unit.
pub const ARC_Y_SCALE: f32 = 4.5;

/// Bidirectional, per-axis transform between world space and arc space.
pub trait ArcSpace {
    fn world_x_to_arc(&self, x: f32) -> f32;
    fn arc_x_to_world(&self, x: f32) -> f32;
    fn world_y_to_arc(&self, y: f32) -> f32;
    fn arc_y_to_world(&self, y: f32) -> f32;
}

/// The standard linear arc mapping.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ArcCoordinates;

impl ArcSpace for ArcCoordinates {
    fn world_x_to_arc(&self, x: f32) -> f32 {
        (x - ARC_X_ORIGIN) / ARC_X_SCALE
    }

    fn arc_x_to_world(&self, x: f32) -> f32 {
        ARC_X_SCALE * x + ARC_X_ORIGIN
    }

    fn world_y_to_arc(&self, y: f32) -> f32 {
        (y - ARC_Y_ORIGIN) / ARC_Y_SCALE
    }

    fn arc_y_to_world(&self, y: f32) -> f32 {
        ARC_Y_ORIGIN + ARC_Y_SCALE * y
    }
}
