//! ArcEdit Core Library
//!
//! Engine-agnostic cursor logic for the ArcEdit chart editor: casting the
//! pointer ray onto the track and wall surfaces and attaching the hit points
//! to beat lines and lane lines.

pub mod arc_space;
pub mod camera;
pub mod config;
pub mod mode;
pub mod render;
pub mod snap;
pub mod surface;
pub mod timing;
pub mod tracker;
pub mod visibility;

pub use arc_space::{ArcCoordinates, ArcSpace};
pub use camera::{GameplayCamera, Ray, RaySource};
pub use config::{ConfigError, ConfigResult, CursorConfig};
pub use mode::EditingMode;
pub use render::{CommandLog, CursorRenderer, RenderCommand, Renderable};
pub use snap::{GridSnap, SnapGrid, SnapMode};
pub use surface::{HitResult, PlaneSurface, SurfaceKind, track_half_width, wall_height};
pub use timing::{ChartTiming, TimingGroup, TimingLookup, TimingMap, TimingSegment};
pub use tracker::{
    ArcTapMarker, CursorTracker, FrameInput, SnapContext, TrackPlaneHitTester, WallPlaneHitTester,
};
pub use visibility::{VisibilityPolicy, VisibilityState};
