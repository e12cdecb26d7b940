//! Arc-tap placement marker.

use kurbo::Point;

use crate::render::{RenderCommand, Renderable};

/// Marker shown while placing arc taps.
///
/// It is backed by two proxies, a regular one and an SFX one. When the marker
/// is enabled exactly one of them is visible, chosen by the SFX flag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArcTapMarker {
    enabled: bool,
    is_sfx: bool,
    position: Point,
}

impl ArcTapMarker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_sfx(&self) -> bool {
        self.is_sfx
    }

    pub fn position(&self) -> Point {
        self.position
    }

    /// The proxy currently shown, if any.
    pub fn visible_proxy(&self) -> Option<Renderable> {
        match (self.enabled, self.is_sfx) {
            (false, _) => None,
            (true, false) => Some(Renderable::ArcTapCursor),
            (true, true) => Some(Renderable::SfxArcTapCursor),
        }
    }

    /// Show or hide the marker.
    pub fn set_enabled(&mut self, enabled: bool) -> Vec<RenderCommand> {
        self.enabled = enabled;
        self.proxy_commands()
    }

    /// Switch between the regular and SFX variants.
    pub fn set_sfx(&mut self, is_sfx: bool) -> Vec<RenderCommand> {
        self.is_sfx = is_sfx;
        self.proxy_commands()
    }

    /// Move both proxies.
    pub fn set_position(&mut self, position: Point) -> Vec<RenderCommand> {
        self.position = position;
        vec![
            RenderCommand::MoveMarker {
                target: Renderable::ArcTapCursor,
                position,
            },
            RenderCommand::MoveMarker {
                target: Renderable::SfxArcTapCursor,
                position,
            },
        ]
    }

    fn proxy_commands(&self) -> Vec<RenderCommand> {
        vec![
            RenderCommand::SetEnabled {
                target: Renderable::ArcTapCursor,
                enabled: self.enabled && !self.is_sfx,
            },
            RenderCommand::SetEnabled {
                target: Renderable::SfxArcTapCursor,
                enabled: self.enabled && self.is_sfx,
            },
        ]
    }
}
