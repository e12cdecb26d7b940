//! Headless replay of cursor scenarios.
//!
//! A scenario describes the camera, grid and timing of a chart plus a list of
//! frames (pointer position, enwiden ratios, editing mode). Replaying it runs
//! every frame through a [`CursorTracker`] and collects one report per frame.

use std::path::Path;

use arcedit_core::{
    ArcCoordinates, ChartTiming, ConfigError, CursorConfig, CursorRenderer, CursorTracker,
    EditingMode, FrameInput, GameplayCamera, RaySource, RenderCommand, SnapContext, SnapGrid,
    TimingGroup, VisibilityState,
};
use glam::Vec3;
use kurbo::Point;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Probe errors.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Scenario error: {0}")]
    Scenario(String),
    #[error("Output error: {0}")]
    Output(String),
}

/// Result type for probe operations.
pub type ProbeResult<T> = Result<T, ProbeError>;

/// One frame of pointer input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameStep {
    /// Pointer position in viewport pixels.
    pub pointer: Point,
    #[serde(default)]
    pub mode: EditingMode,
    #[serde(default)]
    pub beatline_enwiden_ratio: f32,
    #[serde(default)]
    pub camera_enwiden_ratio: f32,
    /// Show or hide the arc-tap marker before this frame.
    #[serde(default)]
    pub arc_tap_cursor: Option<bool>,
    /// Switch the arc-tap marker variant before this frame.
    #[serde(default)]
    pub arc_tap_sfx: Option<bool>,
}

/// A recorded editing session to replay.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub camera: GameplayCamera,
    pub grid: SnapGrid,
    pub timing: ChartTiming,
    pub timing_group: TimingGroup,
    pub frames: Vec<FrameStep>,
}

impl Scenario {
    /// Parse a scenario from JSON.
    pub fn from_json_str(json: &str) -> ProbeResult<Self> {
        serde_json::from_str(json).map_err(|e| ProbeError::Scenario(e.to_string()))
    }

    /// Load a scenario file.
    pub fn load(path: impl AsRef<Path>) -> ProbeResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| ProbeError::Io(format!("{}: {}", path.display(), e)))?;
        let scenario = Self::from_json_str(&json)?;
        log::info!(
            "Loaded scenario {} ({} frames)",
            path.display(),
            scenario.frames.len()
        );
        Ok(scenario)
    }
}

/// What the cursor reported after one frame.
#[derive(Debug, Clone, Serialize)]
pub struct FrameReport {
    pub frame: usize,
    pub mode: EditingMode,
    pub track_hit: bool,
    pub track_point: Vec3,
    pub attached_track_point: Vec3,
    pub attached_timing: f32,
    pub wall_hit: bool,
    pub wall_point: Vec3,
    pub attached_wall_point: Vec3,
    pub visibility: VisibilityState,
    pub commands: Vec<RenderCommand>,
}

/// Renderer that forwards commands to the log and counts them.
#[derive(Debug, Default)]
pub struct LogRenderer {
    pub applied: usize,
}

impl CursorRenderer for LogRenderer {
    fn apply(&mut self, command: &RenderCommand) {
        log::debug!("render: {:?}", command);
        self.applied += 1;
    }
}

/// Replay every frame of `scenario` through a fresh tracker.
pub fn replay(
    scenario: &Scenario,
    config: CursorConfig,
    renderer: &mut dyn CursorRenderer,
) -> Vec<FrameReport> {
    let mut tracker = CursorTracker::new(config);
    let ctx = SnapContext::new(&scenario.grid, &ArcCoordinates);
    let mut reports = Vec::with_capacity(scenario.frames.len());

    for (index, step) in scenario.frames.iter().enumerate() {
        let mut commands = Vec::new();
        if let Some(is_sfx) = step.arc_tap_sfx {
            commands.extend(tracker.set_arc_tap_cursor_is_sfx(is_sfx));
        }
        if let Some(enabled) = step.arc_tap_cursor {
            commands.extend(tracker.set_arc_tap_cursor_enabled(enabled));
        }

        let ray = scenario.camera.pointer_ray(step.pointer);
        let input = FrameInput::new(ray, step.mode)
            .with_ratios(step.beatline_enwiden_ratio, step.camera_enwiden_ratio);
        commands.extend(tracker.update(&input, &ctx));

        let attached_wall_point = tracker.attached_wall_point(&ctx);
        if tracker.arc_tap_cursor_enabled() && tracker.is_wall_hit() {
            let position = Point::new(
                f64::from(attached_wall_point.x),
                f64::from(attached_wall_point.y),
            );
            commands.extend(tracker.set_arc_tap_cursor_position(position));
        }

        renderer.apply_all(&commands);
        reports.push(FrameReport {
            frame: index,
            mode: step.mode,
            track_hit: tracker.is_track_hit(),
            track_point: tracker.track_point(),
            attached_track_point: tracker.attached_track_point(&scenario.grid),
            attached_timing: tracker.attached_timing(
                &scenario.grid,
                &scenario.timing,
                scenario.timing_group,
            ),
            wall_hit: tracker.is_wall_hit(),
            wall_point: tracker.wall_point(),
            attached_wall_point,
            visibility: tracker.visibility(),
            commands,
        });
    }

    reports
}

/// Serialize a report as a single JSON line.
pub fn report_line(report: &FrameReport, pretty: bool) -> ProbeResult<String> {
    let result = if pretty {
        serde_json::to_string_pretty(report)
    } else {
        serde_json::to_string(report)
    };
    result.map_err(|e| ProbeError::Output(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcedit_core::{CommandLog, Renderable, TimingMap};
    use std::io::Write;

    fn scenario() -> Scenario {
        let camera = GameplayCamera::new();
        let (width, height) = (camera.viewport.width, camera.viewport.height);
        // Lower on screen lands on the track near the judgement line; the
        // centre passes through the wall.
        let frame = |mode, y: f64| FrameStep {
            pointer: Point::new(width / 2.0, height * y),
            mode,
            beatline_enwiden_ratio: 0.0,
            camera_enwiden_ratio: 0.0,
            arc_tap_cursor: None,
            arc_tap_sfx: None,
        };
        Scenario {
            camera,
            grid: SnapGrid::new()
                .with_uniform_beatlines(0.5, 200)
                .with_lane_divisions(4, 4),
            timing: ChartTiming::single(TimingMap::constant(120.0), 0.0),
            timing_group: TimingGroup::default(),
            frames: vec![
                frame(EditingMode::Track, 0.7),
                frame(EditingMode::Coordinate, 0.5),
                frame(EditingMode::None, 0.7),
            ],
        }
    }

    #[test]
    fn test_replay_reports_every_frame() {
        let scenario = scenario();
        let mut log = CommandLog::new();
        let reports = replay(&scenario, CursorConfig::default(), &mut log);

        assert_eq!(reports.len(), 3);
        assert!(reports[0].track_hit);
        assert!(reports[0].visibility.track());
        assert!(reports[1].visibility.wall());
        assert_eq!(reports[2].visibility, VisibilityState::hidden());

        let total: usize = reports.iter().map(|r| r.commands.len()).sum();
        assert_eq!(log.commands.len(), total);
    }

    #[test]
    fn test_replay_timing_matches_snapped_z() {
        let scenario = scenario();
        let mut log = CommandLog::new();
        let reports = replay(&scenario, CursorConfig::default(), &mut log);

        let report = &reports[0];
        let expected = -report.attached_track_point.z * 1000.0;
        assert!((report.attached_timing - expected).abs() < 1e-2);
        // Beat lines every 0.5 units.
        let beats = report.attached_track_point.z / 0.5;
        assert!((beats - beats.round()).abs() < 1e-4);
    }

    #[test]
    fn test_replay_moves_arc_tap_marker() {
        let mut scenario = scenario();
        scenario.frames[1].arc_tap_cursor = Some(true);
        scenario.frames[1].arc_tap_sfx = Some(true);
        let mut log = CommandLog::new();
        let reports = replay(&scenario, CursorConfig::default(), &mut log);

        let report = &reports[1];
        assert!(report.wall_hit);
        assert!(report.visibility.arc_tap_cursor());
        assert!(report.commands.contains(&RenderCommand::SetEnabled {
            target: Renderable::SfxArcTapCursor,
            enabled: true,
        }));
        assert!(report
            .commands
            .iter()
            .any(|c| matches!(c, RenderCommand::MoveMarker { .. })));
    }

    #[test]
    fn test_scenario_defaults() {
        let scenario = Scenario::from_json_str(
            r#"{ "frames": [ { "pointer": { "x": 640.0, "y": 500.0 }, "mode": "timing" } ] }"#,
        )
        .unwrap();
        assert_eq!(scenario.frames.len(), 1);
        assert_eq!(scenario.frames[0].mode, EditingMode::Timing);
        assert!(!scenario.timing.loaded);
    }

    #[test]
    fn test_scenario_unknown_mode_is_none() {
        let scenario = Scenario::from_json_str(
            r#"{ "frames": [ { "pointer": { "x": 0.0, "y": 0.0 }, "mode": "hold" } ] }"#,
        )
        .unwrap();
        assert_eq!(scenario.frames[0].mode, EditingMode::None);
    }

    #[test]
    fn test_scenario_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "timing_group": 2, "frames": [] }}"#).unwrap();
        let scenario = Scenario::load(file.path()).unwrap();
        assert_eq!(scenario.timing_group, TimingGroup(2));
    }

    #[test]
    fn test_scenario_bad_json() {
        let err = Scenario::from_json_str("[").unwrap_err();
        assert!(matches!(err, ProbeError::Scenario(_)));
    }

    #[test]
    fn test_report_line_is_single_line() {
        let scenario = scenario();
        let mut renderer = LogRenderer::default();
        let reports = replay(&scenario, CursorConfig::default(), &mut renderer);
        let line = report_line(&reports[0], false).unwrap();
        assert!(!line.contains('\n'));
        assert!(line.contains("\"track_hit\":true"));
        assert_eq!(
            renderer.applied,
            reports.iter().map(|r| r.commands.len()).sum::<usize>()
        );
    }
}
