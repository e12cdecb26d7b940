//! Timing lookup: converting track positions back into chart timings.

use serde::{Deserialize, Serialize};

/// Handle of a timing group within the loaded chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TimingGroup(pub u32);

/// Timing service consumed by the cursor.
pub trait TimingLookup {
    /// Whether gameplay data is loaded. Timing queries are meaningless before that.
    fn is_loaded(&self) -> bool;

    /// Chart timing (ms) at which notes of `group` reach `position`.
    fn timing_for_position(&self, position: f32, group: TimingGroup) -> f32;

    /// Global audio offset (ms) subtracted from computed timings.
    fn audio_offset(&self) -> f32;
}

/// A tempo change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimingSegment {
    /// Start of the segment in ms.
    pub timing: f32,
    pub bpm: f32,
}

/// Tempo map of one timing group.
///
/// Position advances by `bpm / base_bpm` per millisecond, so at the base tempo
/// position and timing coincide. Position zero is at timing zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawTimingMap")]
pub struct TimingMap {
    pub base_bpm: f32,
    segments: Vec<TimingSegment>,
}

/// Unsorted tempo map as written in JSON.
#[derive(Deserialize)]
struct RawTimingMap {
    base_bpm: f32,
    segments: Vec<TimingSegment>,
}

impl From<RawTimingMap> for TimingMap {
    fn from(raw: RawTimingMap) -> Self {
        Self::new(raw.base_bpm, raw.segments)
    }
}

impl TimingMap {
    /// Build a map from tempo changes; segments are sorted by start timing.
    pub fn new(base_bpm: f32, mut segments: Vec<TimingSegment>) -> Self {
        segments.retain(|s| s.timing.is_finite() && s.bpm.is_finite());
        segments.sort_by(|a, b| a.timing.total_cmp(&b.timing));
        Self { base_bpm, segments }
    }

    /// Single-tempo map.
    pub fn constant(bpm: f32) -> Self {
        Self::new(bpm, vec![TimingSegment { timing: 0.0, bpm }])
    }

    pub fn segments(&self) -> &[TimingSegment] {
        &self.segments
    }

    fn velocity(&self, segment: &TimingSegment) -> f32 {
        if self.base_bpm == 0.0 {
            0.0
        } else {
            segment.bpm / self.base_bpm
        }
    }

    /// Position at the start of each segment.
    fn segment_starts(&self) -> Vec<f32> {
        let mut starts = Vec::with_capacity(self.segments.len());
        for (i, segment) in self.segments.iter().enumerate() {
            let start = match i {
                0 => segment.timing * self.velocity(segment),
                _ => {
                    let prev = &self.segments[i - 1];
                    starts[i - 1] + (segment.timing - prev.timing) * self.velocity(prev)
                }
            };
            starts.push(start);
        }
        starts
    }

    /// Track position reached at `timing`.
    pub fn position_at(&self, timing: f32) -> f32 {
        let Some(first) = self.segments.first() else {
            return timing;
        };
        let starts = self.segment_starts();
        let index = self
            .segments
            .iter()
            .rposition(|s| s.timing <= timing)
            .unwrap_or(0);
        let segment = if timing < first.timing { first } else { &self.segments[index] };
        let start = if timing < first.timing { starts[0] } else { starts[index] };
        start + (timing - segment.timing) * self.velocity(segment)
    }

    /// Earliest timing at which `position` is reached.
    ///
    /// Stopped segments (zero tempo) only match their exact start position.
    /// Positions before the first segment extrapolate its tempo backwards.
    pub fn timing_at(&self, position: f32) -> f32 {
        let Some(first) = self.segments.first() else {
            return position;
        };
        let starts = self.segment_starts();

        for (i, segment) in self.segments.iter().enumerate() {
            let velocity = self.velocity(segment);
            if velocity == 0.0 {
                if position == starts[i] {
                    return segment.timing;
                }
                continue;
            }
            let timing = segment.timing + (position - starts[i]) / velocity;
            let after_start = i == 0 || timing >= segment.timing;
            let before_end = self
                .segments
                .get(i + 1)
                .is_none_or(|next| timing < next.timing);
            if after_start && before_end {
                return timing;
            }
        }

        let velocity = self.velocity(first);
        if velocity == 0.0 {
            first.timing
        } else {
            first.timing + (position - starts[0]) / velocity
        }
    }
}

/// Timing data of a loaded chart: one tempo map per timing group.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartTiming {
    pub loaded: bool,
    pub audio_offset: f32,
    pub groups: Vec<TimingMap>,
}

impl ChartTiming {
    /// Loaded chart with a single group.
    pub fn single(map: TimingMap, audio_offset: f32) -> Self {
        Self {
            loaded: true,
            audio_offset,
            groups: vec![map],
        }
    }

    /// Tempo map of `group`, falling back to the base group for unknown handles.
    pub fn group(&self, group: TimingGroup) -> Option<&TimingMap> {
        self.groups
            .get(group.0 as usize)
            .or_else(|| self.groups.first())
    }
}

impl TimingLookup for ChartTiming {
    fn is_loaded(&self) -> bool {
        self.loaded && !self.groups.is_empty()
    }

    fn timing_for_position(&self, position: f32, group: TimingGroup) -> f32 {
        match self.group(group) {
            Some(map) => map.timing_at(position),
            None => 0.0,
        }
    }

    fn audio_offset(&self) -> f32 {
        self.audio_offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_tempo() -> TimingMap {
        // 120 bpm base, doubles to 240 at 1000ms.
        TimingMap::new(
            120.0,
            vec![
                TimingSegment { timing: 1000.0, bpm: 240.0 },
                TimingSegment { timing: 0.0, bpm: 120.0 },
            ],
        )
    }

    #[test]
    fn test_constant_map_is_identity() {
        let map = TimingMap::constant(180.0);
        assert!((map.timing_at(2500.0) - 2500.0).abs() < 1e-3);
        assert!((map.position_at(2500.0) - 2500.0).abs() < 1e-3);
    }

    #[test]
    fn test_segments_sorted() {
        let map = two_tempo();
        assert!((map.segments()[0].timing - 0.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_tempo_change() {
        let map = two_tempo();
        assert!((map.position_at(1500.0) - 2000.0).abs() < 1e-3);
        assert!((map.timing_at(2000.0) - 1500.0).abs() < 1e-3);
        assert!((map.timing_at(500.0) - 500.0).abs() < 1e-3);
    }

    #[test]
    fn test_negative_position_extrapolates() {
        let map = two_tempo();
        assert!((map.timing_at(-300.0) + 300.0).abs() < 1e-3);
    }

    #[test]
    fn test_stop_segment() {
        let map = TimingMap::new(
            100.0,
            vec![
                TimingSegment { timing: 0.0, bpm: 100.0 },
                TimingSegment { timing: 1000.0, bpm: 0.0 },
                TimingSegment { timing: 2000.0, bpm: 100.0 },
            ],
        );
        // Position 1000 is first reached when the stop begins.
        assert!((map.timing_at(1000.0) - 1000.0).abs() < 1e-3);
        assert!((map.timing_at(1500.0) - 2500.0).abs() < 1e-3);
    }

    #[test]
    fn test_chart_timing_group_fallback() {
        let timing = ChartTiming {
            loaded: true,
            audio_offset: 0.0,
            groups: vec![TimingMap::constant(120.0), two_tempo()],
        };
        assert!((timing.timing_for_position(2000.0, TimingGroup(1)) - 1500.0).abs() < 1e-3);
        assert!((timing.timing_for_position(2000.0, TimingGroup(7)) - 2000.0).abs() < 1e-3);
    }

    #[test]
    fn test_deserialize_sorts_segments() {
        let map: TimingMap = serde_json::from_str(
            r#"{ "base_bpm": 120.0, "segments": [
                { "timing": 1000.0, "bpm": 240.0 },
                { "timing": 0.0, "bpm": 120.0 }
            ] }"#,
        )
        .unwrap();
        assert_eq!(map, two_tempo());
    }

    #[test]
    fn test_unloaded_chart() {
        let timing = ChartTiming::default();
        assert!(!timing.is_loaded());
        assert!((timing.timing_for_position(100.0, TimingGroup::default())).abs() < f32::EPSILON);

        let flagged = ChartTiming {
            loaded: false,
            ..ChartTiming::single(TimingMap::constant(120.0), 0.0)
        };
        assert!(!flagged.is_loaded());
    }
}
