use crate::math::{StatsHelper, UnitSystem};
use crate::records::{GeoPosition, MovementSegment};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Mean segment duration split the way the dashboard shows it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoveDuration {
    pub days: i64,
    /// Remainder after whole days, in hours.
    pub hours: f64,
}

impl MoveDuration {
    pub fn from_duration(duration: Duration) -> Self {
        let days = duration.num_days();
        let remainder = duration - Duration::days(days);
        let hours = remainder.num_milliseconds() as f64 / 3_600_000.0;
        Self { days, hours }
    }
}

/// Aggregator inputs besides the segments themselves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryOptions {
    pub units: UnitSystem,
    pub max_speed_cutoff_kph: f64,
}

/// Derived statistics for one selection. `None` means "no data".
///
/// Distances and speeds are expressed in `units`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathSummary {
    pub units: UnitSystem,
    pub distance_unit: String,
    pub speed_unit: String,
    pub move_count: usize,
    pub total_distance: Option<f64>,
    pub average_speed: Option<f64>,
    pub max_speed: Option<f64>,
    pub average_move: Option<f64>,
    pub longest_move: Option<f64>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub calendar_duration_days: Option<i64>,
    pub average_time_per_move: Option<MoveDuration>,
    pub start_location: Option<GeoPosition>,
    pub end_location: Option<GeoPosition>,
    /// Planar mean of per-segment midpoints. This is not a spherical
    /// centroid and drifts when the path crosses the antimeridian.
    pub path_midpoint: Option<GeoPosition>,
}

impl PathSummary {
    pub fn has_data(&self) -> bool {
        self.move_count > 0
    }
}

/// Planar mean of each segment's own midpoint.
pub fn path_midpoint(segments: &[MovementSegment]) -> Option<GeoPosition> {
    let midpoints: Vec<GeoPosition> = segments.iter().map(MovementSegment::midpoint).collect();
    let lats: Vec<f64> = midpoints.iter().map(|p| p.lat).collect();
    let lons: Vec<f64> = midpoints.iter().map(|p| p.lon).collect();
    Some(GeoPosition::new(
        StatsHelper::mean(&lats)?,
        StatsHelper::mean(&lons)?,
    ))
}

/// Reduces a selected, unwrapped and chronologically sorted sequence.
pub fn summarize(segments: &[MovementSegment], options: &SummaryOptions) -> PathSummary {
    let units = options.units;
    let lengths: Vec<f64> = segments.iter().map(|s| s.length_km).collect();
    let speeds: Vec<f64> = segments.iter().map(|s| s.speed_kph).collect();

    let start_time = segments.iter().map(|s| s.begin_time).min();
    let end_time = segments.iter().map(|s| s.end_time).max();
    let calendar_duration_days = start_time
        .zip(end_time)
        .map(|(start, end)| (end - start).num_days());

    let average_time_per_move = if segments.is_empty() {
        None
    } else {
        let total_ms: i64 = segments.iter().map(|s| s.duration().num_milliseconds()).sum();
        let mean = Duration::milliseconds(total_ms / segments.len() as i64);
        Some(MoveDuration::from_duration(mean))
    };

    PathSummary {
        units,
        distance_unit: units.distance_label().to_string(),
        speed_unit: units.speed_label().to_string(),
        move_count: segments.len(),
        total_distance: StatsHelper::sum(&lengths).map(|v| units.convert(v)),
        average_speed: StatsHelper::mean(&speeds).map(|v| units.convert(v)),
        max_speed: StatsHelper::max_at_most(&speeds, options.max_speed_cutoff_kph)
            .map(|v| units.convert(v)),
        average_move: StatsHelper::mean(&lengths).map(|v| units.convert(v)),
        longest_move: StatsHelper::max(&lengths).map(|v| units.convert(v)),
        start_time,
        end_time,
        calendar_duration_days,
        average_time_per_move,
        start_location: segments.first().map(|s| s.begin_position),
        end_location: segments.last().map(|s| s.end_position),
        path_midpoint: path_midpoint(segments),
    }
}
