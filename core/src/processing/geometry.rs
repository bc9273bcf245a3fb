use crate::processing::stats::path_midpoint;
use crate::records::{GeoPosition, MovementSegment};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One drawable line between corrected begin/end coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineFeature {
    pub source: GeoPosition,
    pub target: GeoPosition,
    pub begin_time: DateTime<Utc>,
}

/// A point marker. `time` feeds the renderer's tooltip when known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointFeature {
    pub position: GeoPosition,
    pub time: Option<DateTime<Utc>>,
}

/// Everything the map renderer needs for one selection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathGeometry {
    pub lines: Vec<LineFeature>,
    /// Interior waypoints: each segment's begin point except the first.
    pub waypoints: Vec<PointFeature>,
    pub start: Option<PointFeature>,
    pub end: Option<PointFeature>,
    pub midpoint: Option<PointFeature>,
    /// Mean of begin positions, used to place the initial camera.
    pub view_center: Option<GeoPosition>,
}

impl PathGeometry {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of marker layers that would be drawn.
    pub fn layer_count(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        4 + usize::from(self.midpoint.is_some())
    }
}

/// Builds map geometry from a selected and unwrapped segment sequence.
pub fn build_geometry(segments: &[MovementSegment], show_midpoint: bool) -> PathGeometry {
    let (Some(first), Some(last)) = (segments.first(), segments.last()) else {
        return PathGeometry::default();
    };

    let lines = segments
        .iter()
        .map(|segment| LineFeature {
            source: segment.begin_position,
            target: segment.end_position,
            begin_time: segment.begin_time,
        })
        .collect();

    let waypoints = segments
        .iter()
        .skip(1)
        .map(|segment| PointFeature {
            position: segment.begin_position,
            time: Some(segment.begin_time),
        })
        .collect();

    let midpoint = if show_midpoint {
        path_midpoint(segments).map(|position| PointFeature {
            position,
            time: None,
        })
    } else {
        None
    };

    let count = segments.len() as f64;
    let view_center = GeoPosition::new(
        segments.iter().map(|s| s.begin_position.lat).sum::<f64>() / count,
        segments.iter().map(|s| s.begin_position.lon).sum::<f64>() / count,
    );

    PathGeometry {
        lines,
        waypoints,
        start: Some(PointFeature {
            position: first.begin_position,
            time: Some(first.begin_time),
        }),
        end: Some(PointFeature {
            position: last.end_position,
            time: None,
        }),
        midpoint,
        view_center: Some(view_center),
    }
}
