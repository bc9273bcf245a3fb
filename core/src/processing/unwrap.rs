//! Antimeridian repair for line geometry.
//!
//! A segment whose endpoints sit on opposite sides of the ±180° seam would
//! otherwise be drawn across the whole globe. Each wrapped segment gets +360°
//! on its smaller longitude so the pair differs by `360 - d`.
//!
//! Segments are corrected independently. A path that crosses the seam more
//! than once can end up with longitudes from different 360° frames; each
//! segment renders correctly on its own but consecutive segments need not
//! share an endpoint value.

use crate::records::MovementSegment;
use crate::telemetry::log::LogManager;

/// Longitude gap above which a segment is considered wrapped.
pub const WRAP_THRESHOLD_DEG: f64 = 180.0;

/// Corrects one longitude pair, returning `None` when no correction applies.
pub fn unwrap_pair(lon_begin: f64, lon_end: f64) -> Option<(f64, f64)> {
    if (lon_begin - lon_end).abs() <= WRAP_THRESHOLD_DEG {
        return None;
    }
    if lon_begin > lon_end {
        Some((lon_begin, lon_end + 360.0))
    } else {
        Some((lon_begin + 360.0, lon_end))
    }
}

/// Applies the correction to a single segment. Returns true if it changed.
pub fn unwrap_segment(segment: &mut MovementSegment) -> bool {
    match unwrap_pair(segment.begin_position.lon, segment.end_position.lon) {
        Some((begin, end)) => {
            segment.begin_position.lon = begin;
            segment.end_position.lon = end;
            true
        }
        None => false,
    }
}

/// Corrects every segment of a selection in place and returns how many
/// segments were wrapped.
pub fn unwrap_longitudes(segments: &mut [MovementSegment]) -> usize {
    let corrected = segments
        .iter_mut()
        .map(unwrap_segment)
        .filter(|changed| *changed)
        .count();
    if corrected > 0 {
        LogManager::new("unwrap").detail(&format!(
            "corrected {} of {} segment(s) crossing the antimeridian",
            corrected,
            segments.len()
        ));
    }
    corrected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::GeoPosition;
    use chrono::{TimeZone, Utc};

    fn segment(lon_begin: f64, lon_end: f64) -> MovementSegment {
        let t = Utc.with_ymd_and_hms(2003, 1, 1, 0, 0, 0).unwrap();
        MovementSegment::new(
            "1",
            GeoPosition::new(30.0, lon_begin),
            GeoPosition::new(30.0, lon_end),
            t,
            t,
            1.0,
            1.0,
        )
    }

    #[test]
    fn seam_crossing_eastward_moves_end() {
        let mut s = segment(179.0, -179.0);
        assert!(unwrap_segment(&mut s));
        assert_eq!(s.begin_position.lon, 179.0);
        assert_eq!(s.end_position.lon, 181.0);
        assert_eq!((s.begin_position.lon - s.end_position.lon).abs(), 2.0);
    }

    #[test]
    fn seam_crossing_westward_moves_begin() {
        let mut s = segment(-175.0, 170.0);
        assert!(unwrap_segment(&mut s));
        assert_eq!(s.begin_position.lon, 185.0);
        assert_eq!(s.end_position.lon, 170.0);
    }

    #[test]
    fn short_segments_are_untouched() {
        for (a, b) in [(10.0, 20.0), (-170.0, 10.0), (180.0, 0.0), (-90.0, 90.0)] {
            let mut s = segment(a, b);
            assert!(!unwrap_segment(&mut s));
            assert_eq!((s.begin_position.lon, s.end_position.lon), (a, b));
        }
    }

    #[test]
    fn corrected_gap_is_complement_of_original() {
        let pairs: [(f64, f64); 4] = [
            (179.0, -179.0),
            (-180.0, 0.5),
            (150.0, -100.0),
            (-120.0, 170.0),
        ];
        for (a, b) in pairs {
            let d = (a - b).abs();
            let (na, nb) = unwrap_pair(a, b).unwrap();
            let gap = (na - nb).abs();
            assert!((gap - (360.0 - d)).abs() < 1e-9);
            assert!(gap < 180.0);
        }
    }

    #[test]
    fn counts_corrections_and_keeps_latitudes() {
        let mut path = vec![
            segment(178.0, -178.0),
            segment(-178.0, -175.0),
            segment(-175.0, 179.0),
        ];
        assert_eq!(unwrap_longitudes(&mut path), 2);
        assert_eq!(path[1].begin_position.lon, -178.0);
        assert!(path.iter().all(|s| s.begin_position.lat == 30.0));
        // Per-segment frames: segment 0 ends at 182 while segment 1 begins at -178.
        assert_eq!(path[0].end_position.lon, 182.0);
    }
}
