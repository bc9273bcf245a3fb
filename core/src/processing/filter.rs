use crate::records::{MovementSegment, SelectionWindow};
use crate::telemetry::log::LogManager;

/// Full span `[min(begin_time), max(begin_time)]` of one entity's segments.
pub fn entity_span(segments: &[MovementSegment], entity_id: &str) -> Option<SelectionWindow> {
    let mut begins = segments
        .iter()
        .filter(|segment| segment.entity_id == entity_id)
        .map(|segment| segment.begin_time);
    let first = begins.next()?;
    let (start, end) = begins.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t)));
    Some(SelectionWindow::new(start, end))
}

/// Segments of `entity_id` whose begin time falls inside `window`
/// (inclusive), sorted by begin time. Without a window the entity's full
/// span is used. An empty result is a valid selection.
pub fn select(
    segments: &[MovementSegment],
    entity_id: &str,
    window: Option<SelectionWindow>,
) -> Vec<MovementSegment> {
    let logger = LogManager::new("filter");
    let Some(window) = window.or_else(|| entity_span(segments, entity_id)) else {
        logger.detail(&format!("entity {} has no segments", entity_id));
        return Vec::new();
    };

    let mut selected: Vec<MovementSegment> = segments
        .iter()
        .filter(|segment| segment.entity_id == entity_id && window.contains(segment.begin_time))
        .cloned()
        .collect();
    selected.sort_by_key(|segment| segment.begin_time);

    logger.detail(&format!(
        "entity {} -> {} segment(s) between {} and {}",
        entity_id,
        selected.len(),
        window.start,
        window.end
    ));
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::GeoPosition;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn day(n: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2002, 9, 1, 0, 0, 0).unwrap() + Duration::days(n)
    }

    fn segment(id: &str, begin_day: i64) -> MovementSegment {
        MovementSegment::new(
            id,
            GeoPosition::new(20.0, -150.0),
            GeoPosition::new(20.5, -149.0),
            day(begin_day),
            day(begin_day) + Duration::hours(12),
            50.0,
            4.0,
        )
    }

    fn records() -> Vec<MovementSegment> {
        vec![
            segment("a", 3),
            segment("b", 0),
            segment("a", 0),
            segment("a", 7),
            segment("a", 5),
        ]
    }

    #[test]
    fn selects_entity_sorted_by_begin_time() {
        let selected = select(&records(), "a", None);
        let days: Vec<_> = selected.iter().map(|s| s.begin_time).collect();
        assert_eq!(days, vec![day(0), day(3), day(5), day(7)]);
        assert!(selected.iter().all(|s| s.entity_id == "a"));
    }

    #[test]
    fn window_bounds_are_inclusive() {
        let window = SelectionWindow::new(day(3), day(5));
        let selected = select(&records(), "a", Some(window));
        let days: Vec<_> = selected.iter().map(|s| s.begin_time).collect();
        assert_eq!(days, vec![day(3), day(5)]);
    }

    #[test]
    fn empty_selections_are_not_errors() {
        assert!(select(&records(), "zzz", None).is_empty());
        let window = SelectionWindow::new(day(100), day(101));
        assert!(select(&records(), "a", Some(window)).is_empty());
        assert!(select(&[], "a", None).is_empty());
    }

    #[test]
    fn span_uses_begin_times_only() {
        let span = entity_span(&records(), "a").unwrap();
        assert_eq!(span, SelectionWindow::new(day(0), day(7)));
        assert!(entity_span(&records(), "zzz").is_none());
    }
}
