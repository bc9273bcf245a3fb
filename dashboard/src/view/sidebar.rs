use crate::view::model::DashboardModel;
use chrono::{DateTime, Utc};
use std::fmt;
use turtlecore::records::GeoPosition;

const NO_DATA: &str = "no data";
const TIME_FORMAT: &str = "%B %d, %Y: %I:%M %p";

fn measure(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{:.3} {}", v, unit),
        None => NO_DATA.to_string(),
    }
}

fn timestamp(value: Option<DateTime<Utc>>) -> String {
    value
        .map(|t| t.format(TIME_FORMAT).to_string())
        .unwrap_or_else(|| NO_DATA.to_string())
}

fn location(value: Option<GeoPosition>) -> String {
    match value {
        Some(p) => format!("({}, {})", p.lat, p.lon),
        None => NO_DATA.to_string(),
    }
}

fn rounded_location(value: Option<GeoPosition>, decimals: usize) -> String {
    match value {
        Some(p) => format!("({:.*}, {:.*})", decimals, p.lat, decimals, p.lon),
        None => NO_DATA.to_string(),
    }
}

/// Sidebar text for a model: movement, time and location blocks.
pub struct Sidebar<'a>(pub &'a DashboardModel);

impl fmt::Display for Sidebar<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let model = self.0;
        let summary = &model.summary;

        writeln!(f, "Turtle Description")?;
        writeln!(f, "Selected Turtle: {}", model.display_name)?;
        if model.display_name != model.entity_id {
            writeln!(f, "Series: {}", model.entity_id)?;
        }
        if let Some(window) = model.window {
            writeln!(
                f,
                "Window: {} to {}",
                window.start.format(TIME_FORMAT),
                window.end.format(TIME_FORMAT)
            )?;
        }
        writeln!(f, "---")?;

        writeln!(
            f,
            "Total Distance: {}",
            measure(summary.total_distance, &summary.distance_unit)
        )?;
        writeln!(
            f,
            "Average Speed: {}",
            measure(summary.average_speed, &summary.speed_unit)
        )?;
        writeln!(
            f,
            "Max Speed: {}",
            measure(summary.max_speed, &summary.speed_unit)
        )?;
        writeln!(f, "Total Moves: {}", summary.move_count)?;
        writeln!(
            f,
            "Average Move: {}",
            measure(summary.average_move, &summary.distance_unit)
        )?;
        writeln!(
            f,
            "Longest Move: {}",
            measure(summary.longest_move, &summary.distance_unit)
        )?;
        writeln!(f, "---")?;

        writeln!(f, "Time Metrics")?;
        writeln!(f, "Start Date: {}", timestamp(summary.start_time))?;
        writeln!(f, "End Date: {}", timestamp(summary.end_time))?;
        let duration = summary
            .calendar_duration_days
            .map(|days| format!("{} days", days))
            .unwrap_or_else(|| NO_DATA.to_string());
        writeln!(f, "Calendar Duration: {}", duration)?;
        let per_move = summary
            .average_time_per_move
            .map(|m| format!("{} days, {:.3} hours", m.days, m.hours))
            .unwrap_or_else(|| NO_DATA.to_string());
        writeln!(f, "Average Time per Move: {}", per_move)?;
        writeln!(f, "---")?;

        writeln!(f, "Location Metrics (Latitude, Longitude)")?;
        writeln!(f, "Starting Location: {}", location(summary.start_location))?;
        writeln!(f, "Ending Location: {}", location(summary.end_location))?;
        writeln!(
            f,
            "Center of Path: {}",
            rounded_location(summary.path_midpoint, 2)
        )?;
        writeln!(
            f,
            "Center point is a planar mean, not a spherical one; it may be misplaced when the path crosses the International Date Line."
        )?;
        if model.show_midpoint {
            writeln!(f, "Center point marker: shown")?;
        }
        writeln!(
            f,
            "Map layers: {} ({} line(s), {} waypoint(s))",
            model.geometry.layer_count(),
            model.geometry.lines.len(),
            model.geometry.waypoints.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use turtlecore::math::UnitSystem;
    use turtlecore::processing::{summarize, PathGeometry, SummaryOptions};

    fn empty_model() -> DashboardModel {
        DashboardModel {
            entity_id: "404".into(),
            display_name: "404".into(),
            entities: Vec::new(),
            span: None,
            window: None,
            show_midpoint: false,
            summary: summarize(
                &[],
                &SummaryOptions {
                    units: UnitSystem::Imperial,
                    max_speed_cutoff_kph: 24.0,
                },
            ),
            geometry: PathGeometry::default(),
        }
    }

    #[test]
    fn empty_selection_renders_no_data() {
        let text = Sidebar(&empty_model()).to_string();
        assert!(text.contains("Total Distance: no data"));
        assert!(text.contains("Max Speed: no data"));
        assert!(text.contains("Total Moves: 0"));
        assert!(text.contains("Center of Path: no data"));
        assert!(!text.contains("Series:"));
        assert!(text.contains("Map layers: 0 (0 line(s), 0 waypoint(s))"));
    }

    #[test]
    fn measurements_round_to_three_places() {
        assert_eq!(measure(Some(37.28226), "miles"), "37.282 miles");
        assert_eq!(measure(None, "miles"), "no data");
    }

    #[test]
    fn only_the_path_center_is_rounded() {
        let start = GeoPosition::new(30.123456, 179.5);
        let end = GeoPosition::new(31.654321, 181.25);
        let mut model = empty_model();
        model.summary.start_location = Some(start);
        model.summary.end_location = Some(end);
        model.summary.path_midpoint = Some(GeoPosition::new(30.888888, 180.3761));

        let text = Sidebar(&model).to_string();
        assert!(text.contains("Starting Location: (30.123456, 179.5)"));
        assert!(text.contains("Ending Location: (31.654321, 181.25)"));
        assert!(text.contains("Center of Path: (30.89, 180.38)"));
    }
}
