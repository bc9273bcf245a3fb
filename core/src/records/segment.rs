use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPosition {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPosition {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// True when both coordinates sit inside the geographic range.
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon)
    }

    /// Planar midpoint between two positions.
    pub fn midpoint(&self, other: &GeoPosition) -> GeoPosition {
        GeoPosition {
            lat: (self.lat + other.lat) / 2.0,
            lon: (self.lon + other.lon) / 2.0,
        }
    }
}

/// One begin→end displacement of a tracked animal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovementSegment {
    pub entity_id: String,
    pub begin_position: GeoPosition,
    pub end_position: GeoPosition,
    pub begin_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub length_km: f64,
    pub speed_kph: f64,
}

impl MovementSegment {
    pub fn new(
        entity_id: impl Into<String>,
        begin_position: GeoPosition,
        end_position: GeoPosition,
        begin_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        length_km: f64,
        speed_kph: f64,
    ) -> Self {
        Self {
            entity_id: entity_id.into(),
            begin_position,
            end_position,
            begin_time,
            end_time,
            length_km,
            speed_kph,
        }
    }

    pub fn duration(&self) -> Duration {
        self.end_time - self.begin_time
    }

    pub fn midpoint(&self) -> GeoPosition {
        self.begin_position.midpoint(&self.end_position)
    }
}
