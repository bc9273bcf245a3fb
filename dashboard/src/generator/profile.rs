use anyhow::Context;
use chrono::{DateTime, Duration, TimeZone, Utc};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use turtlecore::processing::RecordSet;
use turtlecore::records::{GeoPosition, MovementSegment};

const KM_PER_DEGREE: f64 = 111.32;

/// Configuration for generating a synthetic turtle dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub entities: usize,
    pub segments_per_entity: usize,
    pub seed: u64,
    pub start_time: DateTime<Utc>,
    pub start_lat: f64,
    pub start_lon: f64,
    /// Fraction of segments whose reported speed is an implausible spike.
    pub outlier_rate: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            entities: 3,
            segments_per_entity: 40,
            seed: 0,
            start_time: Utc
                .with_ymd_and_hms(2002, 8, 1, 0, 0, 0)
                .single()
                .unwrap_or_default(),
            start_lat: 30.0,
            start_lon: 170.0,
            outlier_rate: 0.05,
        }
    }
}

impl GeneratorConfig {
    fn normalized_entities(&self) -> usize {
        self.entities.max(1)
    }

    fn normalized_segments(&self) -> usize {
        self.segments_per_entity.max(1)
    }
}

fn wrap_longitude(lon: f64) -> f64 {
    if lon > 180.0 {
        lon - 360.0
    } else if lon < -180.0 {
        lon + 360.0
    } else {
        lon
    }
}

fn build_track(
    config: &GeneratorConfig,
    entity_index: usize,
    rng: &mut StdRng,
) -> Vec<MovementSegment> {
    let entity_id = (100 + entity_index).to_string();
    let mut position = GeoPosition::new(
        (config.start_lat + entity_index as f64).clamp(-60.0, 60.0),
        wrap_longitude(config.start_lon - 2.0 * entity_index as f64),
    );
    let mut clock = config.start_time + Duration::hours(6 * entity_index as i64);

    let mut segments = Vec::with_capacity(config.normalized_segments());
    for _ in 0..config.normalized_segments() {
        let hours: i64 = rng.gen_range(12..48);
        let dlat = rng.gen_range(-0.5..0.5);
        let dlon = rng.gen_range(0.5..3.0);

        let next = GeoPosition::new(
            (position.lat + dlat).clamp(-60.0, 60.0),
            wrap_longitude(position.lon + dlon),
        );
        let east_km = dlon * KM_PER_DEGREE * position.lat.to_radians().cos();
        let north_km = (next.lat - position.lat) * KM_PER_DEGREE;
        let length_km = east_km.hypot(north_km);

        let mut speed_kph = length_km / hours as f64;
        if rng.gen_bool(config.outlier_rate.clamp(0.0, 1.0)) {
            speed_kph += rng.gen_range(30.0..80.0);
        }

        let end_time = clock + Duration::hours(hours);
        segments.push(MovementSegment::new(
            entity_id.clone(),
            position,
            next,
            clock,
            end_time,
            length_km,
            speed_kph,
        ));
        position = next;
        clock = end_time;
    }
    segments
}

/// Builds a seeded dataset of eastward-drifting tracks. With the default
/// starting longitude every track crosses the antimeridian.
pub fn build_record_set_from_config(config: &GeneratorConfig) -> anyhow::Result<RecordSet> {
    let segment_count = config
        .normalized_entities()
        .checked_mul(config.normalized_segments())
        .context("overflow computing segment count for generator")?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut segments = Vec::with_capacity(segment_count);
    for index in 0..config.normalized_entities() {
        segments.extend(build_track(config, index, &mut rng));
    }
    Ok(RecordSet::from_segments(segments))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_record_set(entities: usize, segments_per_entity: usize) -> anyhow::Result<RecordSet> {
        let config = GeneratorConfig {
            entities,
            segments_per_entity,
            ..Default::default()
        };
        build_record_set_from_config(&config)
    }

    #[test]
    fn generator_builds_expected_segment_count() {
        let set = build_record_set(3, 40).unwrap();
        assert_eq!(set.segments.len(), 3 * 40);
        assert_eq!(set.entity_ids, vec!["100", "101", "102"]);
        assert_eq!(set.dropped_rows, 0);
    }

    #[test]
    fn generated_segments_are_valid_and_chained() {
        let set = build_record_set(2, 30).unwrap();
        for segment in &set.segments {
            assert!(segment.begin_position.is_valid());
            assert!(segment.end_position.is_valid());
            assert!(segment.begin_time <= segment.end_time);
            assert!(segment.length_km > 0.0);
        }
        for pair in set.segments[..30].windows(2) {
            assert_eq!(pair[0].end_position, pair[1].begin_position);
            assert_eq!(pair[0].end_time, pair[1].begin_time);
        }
    }

    #[test]
    fn default_tracks_cross_the_antimeridian() {
        let set = build_record_set(1, 40).unwrap();
        assert!(set
            .segments
            .iter()
            .any(|s| (s.begin_position.lon - s.end_position.lon).abs() > 180.0));
    }

    #[test]
    fn zero_sizes_are_normalized_to_one() {
        let set = build_record_set(0, 0).unwrap();
        assert_eq!(set.segments.len(), 1);
        assert_eq!(set.entity_ids, vec!["100"]);
    }

    #[test]
    fn seed_makes_generation_repeatable() {
        let config = GeneratorConfig {
            seed: 13,
            ..Default::default()
        };
        let first = build_record_set_from_config(&config).unwrap();
        let second = build_record_set_from_config(&config).unwrap();
        assert_eq!(first, second);
    }
}
