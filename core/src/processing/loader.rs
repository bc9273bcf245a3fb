use crate::prelude::{TrackError, TrackResult};
use crate::records::{GeoPosition, MovementSegment};
use crate::telemetry::log::LogManager;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;

pub const COL_ENTITY: &str = "series_id";
pub const COL_LON_BEGIN: &str = "longitude_begin";
pub const COL_LAT_BEGIN: &str = "latitude_begin";
pub const COL_LON_END: &str = "longitude_end";
pub const COL_LAT_END: &str = "latitude_end";
pub const COL_TIME_BEGIN: &str = "datetime_begin";
pub const COL_TIME_END: &str = "datetime_end";
pub const COL_LENGTH: &str = "length_km";
pub const COL_SPEED: &str = "speed_kph";

pub const REQUIRED_COLUMNS: [&str; 9] = [
    COL_ENTITY,
    COL_LON_BEGIN,
    COL_LAT_BEGIN,
    COL_LON_END,
    COL_LAT_END,
    COL_TIME_BEGIN,
    COL_TIME_END,
    COL_LENGTH,
    COL_SPEED,
];

/// pandas' default `na_values` plus `NaT`, compared case-insensitively.
const NULL_MARKERS: [&str; 15] = [
    "na",
    "n/a",
    "#n/a",
    "#n/a n/a",
    "#na",
    "<na>",
    "nan",
    "-nan",
    "1.#ind",
    "-1.#ind",
    "1.#qnan",
    "-1.#qnan",
    "null",
    "none",
    "nat",
];

const NAIVE_FORMATS: [&str; 7] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

/// Loader behaviour knobs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOptions {
    /// Fail with [`TrackError::IncompleteRows`] instead of silently dropping
    /// rows that hold nulls in required columns.
    pub strict: bool,
}

/// Read-only source of truth produced at startup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    pub segments: Vec<MovementSegment>,
    /// Distinct entity ids in order of first appearance.
    pub entity_ids: Vec<String>,
    pub dropped_rows: usize,
}

impl RecordSet {
    pub fn from_segments(segments: Vec<MovementSegment>) -> Self {
        let entity_ids = distinct_entities(&segments);
        Self {
            segments,
            entity_ids,
            dropped_rows: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

/// Column positions of the required fields within one header row.
struct ColumnIndex([usize; 9]);

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> TrackResult<Self> {
        let mut slots = [0usize; 9];
        let mut missing = Vec::new();
        for (slot, name) in slots.iter_mut().zip(REQUIRED_COLUMNS) {
            match headers.iter().position(|header| header.trim() == name) {
                Some(position) => *slot = position,
                None => missing.push(name.to_string()),
            }
        }
        if !missing.is_empty() {
            return Err(TrackError::MissingColumns(missing));
        }
        Ok(Self(slots))
    }

    fn field<'r>(&self, record: &'r StringRecord, column: usize) -> Option<&'r str> {
        record
            .get(self.0[column])
            .map(str::trim)
            .filter(|value| !is_null(value))
    }
}

pub fn load_path<P: AsRef<Path>>(path: P, options: LoadOptions) -> TrackResult<RecordSet> {
    let file = File::open(path.as_ref())?;
    load_reader(file, options)
}

pub fn load_reader<R: Read>(source: R, options: LoadOptions) -> TrackResult<RecordSet> {
    let logger = LogManager::new("loader");
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(source);

    let columns = ColumnIndex::from_headers(reader.headers()?)?;

    let mut segments = Vec::new();
    let mut dropped_rows = 0usize;
    for row in reader.records() {
        let record = row?;
        let line = record.position().map(|pos| pos.line()).unwrap_or(0);

        let fields: Option<Vec<&str>> = (0..REQUIRED_COLUMNS.len())
            .map(|column| columns.field(&record, column))
            .collect();
        let Some(fields) = fields else {
            dropped_rows += 1;
            logger.detail(&format!("dropping line {} with null required field", line));
            continue;
        };

        segments.push(parse_segment(&fields, line)?);
    }

    if dropped_rows > 0 {
        if options.strict {
            return Err(TrackError::IncompleteRows {
                dropped: dropped_rows,
            });
        }
        logger.detail(&format!("{} incomplete row(s) excluded", dropped_rows));
    }

    let entity_ids = distinct_entities(&segments);
    logger.record(&format!(
        "loaded {} segment(s) across {} entit(ies)",
        segments.len(),
        entity_ids.len()
    ));

    Ok(RecordSet {
        segments,
        entity_ids,
        dropped_rows,
    })
}

/// Parses the timestamp formats found in telemetry exports. Naive values
/// are read as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Some(naive) = NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
    {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn parse_segment(fields: &[&str], line: u64) -> TrackResult<MovementSegment> {
    let number = |column: usize| -> TrackResult<f64> {
        fields[column]
            .parse::<f64>()
            .map_err(|_| malformed(line, REQUIRED_COLUMNS[column], fields[column]))
    };
    let timestamp = |column: usize| -> TrackResult<DateTime<Utc>> {
        parse_timestamp(fields[column])
            .ok_or_else(|| malformed(line, REQUIRED_COLUMNS[column], fields[column]))
    };

    let begin_position = GeoPosition::new(number(2)?, number(1)?);
    let end_position = GeoPosition::new(number(4)?, number(3)?);
    for position in [begin_position, end_position] {
        if !position.is_valid() {
            return Err(TrackError::MalformedRecord {
                line,
                reason: format!(
                    "position ({}, {}) is outside the geographic range",
                    position.lat, position.lon
                ),
            });
        }
    }

    let begin_time = timestamp(5)?;
    let end_time = timestamp(6)?;
    if begin_time > end_time {
        return Err(TrackError::MalformedRecord {
            line,
            reason: format!("begin time {} is after end time {}", begin_time, end_time),
        });
    }

    Ok(MovementSegment::new(
        fields[0],
        begin_position,
        end_position,
        begin_time,
        end_time,
        number(7)?,
        number(8)?,
    ))
}

fn malformed(line: u64, column: &str, value: &str) -> TrackError {
    TrackError::MalformedRecord {
        line,
        reason: format!("cannot parse {} value '{}'", column, value),
    }
}

fn is_null(value: &str) -> bool {
    value.is_empty()
        || NULL_MARKERS
            .iter()
            .any(|marker| value.eq_ignore_ascii_case(marker))
}

fn distinct_entities(segments: &[MovementSegment]) -> Vec<String> {
    let mut ids: Vec<String> = Vec::new();
    for segment in segments {
        if !ids.iter().any(|id| id == &segment.entity_id) {
            ids.push(segment.entity_id.clone());
        }
    }
    ids
}
