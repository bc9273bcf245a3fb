use serde::{Deserialize, Serialize};

/// Default ceiling for a plausible loggerhead swim speed, in km/h.
///
/// Readings above this are treated as sensor outliers when reporting the
/// maximum speed of a path.
pub const DEFAULT_MAX_SPEED_CUTOFF_KPH: f64 = 24.0;

/// Shared configuration for the selection pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub max_speed_cutoff_kph: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_speed_cutoff_kph: DEFAULT_MAX_SPEED_CUTOFF_KPH,
        }
    }
}

/// Common error type for loading and processing movement records.
#[derive(thiserror::Error, Debug)]
pub enum TrackError {
    #[error("missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error("malformed record on line {line}: {reason}")]
    MalformedRecord { line: u64, reason: String },
    #[error("{dropped} row(s) contained null values in required columns")]
    IncompleteRows { dropped: usize },
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv failure: {0}")]
    Csv(#[from] csv::Error),
}

pub type TrackResult<T> = Result<T, TrackError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_config_defaults_to_species_ceiling() {
        assert_eq!(PipelineConfig::default().max_speed_cutoff_kph, 24.0);
    }

    #[test]
    fn missing_columns_message_lists_every_column() {
        let err = TrackError::MissingColumns(vec!["length_km".into(), "speed_kph".into()]);
        assert_eq!(
            err.to_string(),
            "missing required column(s): length_km, speed_kph"
        );
    }
}
