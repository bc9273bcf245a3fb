use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const KM_TO_MILES: f64 = 0.621371;

/// Unit system used for every distance- and speed-valued output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    /// Converts a kilometre-based value (km or km/h) into this system.
    pub fn convert(self, metric_value: f64) -> f64 {
        match self {
            UnitSystem::Metric => metric_value,
            UnitSystem::Imperial => metric_value * KM_TO_MILES,
        }
    }

    pub fn distance_label(self) -> &'static str {
        match self {
            UnitSystem::Metric => "km",
            UnitSystem::Imperial => "miles",
        }
    }

    pub fn speed_label(self) -> &'static str {
        match self {
            UnitSystem::Metric => "km/hr",
            UnitSystem::Imperial => "mph",
        }
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnitSystem::Metric => write!(f, "metric"),
            UnitSystem::Imperial => write!(f, "imperial"),
        }
    }
}

impl FromStr for UnitSystem {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "metric" | "km" | "kilometers" => Ok(UnitSystem::Metric),
            "imperial" | "mi" | "miles" => Ok(UnitSystem::Imperial),
            other => Err(format!("unknown unit system '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn imperial_conversion_uses_statute_miles() {
        assert_eq!(UnitSystem::Metric.convert(60.0), 60.0);
        assert!((UnitSystem::Imperial.convert(60.0) - 37.28226).abs() < 1e-9);
    }

    #[test]
    fn parses_dashboard_labels() {
        assert_eq!("Kilometers".parse::<UnitSystem>(), Ok(UnitSystem::Metric));
        assert_eq!("Miles".parse::<UnitSystem>(), Ok(UnitSystem::Imperial));
        assert!("furlongs".parse::<UnitSystem>().is_err());
    }
}
