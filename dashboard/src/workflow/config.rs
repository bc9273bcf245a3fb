use crate::generator::profile::GeneratorConfig;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use turtlecore::math::UnitSystem;
use turtlecore::prelude::{PipelineConfig, DEFAULT_MAX_SPEED_CUTOFF_KPH};
use turtlecore::processing::LoadOptions;
use turtlecore::records::AliasBook;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// CSV export of movement segments.
    pub data: Option<PathBuf>,
    /// Entity id or alias selected at startup.
    pub entity: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub units: UnitSystem,
    pub show_midpoint: bool,
    pub max_speed_cutoff_kph: f64,
    pub strict: bool,
    /// Display name -> entity id.
    pub aliases: AliasBook,
    /// Generate a demo dataset instead of reading `data`.
    pub synthetic: Option<GeneratorConfig>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data: None,
            entity: None,
            start: None,
            end: None,
            units: UnitSystem::Metric,
            show_midpoint: false,
            max_speed_cutoff_kph: DEFAULT_MAX_SPEED_CUTOFF_KPH,
            strict: false,
            aliases: AliasBook::new(),
            synthetic: None,
        }
    }
}

impl DashboardConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading dashboard config {}", path_ref.display()))?;
        let config: DashboardConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing dashboard config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(data: Option<PathBuf>, units: UnitSystem, max_speed_cutoff_kph: f64) -> Self {
        Self {
            data,
            units,
            max_speed_cutoff_kph,
            ..Default::default()
        }
    }

    /// Replaces each window bound only when a new value is supplied.
    pub fn override_window(&mut self, start: Option<String>, end: Option<String>) {
        if start.is_some() {
            self.start = start;
        }
        if end.is_some() {
            self.end = end;
        }
    }

    pub fn to_pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            max_speed_cutoff_kph: self.max_speed_cutoff_kph,
        }
    }

    pub fn to_load_options(&self) -> LoadOptions {
        LoadOptions {
            strict: self.strict,
        }
    }
}
