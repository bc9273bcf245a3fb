use crate::generator::profile::build_record_set_from_config;
use crate::workflow::config::DashboardConfig;
use anyhow::Context;
use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use turtlecore::prelude::PipelineConfig;
use turtlecore::processing::{entity_span, load_path, RecordSet};
use turtlecore::records::{AliasBook, SelectionWindow};
use turtlecore::{compute, SelectionInputs, SelectionOutput};

/// Entry in the entity picker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityOption {
    pub entity_id: String,
    pub alias: Option<String>,
}

/// Owns the read-only dataset and runs selections against it.
#[derive(Clone)]
pub struct Runner {
    records: Arc<RecordSet>,
    aliases: AliasBook,
    pipeline: PipelineConfig,
}

impl Runner {
    pub fn new(records: Arc<RecordSet>, config: &DashboardConfig) -> Self {
        Self {
            records,
            aliases: config.aliases.clone(),
            pipeline: config.to_pipeline_config(),
        }
    }

    /// Loads the CSV named in `config`, or generates a synthetic dataset.
    pub fn load(config: &DashboardConfig) -> anyhow::Result<Self> {
        let records = if let Some(generator) = config.synthetic.as_ref() {
            build_record_set_from_config(generator).context("generating synthetic dataset")?
        } else if let Some(path) = config.data.as_ref() {
            load_path(path, config.to_load_options())
                .with_context(|| format!("loading movement records {}", path.display()))?
        } else {
            anyhow::bail!("no dataset configured: pass --data <csv> or --synthetic");
        };

        if records.is_empty() {
            warn!("dataset contains no movement segments");
        }
        if records.dropped_rows > 0 {
            warn!(
                "excluded {} row(s) with null required fields",
                records.dropped_rows
            );
        }
        info!(
            "dataset ready: {} segment(s), {} entit(ies)",
            records.segments.len(),
            records.entity_ids.len()
        );
        Ok(Self::new(Arc::new(records), config))
    }

    pub fn records(&self) -> &RecordSet {
        &self.records
    }

    pub fn entities(&self) -> Vec<EntityOption> {
        self.records
            .entity_ids
            .iter()
            .map(|id| EntityOption {
                entity_id: id.clone(),
                alias: self.aliases.alias_for(id).map(str::to_string),
            })
            .collect()
    }

    pub fn default_entity(&self) -> Option<&str> {
        self.records.entity_ids.first().map(String::as_str)
    }

    /// Maps an alias or raw id to an entity id.
    pub fn resolve_entity(&self, name: &str) -> String {
        self.aliases.resolve(name).to_string()
    }

    pub fn alias_for(&self, entity_id: &str) -> Option<String> {
        self.aliases.alias_for(entity_id).map(str::to_string)
    }

    pub fn span(&self, entity_id: &str) -> Option<SelectionWindow> {
        entity_span(&self.records.segments, entity_id)
    }

    /// Builds a window from optional bounds, filling a missing bound from
    /// the entity's full span.
    pub fn resolve_window(
        &self,
        entity_id: &str,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Option<SelectionWindow> {
        if start.is_none() && end.is_none() {
            return None;
        }
        let span = self.span(entity_id);
        let start = start.or(span.map(|s| s.start))?;
        let end = end.or(span.map(|s| s.end))?;
        Some(SelectionWindow::new(start, end))
    }

    pub fn execute(&self, inputs: &SelectionInputs) -> SelectionOutput {
        compute(&self.records.segments, inputs, &self.pipeline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::profile::GeneratorConfig;
    use chrono::Duration;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn synthetic_config() -> DashboardConfig {
        let mut cfg = DashboardConfig {
            synthetic: Some(GeneratorConfig {
                entities: 2,
                segments_per_entity: 10,
                ..Default::default()
            }),
            ..Default::default()
        };
        cfg.aliases.insert("Shelly", "100");
        cfg
    }

    #[test]
    fn runner_executes_selection() {
        let runner = Runner::load(&synthetic_config()).unwrap();
        let output = runner.execute(&SelectionInputs::for_entity("100"));
        assert_eq!(output.summary.move_count, 10);
        assert_eq!(output.geometry.waypoints.len(), 9);
    }

    #[test]
    fn runner_lists_entities_with_aliases() {
        let runner = Runner::load(&synthetic_config()).unwrap();
        let entities = runner.entities();
        assert_eq!(entities.len(), 2);
        assert_eq!(entities[0].alias.as_deref(), Some("Shelly"));
        assert_eq!(entities[1].alias, None);
        assert_eq!(runner.resolve_entity("Shelly"), "100");
        assert_eq!(runner.default_entity(), Some("100"));
    }

    #[test]
    fn partial_window_is_completed_from_span() {
        let runner = Runner::load(&synthetic_config()).unwrap();
        let span = runner.span("100").unwrap();
        let start = span.start + Duration::days(2);
        let window = runner.resolve_window("100", Some(start), None).unwrap();
        assert_eq!(window.start, start);
        assert_eq!(window.end, span.end);
        assert!(runner.resolve_window("100", None, None).is_none());
        assert!(runner.resolve_window("nobody", Some(start), None).is_none());
    }

    #[test]
    fn runner_accepts_an_empty_dataset() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"series_id,longitude_begin,latitude_begin,longitude_end,latitude_end,datetime_begin,datetime_end,length_km,speed_kph\n")
            .unwrap();
        let path = temp.into_temp_path();
        let cfg = DashboardConfig {
            data: Some(path.to_path_buf()),
            ..Default::default()
        };
        let runner = Runner::load(&cfg).unwrap();
        assert!(runner.records().is_empty());
        assert_eq!(runner.default_entity(), None);
        assert_eq!(runner.execute(&SelectionInputs::for_entity("1")).summary.move_count, 0);
    }

    #[test]
    fn runner_requires_a_dataset() {
        assert!(Runner::load(&DashboardConfig::default()).is_err());
    }
}
