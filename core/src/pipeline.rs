use crate::math::UnitSystem;
use crate::prelude::PipelineConfig;
use crate::processing::{
    build_geometry, select, summarize, unwrap_longitudes, PathGeometry, PathSummary,
    SummaryOptions,
};
use crate::records::{MovementSegment, SelectionWindow};
use crate::telemetry::log::LogManager;
use serde::{Deserialize, Serialize};

/// Everything the presentation layer supplies for one recomputation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionInputs {
    pub entity_id: String,
    #[serde(default)]
    pub window: Option<SelectionWindow>,
    #[serde(default)]
    pub units: UnitSystem,
    #[serde(default)]
    pub show_midpoint: bool,
}

impl SelectionInputs {
    pub fn for_entity(entity_id: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            window: None,
            units: UnitSystem::default(),
            show_midpoint: false,
        }
    }
}

/// Result handed back to the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionOutput {
    /// Selected segments with corrected longitudes, in chronological order.
    pub segments: Vec<MovementSegment>,
    pub summary: PathSummary,
    pub geometry: PathGeometry,
}

impl SelectionOutput {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Filter, unwrap, then aggregate and build geometry. Pure with respect to
/// `records`; every call recomputes from scratch.
pub fn compute(
    records: &[MovementSegment],
    inputs: &SelectionInputs,
    config: &PipelineConfig,
) -> SelectionOutput {
    let logger = LogManager::new("pipeline");

    let mut segments = select(records, &inputs.entity_id, inputs.window);
    let wrapped = unwrap_longitudes(&mut segments);

    let summary = summarize(
        &segments,
        &SummaryOptions {
            units: inputs.units,
            max_speed_cutoff_kph: config.max_speed_cutoff_kph,
        },
    );
    let geometry = build_geometry(&segments, inputs.show_midpoint);

    if segments.is_empty() {
        logger.caution(&format!("no segments for entity {}", inputs.entity_id));
    } else {
        logger.record(&format!(
            "entity {} -> {} move(s), {} wrapped, {} units",
            inputs.entity_id,
            segments.len(),
            wrapped,
            inputs.units
        ));
    }

    SelectionOutput {
        segments,
        summary,
        geometry,
    }
}
