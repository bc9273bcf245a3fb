use crate::view::model::DashboardModel;
use crate::workflow::runner::Runner;
use chrono::{DateTime, Utc};
use log::debug;
use std::sync::Arc;
use turtlecore::math::UnitSystem;
use turtlecore::records::SelectionWindow;
use turtlecore::SelectionInputs;

/// Per-viewer selection state. Sessions share the runner's dataset but
/// never each other's choices.
pub struct DashboardSession {
    runner: Arc<Runner>,
    inputs: SelectionInputs,
}

impl DashboardSession {
    pub fn new(runner: Arc<Runner>) -> Self {
        let entity_id = runner.default_entity().unwrap_or_default().to_string();
        Self {
            runner,
            inputs: SelectionInputs::for_entity(entity_id),
        }
    }

    #[cfg(test)]
    pub fn inputs(&self) -> &SelectionInputs {
        &self.inputs
    }

    /// Switches to another entity by id or alias; the window resets to the
    /// new entity's full span.
    pub fn select_entity(&mut self, name: &str) {
        self.inputs.entity_id = self.runner.resolve_entity(name);
        self.inputs.window = None;
        debug!("session selected entity {}", self.inputs.entity_id);
    }

    pub fn set_window(&mut self, start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) {
        self.inputs.window = self
            .runner
            .resolve_window(&self.inputs.entity_id, start, end);
    }

    pub fn set_units(&mut self, units: UnitSystem) {
        self.inputs.units = units;
    }

    pub fn set_show_midpoint(&mut self, show: bool) {
        self.inputs.show_midpoint = show;
    }

    /// Recomputes the whole view from the current state.
    pub fn refresh(&self) -> DashboardModel {
        let output = self.runner.execute(&self.inputs);
        let entity_id = self.inputs.entity_id.clone();
        let display_name = self
            .runner
            .alias_for(&entity_id)
            .unwrap_or_else(|| entity_id.clone());
        let span: Option<SelectionWindow> = self.runner.span(&entity_id);

        DashboardModel {
            entity_id,
            display_name,
            entities: self.runner.entities(),
            span,
            window: self.inputs.window,
            show_midpoint: self.inputs.show_midpoint,
            summary: output.summary,
            geometry: output.geometry,
        }
    }
}
