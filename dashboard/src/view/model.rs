use crate::workflow::runner::EntityOption;
use serde::{Deserialize, Serialize};
use turtlecore::processing::{PathGeometry, PathSummary};
use turtlecore::records::SelectionWindow;

/// Snapshot handed to whatever draws the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardModel {
    pub entity_id: String,
    pub display_name: String,
    pub entities: Vec<EntityOption>,
    /// Full span of the selected entity, for seeding a time slider.
    pub span: Option<SelectionWindow>,
    pub window: Option<SelectionWindow>,
    pub show_midpoint: bool,
    pub summary: PathSummary,
    pub geometry: PathGeometry,
}
