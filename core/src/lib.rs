//! Movement-segment pipeline behind the sea turtle migration dashboard.
//!
//! Records are loaded once, then every selection change runs
//! filter → longitude unwrap → {statistics, geometry} through
//! [`pipeline::compute`]. The loaded [`processing::RecordSet`] is read-only
//! and can be shared between independent sessions.

pub mod math;
pub mod pipeline;
pub mod prelude;
pub mod processing;
pub mod records;
pub mod telemetry;

pub use pipeline::{compute, SelectionInputs, SelectionOutput};
pub use prelude::{PipelineConfig, TrackError, TrackResult};
