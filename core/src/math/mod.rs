pub mod stats;
pub mod units;

pub use stats::StatsHelper;
pub use units::{UnitSystem, KM_TO_MILES};
