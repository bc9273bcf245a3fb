pub mod filter;
pub mod geometry;
pub mod loader;
pub mod stats;
pub mod unwrap;

pub use filter::{entity_span, select};
pub use geometry::{build_geometry, LineFeature, PathGeometry, PointFeature};
pub use loader::{load_path, load_reader, parse_timestamp, LoadOptions, RecordSet};
pub use stats::{path_midpoint, summarize, MoveDuration, PathSummary, SummaryOptions};
pub use unwrap::{unwrap_longitudes, unwrap_pair, unwrap_segment};
