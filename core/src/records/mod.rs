pub mod entity;
pub mod segment;

pub use entity::{AliasBook, SelectionWindow, TrackedEntity};
pub use segment::{GeoPosition, MovementSegment};
