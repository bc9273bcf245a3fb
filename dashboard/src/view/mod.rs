pub mod model;
pub mod sidebar;
