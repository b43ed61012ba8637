//! Placement of avatars into chart regions.
//!
//! Layouts are pure geometry plus seeded draws; they never touch pixels. Each one is built
//! and validated from the caller's labels before any canvas exists, so configuration errors
//! surface without allocating.

pub mod grid;
pub mod polygon;
pub mod quadrant;

pub use grid::{GridAssignment, GridCell, GridLayout};
pub use polygon::{PolygonLayout, WedgePlacement};
pub use quadrant::{QuadrantLabels, QuadrantLayout};
