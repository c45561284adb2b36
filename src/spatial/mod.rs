//! Spatial data structures
//!
//! This module contains the cell arena and the mask that constrains it:
//! - Grid construction and mask-aware neighbor queries
//! - Allowed-cell sets with a designated start

/// Cell arena, wall removal, and reachability
pub mod grid;
/// Allowed grid cells plus start coordinate
pub mod mask;

pub use grid::Grid;
pub use mask::Mask;
