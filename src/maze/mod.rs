//! Maze generation by randomized depth-first backtracking
//!
//! This module contains the traversal itself:
//! - Cells, wall flags, and axis directions
//! - The step-by-step generator state machine
//! - Render snapshots and the between-step observer hook

/// Grid cells and neighbor directions
pub mod cell;
/// Backtracking generator with single-step and run-to-completion entry points
pub mod generator;
/// Per-step render state and observer trait
pub mod snapshot;

pub use generator::{GenerationState, MazeGenerator};
