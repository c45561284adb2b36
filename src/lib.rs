//! Perfect maze generation constrained to an arbitrary 2D mask
//!
//! A grid of square cells is tagged by mask membership, then carved into a
//! spanning tree by randomized depth-first search with backtracking. The
//! generator advances one step at a time so each intermediate state can be
//! rendered, or runs straight to completion.

#![forbid(unsafe_code)]

/// Post-generation structural analysis
pub mod analysis;
/// Input/output operations and error handling
pub mod io;
/// Cells and the backtracking generator
pub mod maze;
/// Grid arena and masks
pub mod spatial;

pub use io::error::{MazeError, Result};
