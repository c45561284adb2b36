//! Generation constants and construction-time configuration

use crate::io::error::Result;
use crate::spatial::grid::grid_dimensions;

// Default values for configurable parameters
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 1;

/// Default cell edge length, in area units (pixels for image masks)
pub const DEFAULT_CELL_LENGTH: usize = 10;

/// Default width and height of the unconstrained generation area
pub const DEFAULT_AREA_SIZE: usize = 300;

// Limits
/// Maximum allowed grid dimension
pub const MAX_GRID_DIMENSION: usize = 10_000;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_maze";
/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 5;
/// Minimum frame delay that viewers reliably support (in milliseconds)
pub const VIEWER_MIN_FRAME_DELAY_MS: u32 = 50;
/// Upper bound on frames rendered for one animation
pub const MAX_CAPTURED_FRAMES: usize = 2_000;

/// RGBA colours used when rendering a maze frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    /// Fill for the whole image and for out-of-mask cells
    pub background: [u8; 4],
    /// Wall line colour
    pub wall: [u8; 4],
    /// Fill for visited cells
    pub visited: [u8; 4],
    /// Fill for the current cell
    pub current: [u8; 4],
}

/// White background, red walls, blue visited cells, green cursor
pub const DEFAULT_PALETTE: Palette = Palette {
    background: [255, 255, 255, 255],
    wall: [255, 0, 0, 255],
    visited: [0, 0, 255, 255],
    current: [0, 128, 0, 255],
};

impl Default for Palette {
    fn default() -> Self {
        DEFAULT_PALETTE
    }
}

/// Construction-time generation parameters
///
/// Area dimensions and cell length share one length unit. Nothing here is
/// mutable once a generator has been built from it.
#[derive(Clone, Copy, Debug)]
pub struct MazeConfig {
    /// Width of the generation area
    pub area_width: usize,
    /// Height of the generation area
    pub area_height: usize,
    /// Edge length of one square cell
    pub cell_length: usize,
    /// Explicit start `[i, j]`, overriding the mask's start
    pub start: Option<[usize; 2]>,
    /// Seed for the generator's random stream
    pub seed: u64,
    /// Reject masks whose in-mask cells are not all reachable from the start
    pub require_connected: bool,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            area_width: DEFAULT_AREA_SIZE,
            area_height: DEFAULT_AREA_SIZE,
            cell_length: DEFAULT_CELL_LENGTH,
            start: None,
            seed: DEFAULT_SEED,
            require_connected: false,
        }
    }
}

impl MazeConfig {
    /// Grid `(cols, rows)` derived from the area and cell length
    ///
    /// # Errors
    ///
    /// Returns an error if the cell length is zero, the area holds no whole
    /// cell, or a dimension exceeds `MAX_GRID_DIMENSION`
    pub fn grid_dimensions(&self) -> Result<(usize, usize)> {
        grid_dimensions(self.area_width, self.area_height, self.cell_length)
    }
}
