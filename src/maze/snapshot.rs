//! Per-step render state handed to frame renderers

use crate::maze::generator::MazeGenerator;
use crate::spatial::grid::Grid;

/// Render state of one in-mask cell
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellSnapshot {
    /// Column and row `[i, j]`
    pub position: [usize; 2],
    /// Wall flags in N, E, S, W order
    pub walls: [bool; 4],
    /// Whether the cell has been visited
    pub visited: bool,
}

/// Self-consistent view of the maze between two steps
///
/// Only in-mask cells are recorded, in the grid's column-major order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    /// Number of completed steps when the snapshot was taken
    pub step: usize,
    /// Grid columns
    pub cols: usize,
    /// Grid rows
    pub rows: usize,
    /// Cell to highlight
    pub current: [usize; 2],
    /// Every in-mask cell
    pub cells: Vec<CellSnapshot>,
}

impl Snapshot {
    /// Capture the in-mask cells of `grid`
    pub fn capture(grid: &Grid, current: [usize; 2], step: usize) -> Self {
        let cells = grid
            .in_mask_cells()
            .map(|cell| CellSnapshot {
                position: cell.position(),
                walls: cell.walls(),
                visited: cell.is_visited(),
            })
            .collect();

        Self {
            step,
            cols: grid.cols(),
            rows: grid.rows(),
            current,
            cells,
        }
    }

    /// Number of recorded cells that are visited
    pub fn visited_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.visited).count()
    }
}

/// Receives the generator between steps
///
/// Implementors decide whether to take a [`Snapshot`]; the generator keeps
/// no snapshot state of its own.
pub trait StepObserver {
    /// Called once before the first step and once after every step
    fn observe(&mut self, generator: &MazeGenerator);
}

impl<F> StepObserver for F
where
    F: FnMut(&MazeGenerator),
{
    fn observe(&mut self, generator: &MazeGenerator) {
        self(generator);
    }
}
