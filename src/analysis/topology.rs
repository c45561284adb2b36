//! Structural checks on a carved grid
//!
//! A perfect maze over the in-mask cells is a spanning tree: every cell is
//! connected and there are exactly `cells - 1` passages. The counts here
//! let callers confirm that after generation and report on the result.

use std::collections::VecDeque;
use std::fmt;

use ndarray::Array2;

use crate::maze::cell::{Cell, Direction};
use crate::spatial::grid::Grid;

/// Summary of passages and connectivity among in-mask cells
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MazeTopology {
    /// Number of in-mask cells
    pub cells: usize,
    /// Number of visited in-mask cells
    pub visited: usize,
    /// Cleared walls between two in-mask cells, each pair counted once
    pub passages: usize,
    /// Connected components of in-mask cells joined by passages
    pub components: usize,
    /// Adjacent pairs where only one side's wall is cleared
    pub asymmetric_walls: usize,
    /// In-mask cells with exactly one passage
    pub dead_ends: usize,
    /// Whether any out-of-mask cell is marked visited
    pub out_of_mask_visited: bool,
}

impl MazeTopology {
    /// Walk the grid and count passages, components, and wall mismatches
    pub fn analyze(grid: &Grid) -> Self {
        let mut passages = 0;
        let mut asymmetric_walls = 0;
        let mut dead_ends = 0;

        for cell in grid.in_mask_cells() {
            let open = open_neighbors(grid, cell);
            if open.len() == 1 {
                dead_ends += 1;
            }

            // East and South only, so each adjacent pair is seen once
            for direction in [Direction::East, Direction::South] {
                let Some(neighbor) = grid.masked_neighbor(cell.position(), direction) else {
                    continue;
                };
                let here_open = !cell.has_wall(direction);
                let there_open = !neighbor.has_wall(direction.opposite());
                if here_open && there_open {
                    passages += 1;
                } else if here_open != there_open {
                    asymmetric_walls += 1;
                }
            }
        }

        Self {
            cells: grid.in_mask_count(),
            visited: grid.in_mask_cells().filter(|cell| cell.is_visited()).count(),
            passages,
            components: count_components(grid),
            asymmetric_walls,
            dead_ends,
            out_of_mask_visited: grid
                .cells()
                .any(|cell| !cell.is_in_mask() && cell.is_visited()),
        }
    }

    /// Connected, acyclic, and symmetric over the in-mask cells
    pub const fn is_perfect(&self) -> bool {
        self.cells > 0
            && self.components == 1
            && self.asymmetric_walls == 0
            && self.passages == self.cells - 1
    }

    /// Every in-mask cell visited and no out-of-mask cell touched
    pub const fn is_fully_covered(&self) -> bool {
        self.visited == self.cells && !self.out_of_mask_visited
    }
}

impl fmt::Display for MazeTopology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} cells, {} visited, {} passages, {} components, {} dead ends",
            self.cells, self.visited, self.passages, self.components, self.dead_ends
        )
    }
}

/// In-mask neighbors joined to `cell` by a passage cleared on both sides
fn open_neighbors<'a>(grid: &'a Grid, cell: &Cell) -> Vec<&'a Cell> {
    Direction::ALL
        .into_iter()
        .filter(|&direction| !cell.has_wall(direction))
        .filter_map(|direction| {
            grid.masked_neighbor(cell.position(), direction)
                .filter(|neighbor| !neighbor.has_wall(direction.opposite()))
        })
        .collect()
}

// Breadth-first flood over passages, one flood per unseen in-mask cell
fn count_components(grid: &Grid) -> usize {
    let mut seen = Array2::from_elem((grid.cols(), grid.rows()), false);
    let mut components = 0;

    for &origin in grid.in_mask_positions() {
        if seen.get((origin[0], origin[1])).copied().unwrap_or(true) {
            continue;
        }
        components += 1;

        let mut queue = VecDeque::from([origin]);
        if let Some(flag) = seen.get_mut((origin[0], origin[1])) {
            *flag = true;
        }

        while let Some(position) = queue.pop_front() {
            let Some(cell) = grid.cell(position) else {
                continue;
            };
            for neighbor in open_neighbors(grid, cell) {
                let [i, j] = neighbor.position();
                if let Some(flag) = seen.get_mut((i, j)) {
                    if !*flag {
                        *flag = true;
                        queue.push_back([i, j]);
                    }
                }
            }
        }
    }

    components
}
