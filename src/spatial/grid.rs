//! Cell arena addressed by `[i, j]` with mask-aware neighbor queries
//!
//! The grid owns every cell. The generator, its backtracking stack, and
//! render snapshots refer to cells by position only, so there are no
//! references between cells and no ownership cycles.

use std::collections::VecDeque;

use ndarray::Array2;
use rand::Rng;

use crate::io::configuration::MAX_GRID_DIMENSION;
use crate::io::error::{Result, configuration_error, invalid_parameter};
use crate::maze::cell::{Cell, Direction};
use crate::spatial::mask::Mask;

/// Number of whole cells along each axis: `floor(area / cell_length)`
///
/// # Errors
///
/// Returns an error if:
/// - `cell_length` is zero
/// - Either axis holds no whole cell
/// - Either axis exceeds `MAX_GRID_DIMENSION` cells
pub fn grid_dimensions(
    area_width: usize,
    area_height: usize,
    cell_length: usize,
) -> Result<(usize, usize)> {
    if cell_length == 0 {
        return Err(invalid_parameter(
            "cell_length",
            &cell_length,
            &"must be positive",
        ));
    }

    let cols = area_width / cell_length;
    let rows = area_height / cell_length;

    if cols == 0 || rows == 0 {
        return Err(invalid_parameter(
            "area",
            &format!("{area_width}x{area_height}"),
            &format!("holds no whole cell of length {cell_length}"),
        ));
    }

    if cols > MAX_GRID_DIMENSION || rows > MAX_GRID_DIMENSION {
        return Err(invalid_parameter(
            "area",
            &format!("{cols}x{rows} cells"),
            &format!("exceeds maximum grid dimension {MAX_GRID_DIMENSION}"),
        ));
    }

    Ok((cols, rows))
}

/// Two-dimensional cell arena
///
/// All `cols x rows` cells are allocated whatever the mask selects.
/// In-mask positions are precomputed in column-major order so renderers
/// can skip the rest of the grid.
#[derive(Clone, Debug)]
pub struct Grid {
    cells: Array2<Cell>,
    in_mask_positions: Vec<[usize; 2]>,
}

impl Grid {
    /// Allocate a grid and tag each cell by mask membership
    ///
    /// `None` is the unconstrained mode: every cell is in-mask and the maze
    /// spans the full rectangle.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if:
    /// - The mask was built for different grid dimensions
    /// - The grid has no cells
    pub fn build(cols: usize, rows: usize, mask: Option<&Mask>) -> Result<Self> {
        if cols == 0 || rows == 0 {
            return Err(configuration_error(&format!(
                "grid {cols}x{rows} has no cells"
            )));
        }

        if let Some(mask) = mask {
            if mask.cols() != cols || mask.rows() != rows {
                return Err(configuration_error(&format!(
                    "mask is {}x{} but grid is {cols}x{rows}",
                    mask.cols(),
                    mask.rows()
                )));
            }
        }

        let cells = Array2::from_shape_fn((cols, rows), |(i, j)| {
            let in_mask = mask.is_none_or(|m| m.contains(i, j));
            Cell::new(i, j, in_mask)
        });

        let mut in_mask_positions = Vec::new();
        for i in 0..cols {
            for j in 0..rows {
                if cells.get((i, j)).is_some_and(Cell::is_in_mask) {
                    in_mask_positions.push([i, j]);
                }
            }
        }

        Ok(Self {
            cells,
            in_mask_positions,
        })
    }

    /// Grid where every cell is in-mask
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the grid has no cells
    pub fn unconstrained(cols: usize, rows: usize) -> Result<Self> {
        Self::build(cols, rows, None)
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cells.dim().0
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.cells.dim().1
    }

    /// Whether `[i, j]` addresses a cell
    pub fn contains(&self, position: [usize; 2]) -> bool {
        position[0] < self.cols() && position[1] < self.rows()
    }

    /// Cell at `[i, j]`, if in bounds
    pub fn cell(&self, position: [usize; 2]) -> Option<&Cell> {
        self.cells.get((position[0], position[1]))
    }

    pub(crate) fn cell_mut(&mut self, position: [usize; 2]) -> Option<&mut Cell> {
        self.cells.get_mut((position[0], position[1]))
    }

    /// All cells in storage order
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// In-mask positions in column-major order
    pub fn in_mask_positions(&self) -> &[[usize; 2]] {
        &self.in_mask_positions
    }

    /// In-mask cells in column-major order
    pub fn in_mask_cells(&self) -> impl Iterator<Item = &Cell> {
        self.in_mask_positions
            .iter()
            .filter_map(|&position| self.cell(position))
    }

    /// Number of in-mask cells
    pub fn in_mask_count(&self) -> usize {
        self.in_mask_positions.len()
    }

    /// Number of visited cells anywhere in the grid
    pub fn visited_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_visited()).count()
    }

    /// In-bounds, in-mask neighbor of `position` toward `direction`
    pub fn masked_neighbor(&self, position: [usize; 2], direction: Direction) -> Option<&Cell> {
        let cell = self.cell(position)?;
        let candidate = *cell
            .neighbor_coordinates(self.cols(), self.rows())
            .get(direction.index())?;
        self.cell(candidate.grid_position()?)
            .filter(|neighbor| neighbor.is_in_mask())
    }

    /// Unvisited in-mask neighbors of `position` in N, E, S, W order
    pub fn unvisited_masked_neighbors(&self, position: [usize; 2]) -> Vec<[usize; 2]> {
        let Some(cell) = self.cell(position) else {
            return Vec::new();
        };

        cell.neighbor_coordinates(self.cols(), self.rows())
            .iter()
            .filter_map(|candidate| self.cell(candidate.grid_position()?))
            .filter(|neighbor| neighbor.is_in_mask() && !neighbor.is_visited())
            .map(Cell::position)
            .collect()
    }

    /// Pick one unvisited in-mask neighbor uniformly at random
    ///
    /// The candidate list is built in the fixed N, E, S, W order before
    /// sampling, so a seeded `rng` gives a reproducible choice.
    pub fn unvisited_masked_neighbor<R: Rng + ?Sized>(
        &self,
        position: [usize; 2],
        rng: &mut R,
    ) -> Option<[usize; 2]> {
        let neighbors = self.unvisited_masked_neighbors(position);
        if neighbors.is_empty() {
            return None;
        }
        neighbors.get(rng.random_range(0..neighbors.len())).copied()
    }

    /// Mark the cell at `position` visited
    ///
    /// Out-of-mask cells are left untouched.
    pub(crate) fn mark_visited(&mut self, position: [usize; 2]) {
        if let Some(cell) = self.cell_mut(position) {
            if cell.is_in_mask() {
                cell.mark_visited();
            }
        }
    }

    /// Clear the shared wall between two axis-adjacent cells
    ///
    /// The wall pair is chosen from the relative offset of `b` to `a`:
    /// `a` loses the wall facing `b` and `b` loses the wall facing `a`.
    /// Non-adjacent pairs are ignored.
    pub(crate) fn remove_walls_between(&mut self, a: [usize; 2], b: [usize; 2]) {
        let Some(direction) = Direction::between(a, b) else {
            return;
        };

        if let Some(cell) = self.cell_mut(a) {
            cell.clear_wall(direction);
        }
        if let Some(cell) = self.cell_mut(b) {
            cell.clear_wall(direction.opposite());
        }
    }

    /// Count in-mask cells reachable from `start` through in-mask adjacency
    ///
    /// Walls are ignored. Anything short of `in_mask_count()` means the mask
    /// has islands the traversal can never reach.
    pub fn reachable_in_mask_count(&self, start: [usize; 2]) -> usize {
        if !self.cell(start).is_some_and(Cell::is_in_mask) {
            return 0;
        }

        let mut seen = Array2::from_elem((self.cols(), self.rows()), false);
        let mut queue = VecDeque::from([start]);
        if let Some(flag) = seen.get_mut((start[0], start[1])) {
            *flag = true;
        }
        let mut count = 0;

        while let Some(position) = queue.pop_front() {
            count += 1;
            for direction in Direction::ALL {
                let Some(neighbor) = self.masked_neighbor(position, direction) else {
                    continue;
                };
                let [i, j] = neighbor.position();
                if let Some(flag) = seen.get_mut((i, j)) {
                    if !*flag {
                        *flag = true;
                        queue.push_back([i, j]);
                    }
                }
            }
        }

        count
    }
}
