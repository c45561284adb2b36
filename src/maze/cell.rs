//! Grid cells with wall state and the four axis directions

/// Axis direction from a cell to one of its neighbors
///
/// The `j` axis grows downward, so North is `j - 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Toward row `j - 1`
    North,
    /// Toward column `i + 1`
    East,
    /// Toward row `j + 1`
    South,
    /// Toward column `i - 1`
    West,
}

impl Direction {
    /// Fixed enumeration order used to build neighbor candidate lists
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Slot of this direction in a cell's wall array
    pub const fn index(self) -> usize {
        match self {
            Self::North => 0,
            Self::East => 1,
            Self::South => 2,
            Self::West => 3,
        }
    }

    /// The direction pointing back
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    /// Column and row offset `[di, dj]`
    pub const fn offset(self) -> [isize; 2] {
        match self {
            Self::North => [0, -1],
            Self::East => [1, 0],
            Self::South => [0, 1],
            Self::West => [-1, 0],
        }
    }

    /// Direction from `from` to an axis-adjacent `to`
    ///
    /// Returns `None` when the two positions are not axis-adjacent.
    pub const fn between(from: [usize; 2], to: [usize; 2]) -> Option<Self> {
        let di = to[0] as isize - from[0] as isize;
        let dj = to[1] as isize - from[1] as isize;
        match (di, dj) {
            (0, -1) => Some(Self::North),
            (1, 0) => Some(Self::East),
            (0, 1) => Some(Self::South),
            (-1, 0) => Some(Self::West),
            _ => None,
        }
    }
}

/// One axis-adjacent position, possibly outside the grid
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NeighborCandidate {
    /// Direction from the originating cell
    pub direction: Direction,
    /// Column and row, which may be negative or past the grid edge
    pub position: [isize; 2],
    /// Whether `position` addresses a cell of the grid
    pub in_bounds: bool,
}

impl NeighborCandidate {
    /// Grid position when in bounds
    pub const fn grid_position(&self) -> Option<[usize; 2]> {
        if self.in_bounds {
            Some([self.position[0] as usize, self.position[1] as usize])
        } else {
            None
        }
    }
}

/// A single grid unit
///
/// Cells outside the mask stay in the grid so `[i, j]` addressing is uniform,
/// but they are never visited and never chosen as a traversal target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    i: usize,
    j: usize,
    walls: [bool; 4],
    visited: bool,
    in_mask: bool,
}

impl Cell {
    /// Create an unvisited cell with all four walls present
    pub const fn new(i: usize, j: usize, in_mask: bool) -> Self {
        Self {
            i,
            j,
            walls: [true; 4],
            visited: false,
            in_mask,
        }
    }

    /// Column index
    pub const fn i(&self) -> usize {
        self.i
    }

    /// Row index
    pub const fn j(&self) -> usize {
        self.j
    }

    /// Position as `[i, j]`
    pub const fn position(&self) -> [usize; 2] {
        [self.i, self.j]
    }

    /// Wall flags in N, E, S, W order (`true` = wall present)
    pub const fn walls(&self) -> [bool; 4] {
        self.walls
    }

    /// Whether the wall facing `direction` is present
    pub fn has_wall(&self, direction: Direction) -> bool {
        self.walls.get(direction.index()).copied().unwrap_or(false)
    }

    /// Whether the traversal has reached this cell
    pub const fn is_visited(&self) -> bool {
        self.visited
    }

    /// Whether this cell belongs to the mask
    pub const fn is_in_mask(&self) -> bool {
        self.in_mask
    }

    pub(crate) const fn mark_visited(&mut self) {
        self.visited = true;
    }

    pub(crate) fn clear_wall(&mut self, direction: Direction) {
        if let Some(wall) = self.walls.get_mut(direction.index()) {
            *wall = false;
        }
    }

    /// The four axis-adjacent positions in N, E, S, W order
    ///
    /// Each candidate records whether it lies inside a `cols x rows` grid.
    pub fn neighbor_coordinates(&self, cols: usize, rows: usize) -> [NeighborCandidate; 4] {
        Direction::ALL.map(|direction| {
            let [di, dj] = direction.offset();
            let position = [self.i as isize + di, self.j as isize + dj];
            let in_bounds = position[0] >= 0
                && position[1] >= 0
                && (position[0] as usize) < cols
                && (position[1] as usize) < rows;
            NeighborCandidate {
                direction,
                position,
                in_bounds,
            }
        })
    }
}
