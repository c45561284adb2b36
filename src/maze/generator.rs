use log::{debug, info, trace, warn};
use rand::{SeedableRng, rngs::StdRng};

use crate::io::configuration::MazeConfig;
use crate::io::error::{Result, configuration_error};
use crate::maze::snapshot::{Snapshot, StepObserver};
use crate::spatial::grid::Grid;
use crate::spatial::mask::Mask;

/// Lifecycle of a generator
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenerationState {
    /// Steps remain
    Running,
    /// Every reachable in-mask cell is visited and the stack is empty
    Terminal,
}

/// Randomized depth-first backtracking over a masked grid
///
/// Owns the grid, the backtracking stack, and the current-cell cursor. The
/// stack and cursor hold positions into the grid, never cell copies.
/// One seeded random stream drives every neighbor choice, so identical
/// grids, starts, and seeds produce identical mazes and step orders.
pub struct MazeGenerator {
    grid: Grid,
    stack: Vec<[usize; 2]>,
    current: [usize; 2],
    rng: StdRng,
    state: GenerationState,
    steps_taken: usize,
    max_stack_depth: usize,
    unreachable_count: usize,
}

impl MazeGenerator {
    /// Create a generator positioned at `start`
    ///
    /// # Errors
    ///
    /// Returns a configuration error if:
    /// - The grid has no in-mask cell
    /// - `start` lies outside the grid
    /// - `start` lies outside the mask
    pub fn new(grid: Grid, start: [usize; 2], seed: u64) -> Result<Self> {
        if grid.in_mask_count() == 0 {
            return Err(configuration_error(&"grid has zero in-mask cells"));
        }

        let Some(start_cell) = grid.cell(start) else {
            return Err(configuration_error(&format!(
                "start ({}, {}) is outside the {}x{} grid",
                start[0],
                start[1],
                grid.cols(),
                grid.rows()
            )));
        };

        if !start_cell.is_in_mask() {
            return Err(configuration_error(&format!(
                "start ({}, {}) is not inside the mask",
                start[0], start[1]
            )));
        }

        let unreachable_count = grid.in_mask_count() - grid.reachable_in_mask_count(start);
        if unreachable_count > 0 {
            warn!(
                "{unreachable_count} of {} in-mask cells are unreachable from ({}, {}) and will stay unvisited",
                grid.in_mask_count(),
                start[0],
                start[1]
            );
        }

        debug!(
            "Generator ready: {}x{} grid, {} in-mask cells, start ({}, {}), seed {seed}",
            grid.cols(),
            grid.rows(),
            grid.in_mask_count(),
            start[0],
            start[1]
        );

        Ok(Self {
            grid,
            stack: Vec::new(),
            current: start,
            rng: StdRng::seed_from_u64(seed),
            state: GenerationState::Running,
            steps_taken: 0,
            max_stack_depth: 0,
            unreachable_count,
        })
    }

    /// Build the grid from `config` and an optional mask, then create the generator
    ///
    /// The start is taken from `config.start`, else the mask's start, else
    /// `(0, 0)` in unconstrained mode.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The area and cell length give an invalid grid
    /// - The mask does not match the derived grid dimensions
    /// - The start is invalid
    /// - `config.require_connected` is set and the mask has unreachable cells
    pub fn from_config(config: &MazeConfig, mask: Option<&Mask>) -> Result<Self> {
        let (cols, rows) = config.grid_dimensions()?;
        let grid = Grid::build(cols, rows, mask)?;
        let start = config
            .start
            .or_else(|| mask.map(Mask::start))
            .unwrap_or([0, 0]);

        let generator = Self::new(grid, start, config.seed)?;

        if config.require_connected && generator.unreachable_count > 0 {
            return Err(configuration_error(&format!(
                "{} in-mask cells are disconnected from the start",
                generator.unreachable_count
            )));
        }

        Ok(generator)
    }

    /// Advance the traversal by one step
    ///
    /// Returns `false` once generation is complete. Calling again after that
    /// keeps returning `false` and changes nothing.
    pub fn advance_step(&mut self) -> bool {
        if self.state == GenerationState::Terminal {
            return false;
        }

        self.grid.mark_visited(self.current);

        if let Some(next) = self
            .grid
            .unvisited_masked_neighbor(self.current, &mut self.rng)
        {
            self.grid.mark_visited(next);
            self.stack.push(self.current);
            self.max_stack_depth = self.max_stack_depth.max(self.stack.len());
            self.grid.remove_walls_between(self.current, next);
            trace!("carve {:?} -> {next:?}", self.current);
            self.current = next;
        } else if let Some(previous) = self.stack.pop() {
            trace!("backtrack {:?} -> {previous:?}", self.current);
            self.current = previous;
        } else {
            self.state = GenerationState::Terminal;
            return false;
        }

        self.steps_taken += 1;
        true
    }

    /// Run to completion, returning the number of productive steps
    pub fn generate(&mut self) -> usize {
        self.generate_observed(&mut |_: &Self| {})
    }

    /// Run to completion, handing the generator to `observer` between steps
    ///
    /// The observer sees the initial state and the state after every call
    /// to `advance_step`, including the final one that reaches `Terminal`.
    pub fn generate_observed<O: StepObserver + ?Sized>(&mut self, observer: &mut O) -> usize {
        info!(
            "Generating maze over {} in-mask cells",
            self.grid.in_mask_count()
        );

        observer.observe(self);
        loop {
            let more = self.advance_step();
            observer.observe(self);
            if !more {
                break;
            }
        }

        info!(
            "Maze complete after {} steps (max stack depth {})",
            self.steps_taken, self.max_stack_depth
        );
        self.steps_taken
    }

    /// Render state at this point between steps
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.grid, self.current, self.steps_taken)
    }

    /// Current cell position
    pub const fn current(&self) -> [usize; 2] {
        self.current
    }

    /// Current depth of the backtracking stack
    pub const fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    /// Deepest the backtracking stack has been
    pub const fn max_stack_depth(&self) -> usize {
        self.max_stack_depth
    }

    /// Number of steps that returned `true`
    pub const fn steps_taken(&self) -> usize {
        self.steps_taken
    }

    /// Current lifecycle state
    pub const fn state(&self) -> GenerationState {
        self.state
    }

    /// Whether generation has finished
    pub fn is_terminal(&self) -> bool {
        self.state == GenerationState::Terminal
    }

    /// In-mask cells the traversal cannot reach from the start
    pub const fn unreachable_count(&self) -> usize {
        self.unreachable_count
    }

    /// The grid being carved
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Consume the generator, keeping the grid
    pub fn into_grid(self) -> Grid {
        self.grid
    }
}
