//! Tests for the randomized depth-first backtracking generator

#[cfg(test)]
mod tests {
    use maskmaze::MazeError;
    use maskmaze::io::configuration::MazeConfig;
    use maskmaze::maze::generator::{GenerationState, MazeGenerator};
    use maskmaze::spatial::grid::Grid;
    use maskmaze::spatial::mask::Mask;

    fn corridor_generator() -> MazeGenerator {
        let mask = Mask::new(3, 3, [[1, 0], [1, 1], [1, 2]], [1, 0]).expect("valid mask");
        let grid = Grid::build(3, 3, Some(&mask)).expect("valid grid");
        MazeGenerator::new(grid, [1, 0], 7).expect("valid generator")
    }

    // Tests that a start outside the grid is rejected
    // Verified by removing the bounds lookup on the start cell
    #[test]
    fn test_new_rejects_start_outside_grid() {
        let grid = Grid::unconstrained(3, 3).expect("valid grid");
        let result = MazeGenerator::new(grid, [3, 0], 1);

        assert!(matches!(result, Err(MazeError::Configuration { .. })));
    }

    // Tests that a start outside the mask is rejected
    // Verified by skipping the in-mask check on the start cell
    #[test]
    fn test_new_rejects_start_outside_mask() {
        let mask = Mask::new(3, 3, [[1, 1]], [1, 1]).expect("valid mask");
        let grid = Grid::build(3, 3, Some(&mask)).expect("valid grid");
        let result = MazeGenerator::new(grid, [0, 0], 1);

        assert!(matches!(result, Err(MazeError::Configuration { .. })));
    }

    // Tests the exact step sequence on a three-cell vertical corridor
    // Verified by pushing the next cell instead of the current one
    #[test]
    fn test_corridor_steps_and_stack_depth() {
        let mut generator = corridor_generator();

        assert!(generator.advance_step());
        assert_eq!(generator.current(), [1, 1]);
        assert!(generator.advance_step());
        assert_eq!(generator.current(), [1, 2]);
        assert_eq!(generator.stack_depth(), 2);

        assert!(generator.advance_step());
        assert_eq!(generator.current(), [1, 1]);
        assert!(generator.advance_step());
        assert_eq!(generator.current(), [1, 0]);
        assert_eq!(generator.stack_depth(), 0);

        assert!(!generator.advance_step());
        assert!(generator.is_terminal());
        assert_eq!(generator.steps_taken(), 4);
        assert_eq!(generator.max_stack_depth(), 2);

        let grid = generator.grid();
        let top = grid.cell([1, 0]).expect("in grid");
        let middle = grid.cell([1, 1]).expect("in grid");
        let bottom = grid.cell([1, 2]).expect("in grid");
        assert_eq!(top.walls(), [true, true, false, true]);
        assert_eq!(middle.walls(), [false, true, false, true]);
        assert_eq!(bottom.walls(), [false, true, true, true]);
    }

    // Tests that the current cell is marked visited on the first step
    // Verified by removing the mark_visited call on the current cell
    #[test]
    fn test_single_cell_terminates_on_first_call() {
        let grid = Grid::unconstrained(1, 1).expect("valid grid");
        let mut generator = MazeGenerator::new(grid, [0, 0], 1).expect("valid generator");

        assert_eq!(generator.state(), GenerationState::Running);
        assert!(!generator.advance_step());
        assert_eq!(generator.state(), GenerationState::Terminal);
        assert_eq!(generator.steps_taken(), 0);
        assert_eq!(generator.grid().visited_count(), 1);
        assert_eq!(
            generator.grid().cell([0, 0]).map(|c| c.walls()),
            Some([true; 4])
        );
    }

    // Tests that calls after termination return false and change nothing
    // Verified by resetting state to Running after the terminal step
    #[test]
    fn test_advance_after_terminal_is_idempotent() {
        let grid = Grid::unconstrained(4, 3).expect("valid grid");
        let mut generator = MazeGenerator::new(grid, [0, 0], 11).expect("valid generator");
        generator.generate();

        let before = generator.snapshot();
        for _ in 0..5 {
            assert!(!generator.advance_step());
        }

        assert_eq!(generator.snapshot(), before);
        assert_eq!(generator.steps_taken(), before.step);
    }

    // Tests that generate visits every cell with 2N - 2 productive steps
    // Verified by returning false when backtracking
    #[test]
    fn test_generate_counts_productive_steps() {
        let grid = Grid::unconstrained(6, 4).expect("valid grid");
        let mut generator = MazeGenerator::new(grid, [2, 3], 3).expect("valid generator");

        let steps = generator.generate();

        assert_eq!(steps, 2 * 24 - 2);
        assert_eq!(generator.grid().visited_count(), 24);
        assert_eq!(generator.stack_depth(), 0);
        assert_eq!(generator.current(), [2, 3]);
    }

    // Tests that from_config falls back to the mask start
    // Verified by always starting at (0, 0)
    #[test]
    fn test_from_config_uses_mask_start() {
        let mask = Mask::new(4, 4, [[2, 2], [3, 2], [3, 3]], [3, 3]).expect("valid mask");
        let config = MazeConfig {
            area_width: 40,
            area_height: 40,
            cell_length: 10,
            ..MazeConfig::default()
        };

        let generator = MazeGenerator::from_config(&config, Some(&mask)).expect("valid config");

        assert_eq!(generator.current(), [3, 3]);
        assert_eq!(generator.grid().in_mask_count(), 3);
    }

    // Tests that an explicit start overrides the mask start
    // Verified by preferring the mask start over config.start
    #[test]
    fn test_from_config_explicit_start_wins() {
        let mask = Mask::new(4, 4, [[2, 2], [3, 2], [3, 3]], [3, 3]).expect("valid mask");
        let config = MazeConfig {
            area_width: 40,
            area_height: 40,
            cell_length: 10,
            start: Some([2, 2]),
            ..MazeConfig::default()
        };

        let generator = MazeGenerator::from_config(&config, Some(&mask)).expect("valid config");

        assert_eq!(generator.current(), [2, 2]);
    }

    // Tests that a mask sized for another cell length is rejected
    // Verified by skipping the mask dimension check in Grid::build
    #[test]
    fn test_from_config_rejects_mismatched_mask() {
        let mask = Mask::new(4, 4, [[0, 0]], [0, 0]).expect("valid mask");
        let config = MazeConfig {
            area_width: 40,
            area_height: 40,
            cell_length: 20,
            ..MazeConfig::default()
        };

        let result = MazeGenerator::from_config(&config, Some(&mask));

        assert!(matches!(result, Err(MazeError::Configuration { .. })));
    }

    // Tests that disconnected islands are counted and optionally rejected
    // Verified by ignoring require_connected
    #[test]
    fn test_unreachable_cells_are_reported() {
        let mask = Mask::new(5, 1, [[0, 0], [1, 0], [4, 0]], [0, 0]).expect("valid mask");
        let mut config = MazeConfig {
            area_width: 5,
            area_height: 1,
            cell_length: 1,
            ..MazeConfig::default()
        };

        let mut generator =
            MazeGenerator::from_config(&config, Some(&mask)).expect("islands are allowed");
        assert_eq!(generator.unreachable_count(), 1);

        generator.generate();
        assert_eq!(generator.grid().visited_count(), 2);
        assert!(
            !generator
                .grid()
                .cell([4, 0])
                .is_some_and(|c| c.is_visited())
        );

        config.require_connected = true;
        let result = MazeGenerator::from_config(&config, Some(&mask));
        assert!(matches!(result, Err(MazeError::Configuration { .. })));
    }

    // Tests that into_grid hands back the carved grid
    // Verified by returning a fresh grid
    #[test]
    fn test_into_grid_keeps_carved_state() {
        let mut generator = corridor_generator();
        generator.generate();

        let grid = generator.into_grid();

        assert_eq!(grid.visited_count(), 3);
    }
}
