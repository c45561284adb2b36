//! Tests for render snapshots and step observers

#[cfg(test)]
mod tests {
    use maskmaze::maze::generator::MazeGenerator;
    use maskmaze::maze::snapshot::Snapshot;
    use maskmaze::spatial::grid::Grid;
    use maskmaze::spatial::mask::Mask;

    // Tests that snapshots hold only in-mask cells in column-major order
    // Verified by iterating every grid cell in capture
    #[test]
    fn test_capture_records_in_mask_cells_only() {
        let mask = Mask::new(3, 2, [[2, 1], [0, 1], [0, 0]], [0, 0]).expect("valid mask");
        let grid = Grid::build(3, 2, Some(&mask)).expect("valid grid");

        let snapshot = Snapshot::capture(&grid, [0, 0], 0);

        let positions: Vec<[usize; 2]> = snapshot.cells.iter().map(|c| c.position).collect();
        assert_eq!(positions, vec![[0, 0], [0, 1], [2, 1]]);
        assert_eq!(snapshot.cols, 3);
        assert_eq!(snapshot.rows, 2);
        assert_eq!(snapshot.current, [0, 0]);
        assert_eq!(snapshot.visited_count(), 0);
        assert!(snapshot.cells.iter().all(|c| c.walls == [true; 4]));
    }

    // Tests that a snapshot is a copy unaffected by later steps
    // Verified by sharing cell storage between snapshot and grid
    #[test]
    fn test_snapshot_is_detached_from_generator() {
        let grid = Grid::unconstrained(3, 3).expect("valid grid");
        let mut generator = MazeGenerator::new(grid, [0, 0], 5).expect("valid generator");

        let initial = generator.snapshot();
        generator.advance_step();
        let after_one = generator.snapshot();

        assert_eq!(initial.step, 0);
        assert_eq!(initial.visited_count(), 0);
        assert_eq!(after_one.step, 1);
        assert_eq!(after_one.visited_count(), 2);
        assert_ne!(initial.current, after_one.current);
    }

    // Tests that closures observe the initial state and every step call
    // Verified by skipping the observation after the terminal step
    #[test]
    fn test_closure_observer_sees_every_step() {
        let grid = Grid::unconstrained(4, 4).expect("valid grid");
        let mut generator = MazeGenerator::new(grid, [0, 0], 9).expect("valid generator");

        let mut visited_counts = Vec::new();
        generator.generate_observed(&mut |g: &MazeGenerator| {
            visited_counts.push(g.snapshot().visited_count());
        });

        // Initial state plus 2N - 1 calls to advance_step
        assert_eq!(visited_counts.len(), 2 * 16);
        assert_eq!(visited_counts.first(), Some(&0));
        assert_eq!(visited_counts.last(), Some(&16));
        assert!(visited_counts.windows(2).all(|w| w.first() <= w.last()));
    }
}
