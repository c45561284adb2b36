//! Tests for the cell arena and mask-aware neighbor queries

#[cfg(test)]
mod tests {
    use maskmaze::MazeError;
    use maskmaze::io::configuration::MAX_GRID_DIMENSION;
    use maskmaze::maze::cell::Direction;
    use maskmaze::spatial::grid::{Grid, grid_dimensions};
    use maskmaze::spatial::mask::Mask;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    // Tests that grid dimensions floor the area by the cell length
    // Verified by rounding up instead of flooring
    #[test]
    fn test_grid_dimensions_floor_partial_cells() {
        assert_eq!(grid_dimensions(300, 300, 10).ok(), Some((30, 30)));
        assert_eq!(grid_dimensions(305, 219, 10).ok(), Some((30, 21)));
        assert_eq!(grid_dimensions(7, 7, 7).ok(), Some((1, 1)));
    }

    // Tests rejection of zero cell length, empty axes, and oversize grids
    // Verified by removing each guard in turn
    #[test]
    fn test_grid_dimensions_rejects_invalid_areas() {
        assert!(matches!(
            grid_dimensions(100, 100, 0),
            Err(MazeError::InvalidParameter {
                parameter: "cell_length",
                ..
            })
        ));
        assert!(matches!(
            grid_dimensions(9, 100, 10),
            Err(MazeError::InvalidParameter {
                parameter: "area",
                ..
            })
        ));
        assert!(grid_dimensions(MAX_GRID_DIMENSION + 1, 1, 1).is_err());
        assert!(grid_dimensions(MAX_GRID_DIMENSION, 1, 1).is_ok());
    }

    // Tests that an unconstrained grid tags every cell in-mask
    // Verified by defaulting in_mask to false without a mask
    #[test]
    fn test_unconstrained_grid_is_fully_in_mask() {
        let grid = Grid::unconstrained(4, 3).expect("valid grid");

        assert_eq!(grid.cols(), 4);
        assert_eq!(grid.rows(), 3);
        assert_eq!(grid.in_mask_count(), 12);
        assert_eq!(grid.cells().count(), 12);
        assert_eq!(grid.visited_count(), 0);
        assert!(grid.cells().all(|cell| cell.walls() == [true; 4]));
        assert_eq!(grid.in_mask_positions().first(), Some(&[0, 0]));
        assert_eq!(grid.in_mask_positions().get(1), Some(&[0, 1]));
    }

    // Tests that the mask decides membership and all cells are still allocated
    // Verified by allocating only in-mask cells
    #[test]
    fn test_build_with_mask_tags_membership() {
        let mask = Mask::new(3, 3, [[1, 0], [1, 1], [1, 2]], [1, 0]).expect("valid mask");
        let grid = Grid::build(3, 3, Some(&mask)).expect("valid grid");

        assert_eq!(grid.cells().count(), 9);
        assert_eq!(grid.in_mask_count(), 3);
        assert_eq!(grid.in_mask_positions(), &[[1, 0], [1, 1], [1, 2]]);
        assert!(grid.cell([1, 1]).is_some_and(|c| c.is_in_mask()));
        assert!(grid.cell([0, 1]).is_some_and(|c| !c.is_in_mask()));
        assert!(grid.cell([3, 0]).is_none());
        assert!(grid.contains([2, 2]));
        assert!(!grid.contains([2, 3]));
    }

    // Tests rejection of empty grids and masks built for other dimensions
    // Verified by removing the dimension comparison
    #[test]
    fn test_build_rejects_invalid_dimensions() {
        assert!(matches!(
            Grid::unconstrained(0, 5),
            Err(MazeError::Configuration { .. })
        ));

        let mask = Mask::new(2, 2, [[0, 0]], [0, 0]).expect("valid mask");
        assert!(matches!(
            Grid::build(3, 2, Some(&mask)),
            Err(MazeError::Configuration { .. })
        ));
    }

    // Tests that neighbor queries skip out-of-bounds and out-of-mask cells
    // Verified by dropping the in-mask filter
    #[test]
    fn test_unvisited_masked_neighbors_respects_mask() {
        let mask = Mask::from_predicate(3, 3, [1, 1], |i, j| i == 1 || (j == 1 && i == 2))
            .expect("valid mask");
        let grid = Grid::build(3, 3, Some(&mask)).expect("valid grid");

        // N, E, S order; West (0, 1) is outside the mask
        assert_eq!(
            grid.unvisited_masked_neighbors([1, 1]),
            vec![[1, 0], [2, 1], [1, 2]]
        );
        assert_eq!(grid.unvisited_masked_neighbors([1, 0]), vec![[1, 1]]);
        assert!(grid.unvisited_masked_neighbors([5, 5]).is_empty());

        assert!(grid.masked_neighbor([1, 1], Direction::West).is_none());
        assert_eq!(
            grid.masked_neighbor([1, 1], Direction::East)
                .map(|c| c.position()),
            Some([2, 1])
        );
        assert!(grid.masked_neighbor([1, 0], Direction::North).is_none());
    }

    // Tests that random selection always returns a valid candidate
    // Verified by sampling from the full direction list
    #[test]
    fn test_unvisited_masked_neighbor_picks_candidate() {
        let grid = Grid::unconstrained(3, 3).expect("valid grid");
        let mut rng = StdRng::seed_from_u64(42);
        let candidates = grid.unvisited_masked_neighbors([0, 0]);

        for _ in 0..50 {
            let choice = grid
                .unvisited_masked_neighbor([0, 0], &mut rng)
                .expect("corner has two neighbors");
            assert!(candidates.contains(&choice));
        }

        let single = Grid::unconstrained(1, 1).expect("valid grid");
        assert!(single.unvisited_masked_neighbor([0, 0], &mut rng).is_none());
    }

    // Tests that the same seed gives the same neighbor choices
    // Verified by seeding from entropy
    #[test]
    fn test_unvisited_masked_neighbor_is_reproducible() {
        let grid = Grid::unconstrained(5, 5).expect("valid grid");
        let mut first = StdRng::seed_from_u64(3);
        let mut second = StdRng::seed_from_u64(3);

        for _ in 0..20 {
            assert_eq!(
                grid.unvisited_masked_neighbor([2, 2], &mut first),
                grid.unvisited_masked_neighbor([2, 2], &mut second)
            );
        }
    }

    // Tests reachability counting across mask islands
    // Verified by counting all in-mask cells regardless of adjacency
    #[test]
    fn test_reachable_in_mask_count_stops_at_gaps() {
        let mask = Mask::new(5, 2, [[0, 0], [0, 1], [1, 1], [3, 0], [4, 0]], [0, 0])
            .expect("valid mask");
        let grid = Grid::build(5, 2, Some(&mask)).expect("valid grid");

        assert_eq!(grid.reachable_in_mask_count([0, 0]), 3);
        assert_eq!(grid.reachable_in_mask_count([4, 0]), 2);
        assert_eq!(grid.reachable_in_mask_count([2, 0]), 0);
    }
}
