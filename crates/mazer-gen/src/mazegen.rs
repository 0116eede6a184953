//! Perfect-maze generation by randomized frontier expansion.
//!
//! The tree grows from a start cell. Every edge from a visited cell to an
//! unvisited neighbour sits in a frontier list; each step removes one edge
//! chosen uniformly at random and, if its far cell is still unvisited, opens
//! the wall and pushes that cell's own frontier edges. Edges whose target got
//! visited in the meantime are dropped when drawn. The opened walls form a
//! spanning tree of the grid: `width * height - 1` passages, no cycles, every
//! cell reachable from every other.

use mazer_core::{Direction, Grid, Point};
use mazer_paths::PathRange;
use rand::{Rng, RngExt};

use crate::config::ExitPolicy;

/// Maze generator operating on a [`Grid`] with a caller-owned PRNG.
pub struct MazeGen<R: Rng> {
    pub rng: R,
    pub grid: Grid,
}

impl<R: Rng> MazeGen<R> {
    /// Create a new MazeGen with the given grid.
    pub fn with_grid(grid: Grid, rng: R) -> Self {
        Self { rng, grid }
    }

    /// Grow a random spanning tree from `start` and return the number of
    /// walls opened.
    ///
    /// Expects a grid with every wall closed; existing openings are kept but
    /// not followed. Returns 0 if `start` is outside the grid.
    pub fn grow_tree(&mut self, start: Point) -> usize {
        let Some(si) = self.grid.index(start) else {
            return 0;
        };
        let mut visited = vec![false; self.grid.len()];
        visited[si] = true;

        let mut frontier: Vec<(Point, Direction)> = Vec::with_capacity(self.grid.len());
        self.push_frontier(start, &visited, &mut frontier);

        let mut opened = 0usize;
        while !frontier.is_empty() {
            let k = self.rng.random_range(0..frontier.len());
            let (from, dir) = frontier.swap_remove(k);
            let to = from.step(dir);
            let Some(ti) = self.grid.index(to) else {
                continue;
            };
            if visited[ti] {
                continue;
            }
            self.grid.open_wall(from, dir);
            visited[ti] = true;
            opened += 1;
            self.push_frontier(to, &visited, &mut frontier);
        }

        log::trace!(
            "grew tree from {start}: {opened} passages in {}x{}",
            self.grid.width(),
            self.grid.height()
        );
        opened
    }

    fn push_frontier(&self, p: Point, visited: &[bool], frontier: &mut Vec<(Point, Direction)>) {
        for dir in Direction::ALL {
            if let Some(ni) = self.grid.index(p.step(dir)) {
                if !visited[ni] {
                    frontier.push((p, dir));
                }
            }
        }
    }

    /// Choose the exit cell according to `policy`, flag it and return it.
    ///
    /// `start` is clamped into the grid. Returns `None` for an empty grid.
    pub fn place_exit(&mut self, policy: ExitPolicy, start: Point) -> Option<Point> {
        if self.grid.is_empty() {
            return None;
        }
        let bounds = self.grid.bounds();
        let start = bounds.clamp(start);
        let exit = match policy {
            ExitPolicy::Farthest => {
                let mut pr = PathRange::new(bounds);
                pr.bfs_farthest(&self.grid, start).map_or(start, |n| n.pos)
            }
            ExitPolicy::OppositeCorner => {
                let x = if start.x * 2 < bounds.width() { bounds.width() - 1 } else { 0 };
                let y = if start.y * 2 < bounds.height() { bounds.height() - 1 } else { 0 };
                Point::new(x, y)
            }
        };
        self.grid.set_exit(exit);
        Some(exit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn tree(width: i32, height: i32, seed: u64) -> (Grid, usize) {
        let mut mg = MazeGen::with_grid(Grid::new(width, height), StdRng::seed_from_u64(seed));
        let opened = mg.grow_tree(Point::ZERO);
        (mg.grid, opened)
    }

    #[test]
    fn tree_has_one_passage_less_than_cells() {
        for (w, h) in [(1, 1), (1, 7), (7, 1), (2, 2), (9, 4), (20, 20)] {
            let (grid, opened) = tree(w, h, 7);
            assert_eq!(opened, (w * h - 1) as usize);
            assert_eq!(grid.passage_count(), opened);
        }
    }

    #[test]
    fn tree_is_connected() {
        let (grid, _) = tree(12, 9, 3);
        let mut pr = PathRange::new(grid.bounds());
        assert_eq!(pr.bfs_map(&grid, Point::new(11, 8)).len(), grid.len());
    }

    #[test]
    fn grow_from_interior_start() {
        let mut mg = MazeGen::with_grid(Grid::new(6, 5), StdRng::seed_from_u64(11));
        assert_eq!(mg.grow_tree(Point::new(3, 2)), 29);
        let mut pr = PathRange::new(mg.grid.bounds());
        assert_eq!(pr.bfs_map(&mg.grid, Point::ZERO).len(), mg.grid.len());
    }

    #[test]
    fn grow_outside_grid_does_nothing() {
        let mut mg = MazeGen::with_grid(Grid::new(3, 3), StdRng::seed_from_u64(0));
        assert_eq!(mg.grow_tree(Point::new(5, 5)), 0);
        assert_eq!(mg.grid.passage_count(), 0);
    }

    #[test]
    fn same_seed_same_tree() {
        let (a, _) = tree(15, 15, 42);
        let (b, _) = tree(15, 15, 42);
        assert_eq!(a, b);
    }

    #[test]
    fn farthest_exit_maximizes_distance() {
        let mut mg = MazeGen::with_grid(Grid::new(10, 8), StdRng::seed_from_u64(5));
        mg.grow_tree(Point::ZERO);
        let exit = mg.place_exit(ExitPolicy::Farthest, Point::ZERO).unwrap();
        assert_eq!(mg.grid.exit(), Some(exit));

        let mut pr = PathRange::new(mg.grid.bounds());
        let nodes = pr.bfs_map(&mg.grid, Point::ZERO).to_vec();
        let best = nodes.iter().map(|n| n.cost).max().unwrap();
        assert_eq!(pr.bfs_at(exit), best);
        // First in row-major order among the farthest cells.
        let first = nodes.iter().filter(|n| n.cost == best).map(|n| n.pos).min().unwrap();
        assert_eq!(exit, first);
    }

    #[test]
    fn opposite_corner_exit() {
        let mut mg = MazeGen::with_grid(Grid::new(6, 4), StdRng::seed_from_u64(1));
        mg.grow_tree(Point::ZERO);
        assert_eq!(mg.place_exit(ExitPolicy::OppositeCorner, Point::ZERO), Some(Point::new(5, 3)));
        assert_eq!(mg.place_exit(ExitPolicy::OppositeCorner, Point::new(5, 0)), Some(Point::new(0, 3)));
        assert_eq!(mg.place_exit(ExitPolicy::OppositeCorner, Point::new(4, 3)), Some(Point::new(0, 0)));
        // Only the last exit survives.
        assert_eq!(mg.grid.exit(), Some(Point::new(0, 0)));
        assert_eq!(mg.grid.iter().filter(|(_, c)| c.is_exit()).count(), 1);
    }

    #[test]
    fn single_cell_exit_is_start() {
        let mut mg = MazeGen::with_grid(Grid::new(1, 1), StdRng::seed_from_u64(9));
        assert_eq!(mg.grow_tree(Point::ZERO), 0);
        assert_eq!(mg.place_exit(ExitPolicy::Farthest, Point::ZERO), Some(Point::ZERO));
        assert_eq!(mg.place_exit(ExitPolicy::OppositeCorner, Point::ZERO), Some(Point::ZERO));
    }

    #[test]
    fn empty_grid_has_no_exit() {
        let mut mg = MazeGen::with_grid(Grid::new(0, 4), StdRng::seed_from_u64(2));
        assert_eq!(mg.grow_tree(Point::ZERO), 0);
        assert_eq!(mg.place_exit(ExitPolicy::Farthest, Point::ZERO), None);
        assert_eq!(mg.place_exit(ExitPolicy::OppositeCorner, Point::new(3, 3)), None);
        assert_eq!(mg.grid.exit(), None);
    }
}
