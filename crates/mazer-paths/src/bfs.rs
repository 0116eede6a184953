//! Breadth-first distance maps.
//!
//! Every move costs 1, so the BFS layer of a cell is its maze distance from
//! the source. Exit placement asks for the farthest cell; tests use the map
//! as an independent oracle for A*.

use std::collections::VecDeque;

use mazer_core::Point;

use crate::PathRange;
use crate::pathrange::{PathNode, UNREACHABLE};
use crate::traits::Pather;

impl PathRange {
    /// Compute the distance from `from` to every cell reachable from it.
    ///
    /// Returns the reached cells in discovery order, which is non-decreasing
    /// in cost and starts with `from` itself. The slice is empty if `from` is
    /// outside the range.
    pub fn bfs_map<P: Pather>(&mut self, pather: &P, from: Point) -> &[PathNode] {
        self.bfs_map.fill(UNREACHABLE);
        self.bfs_results.clear();

        let Some(si) = self.idx(from) else {
            return &self.bfs_results;
        };
        self.bfs_map[si] = 0;
        self.bfs_results.push(PathNode { pos: from, cost: 0 });

        let mut queue = VecDeque::from([si]);
        let mut nbuf = std::mem::take(&mut self.nbuf);

        while let Some(ci) = queue.pop_front() {
            let cost = self.bfs_map[ci] + 1;
            nbuf.clear();
            pather.neighbors(self.point(ci), &mut nbuf);

            for &np in &nbuf {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                if self.bfs_map[ni] == UNREACHABLE {
                    self.bfs_map[ni] = cost;
                    queue.push_back(ni);
                    self.bfs_results.push(PathNode { pos: np, cost });
                }
            }
        }

        self.nbuf = nbuf;
        &self.bfs_results
    }

    /// Distance of `p` in the last [`bfs_map`](Self::bfs_map), or
    /// [`UNREACHABLE`].
    pub fn bfs_at(&self, p: Point) -> i32 {
        self.idx(p).map_or(UNREACHABLE, |i| self.bfs_map[i])
    }

    /// The reachable cell with the greatest distance from `from`.
    ///
    /// Among equally distant cells the first in row-major order wins. `None`
    /// if `from` is outside the range.
    pub fn bfs_farthest<P: Pather>(&mut self, pather: &P, from: Point) -> Option<PathNode> {
        self.bfs_map(pather, from)
            .iter()
            .copied()
            .reduce(|best, n| {
                if n.cost > best.cost || (n.cost == best.cost && n.pos < best.pos) {
                    n
                } else {
                    best
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use mazer_core::{Direction, Grid, Point};

    use crate::PathRange;
    use crate::pathrange::{PathNode, UNREACHABLE};

    /// 3x3 grid with a snake corridor:
    /// (0,0)->(1,0)->(2,0)->(2,1)->(1,1)->(0,1)->(0,2)->(1,2)->(2,2)
    fn snake() -> Grid {
        let mut g = Grid::new(3, 3);
        g.open_wall(Point::new(0, 0), Direction::East);
        g.open_wall(Point::new(1, 0), Direction::East);
        g.open_wall(Point::new(2, 0), Direction::South);
        g.open_wall(Point::new(2, 1), Direction::West);
        g.open_wall(Point::new(1, 1), Direction::West);
        g.open_wall(Point::new(0, 1), Direction::South);
        g.open_wall(Point::new(0, 2), Direction::East);
        g.open_wall(Point::new(1, 2), Direction::East);
        g
    }

    #[test]
    fn distances_follow_corridor() {
        let g = snake();
        let mut pr = PathRange::new(g.bounds());
        let nodes = pr.bfs_map(&g, Point::new(0, 0));
        assert_eq!(nodes.len(), 9);
        assert_eq!(nodes[0], PathNode { pos: Point::new(0, 0), cost: 0 });
        assert!(nodes.windows(2).all(|w| w[0].cost <= w[1].cost));
        assert_eq!(pr.bfs_at(Point::new(2, 2)), 8);
        assert_eq!(pr.bfs_at(Point::new(0, 1)), 5);
        assert_eq!(pr.bfs_at(Point::new(7, 7)), UNREACHABLE);
    }

    #[test]
    fn walled_off_cells_stay_unreachable() {
        let mut g = snake();
        g.close_wall(Point::new(2, 0), Direction::South);
        let mut pr = PathRange::new(g.bounds());
        assert_eq!(pr.bfs_map(&g, Point::new(0, 0)).len(), 3);
        assert_eq!(pr.bfs_at(Point::new(2, 1)), UNREACHABLE);
        assert!(pr.bfs_map(&g, Point::new(3, 0)).is_empty());
    }

    #[test]
    fn farthest_cell() {
        let g = snake();
        let mut pr = PathRange::new(g.bounds());
        let far = pr.bfs_farthest(&g, Point::new(0, 0)).unwrap();
        assert_eq!(far, PathNode { pos: Point::new(2, 2), cost: 8 });
        // From the middle both ends are 4 moves away; (0,0) comes first.
        let far = pr.bfs_farthest(&g, Point::new(1, 1)).unwrap();
        assert_eq!(far, PathNode { pos: Point::new(0, 0), cost: 4 });
        assert_eq!(pr.bfs_farthest(&g, Point::new(-1, 0)), None);
    }

    #[test]
    fn farthest_tie_goes_to_first_row_major_cell() {
        // Plus shape around (1,1): the four arms are all one move away.
        let mut g = Grid::new(3, 3);
        let c = Point::new(1, 1);
        for dir in Direction::ALL {
            g.open_wall(c, dir);
        }
        let mut pr = PathRange::new(g.bounds());
        let far = pr.bfs_farthest(&g, c).unwrap();
        assert_eq!(far.pos, Point::new(1, 0));
        assert_eq!(far.cost, 1);
    }
}
