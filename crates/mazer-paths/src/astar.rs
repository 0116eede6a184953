use std::collections::BinaryHeap;

use mazer_core::Point;

use crate::PathRange;
use crate::pathrange::{NodeRef, UNREACHABLE};
use crate::traits::AstarPather;

impl PathRange {
    /// Compute the shortest path from `from` to `to` using A*.
    ///
    /// Returns the full path (including both endpoints) or `None` if no path
    /// exists within the current range.
    ///
    /// The open set pops the lowest `f = g + h`; ties go to the lowest `h`,
    /// then to the entry pushed first, so among several shortest paths the
    /// same one is returned on every call. The search stops as soon as `to`
    /// is popped, which is optimal for admissible and consistent estimates.
    pub fn astar_path<P: AstarPather>(
        &mut self,
        pather: &P,
        from: Point,
        to: Point,
    ) -> Option<Vec<Point>> {
        let start_idx = self.idx(from)?;
        let goal_idx = self.idx(to)?;

        if start_idx == goal_idx {
            return Some(vec![from]);
        }

        // Bump generation to lazily invalidate all nodes.
        self.astar_generation = self.astar_generation.wrapping_add(1);
        let cur_gen = self.astar_generation;
        let mut seq: u64 = 0;

        // Initialise the start node.
        let h0 = pather.estimate(from, to);
        {
            let node = &mut self.astar_nodes[start_idx];
            node.g = 0;
            node.h = h0;
            node.parent = usize::MAX;
            node.generation = cur_gen;
            node.open = true;
        }

        let mut open: BinaryHeap<NodeRef> = BinaryHeap::new();
        open.push(NodeRef {
            idx: start_idx,
            f: h0,
            h: h0,
            seq,
        });

        let mut nbuf = std::mem::take(&mut self.nbuf);
        let mut expanded = 0usize;

        let found = 'search: loop {
            let Some(current) = open.pop() else {
                break 'search false;
            };

            let ci = current.idx;

            // Skip stale entries: closed nodes, old generations, and entries
            // superseded by a cheaper push of the same node.
            {
                let n = &self.astar_nodes[ci];
                if n.generation != cur_gen || !n.open || n.g + n.h != current.f {
                    continue;
                }
            }

            if ci == goal_idx {
                break 'search true;
            }

            self.astar_nodes[ci].open = false;
            expanded += 1;
            let current_g = self.astar_nodes[ci].g;
            let current_point = self.point(ci);

            nbuf.clear();
            pather.neighbors(current_point, &mut nbuf);

            for &np in nbuf.iter() {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                let tentative_g = current_g + pather.cost(current_point, np);

                let n = &mut self.astar_nodes[ni];
                if n.generation == cur_gen {
                    // Already visited this generation.
                    if tentative_g >= n.g {
                        continue;
                    }
                } else {
                    n.generation = cur_gen;
                    n.g = UNREACHABLE;
                    n.h = pather.estimate(np, to);
                }

                n.g = tentative_g;
                n.parent = ci;
                n.open = true;

                seq += 1;
                open.push(NodeRef {
                    idx: ni,
                    f: tentative_g + n.h,
                    h: n.h,
                    seq,
                });
            }
        };

        self.nbuf = nbuf;
        log::trace!("astar {from} -> {to}: found={found}, expanded={expanded}, pushed={}", seq + 1);

        if !found {
            return None;
        }

        // Reconstruct path.
        let mut path = Vec::new();
        let mut ci = goal_idx;
        while ci != usize::MAX {
            path.push(self.point(ci));
            ci = self.astar_nodes[ci].parent;
        }
        path.reverse();
        Some(path)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use mazer_core::{Point, Range};

    use crate::PathRange;
    use crate::distance::manhattan;
    use crate::traits::{AstarPather, Pather, WeightedPather};

    /// Open field with a set of blocked points.
    struct Field {
        rng: Range,
        blocked: Vec<Point>,
    }

    impl Pather for Field {
        fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
            for n in p.neighbors_4() {
                if self.rng.contains(n) && !self.blocked.contains(&n) {
                    buf.push(n);
                }
            }
        }
    }

    impl WeightedPather for Field {
        fn cost(&self, _from: Point, _to: Point) -> i32 {
            1
        }
    }

    impl AstarPather for Field {
        fn estimate(&self, from: Point, to: Point) -> i32 {
            manhattan(from, to)
        }
    }

    /// Open field that records the order in which cells are expanded.
    struct Recorder {
        field: Field,
        expanded: RefCell<Vec<Point>>,
    }

    impl Pather for Recorder {
        fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
            self.expanded.borrow_mut().push(p);
            self.field.neighbors(p, buf);
        }
    }

    impl WeightedPather for Recorder {
        fn cost(&self, from: Point, to: Point) -> i32 {
            self.field.cost(from, to)
        }
    }

    impl AstarPather for Recorder {
        fn estimate(&self, from: Point, to: Point) -> i32 {
            self.field.estimate(from, to)
        }
    }

    #[test]
    fn straight_line() {
        let rng = Range::new(0, 0, 5, 1);
        let field = Field { rng, blocked: vec![] };
        let mut pr = PathRange::new(rng);
        let path = pr.astar_path(&field, Point::new(0, 0), Point::new(4, 0)).unwrap();
        assert_eq!(path.len(), 5);
        assert_eq!(path[0], Point::new(0, 0));
        assert_eq!(path[4], Point::new(4, 0));
    }

    #[test]
    fn detour_around_wall() {
        // . . . . .
        // . # # # .
        // . . S . .   goal is above the wall
        let rng = Range::new(0, 0, 5, 3);
        let blocked = vec![Point::new(1, 1), Point::new(2, 1), Point::new(3, 1)];
        let field = Field { rng, blocked };
        let mut pr = PathRange::new(rng);
        let path = pr.astar_path(&field, Point::new(2, 2), Point::new(2, 0)).unwrap();
        // Around either end of the wall: 2 + 2 + 2 = 6 moves.
        assert_eq!(path.len(), 7);
        for w in path.windows(2) {
            assert_eq!(manhattan(w[0], w[1]), 1);
        }
    }

    #[test]
    fn no_path() {
        let rng = Range::new(0, 0, 3, 3);
        let blocked = vec![Point::new(1, 0), Point::new(1, 1), Point::new(1, 2)];
        let field = Field { rng, blocked };
        let mut pr = PathRange::new(rng);
        assert!(pr.astar_path(&field, Point::new(0, 0), Point::new(2, 2)).is_none());
    }

    #[test]
    fn same_start_and_goal() {
        let rng = Range::new(0, 0, 3, 3);
        let field = Field { rng, blocked: vec![] };
        let mut pr = PathRange::new(rng);
        let p = Point::new(1, 1);
        assert_eq!(pr.astar_path(&field, p, p), Some(vec![p]));
    }

    #[test]
    fn out_of_range_endpoints() {
        let rng = Range::new(0, 0, 3, 3);
        let field = Field { rng, blocked: vec![] };
        let mut pr = PathRange::new(rng);
        assert!(pr.astar_path(&field, Point::new(-1, 0), Point::new(2, 2)).is_none());
        assert!(pr.astar_path(&field, Point::new(0, 0), Point::new(3, 2)).is_none());
    }

    #[test]
    fn ties_resolve_identically_across_calls() {
        // Open 4x4 field: many shortest paths between opposite corners.
        let rng = Range::new(0, 0, 4, 4);
        let field = Field { rng, blocked: vec![] };
        let mut pr = PathRange::new(rng);
        let a = pr.astar_path(&field, Point::new(0, 0), Point::new(3, 3)).unwrap();
        let b = pr.astar_path(&field, Point::new(0, 0), Point::new(3, 3)).unwrap();
        assert_eq!(a.len(), 7);
        assert_eq!(a, b);

        // A fresh cache gives the same answer too.
        let mut fresh = PathRange::new(rng);
        let c = fresh.astar_path(&field, Point::new(0, 0), Point::new(3, 3)).unwrap();
        assert_eq!(a, c);
    }

    #[test]
    fn reuse_after_failed_search() {
        let rng = Range::new(0, 0, 3, 3);
        let walled = Field {
            rng,
            blocked: vec![Point::new(1, 0), Point::new(1, 1), Point::new(1, 2)],
        };
        let open = Field { rng, blocked: vec![] };
        let mut pr = PathRange::new(rng);
        assert!(pr.astar_path(&walled, Point::new(0, 0), Point::new(2, 2)).is_none());
        let path = pr.astar_path(&open, Point::new(0, 0), Point::new(2, 2)).unwrap();
        assert_eq!(path.len(), 5);
    }

    #[test]
    fn equal_f_expands_closest_to_goal_first() {
        // 3x3 field, (0,0) -> (2,2). After expanding (0,0) and (1,0) the open
        // set holds (0,1) [f 4, h 3, pushed first], (2,0) [f 4, h 2] and
        // (1,1) [f 4, h 2]. The smaller estimate goes first, so the search
        // dives along the top row and never expands (0,1).
        let rng = Range::new(0, 0, 3, 3);
        let rec = Recorder {
            field: Field { rng, blocked: vec![] },
            expanded: RefCell::new(Vec::new()),
        };
        let mut pr = PathRange::new(rng);
        let path = pr.astar_path(&rec, Point::new(0, 0), Point::new(2, 2)).unwrap();
        assert_eq!(
            *rec.expanded.borrow(),
            vec![Point::new(0, 0), Point::new(1, 0), Point::new(2, 0), Point::new(2, 1)]
        );
        assert_eq!(
            path,
            vec![
                Point::new(0, 0),
                Point::new(1, 0),
                Point::new(2, 0),
                Point::new(2, 1),
                Point::new(2, 2),
            ]
        );
    }
}
