//! Search traits for [`Grid`]: unit-cost moves through open walls.

use mazer_core::{Grid, Point};

use crate::distance::manhattan;
use crate::traits::{AstarPather, Pather, WeightedPather};

impl Pather for Grid {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        buf.extend(self.open_neighbors(p));
    }
}

impl WeightedPather for Grid {
    fn cost(&self, _from: Point, _to: Point) -> i32 {
        1
    }
}

impl AstarPather for Grid {
    /// Walls only remove edges, so the Manhattan distance never overestimates.
    fn estimate(&self, from: Point, to: Point) -> i32 {
        manhattan(from, to)
    }
}
