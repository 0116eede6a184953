//! Maze solving: A* from a start cell to the exit, encoded as a [`PathResult`].

use std::fmt;

use mazer_core::{Grid, Point};

use crate::PathRange;

/// Value of [`PathResult`] entries for cells that are not on the path.
pub const NOT_ON_PATH: i32 = -1;

/// A grid-shaped map of path ordinals.
///
/// Each cell on the solution holds its 0-based position along the path (0 at
/// the start, increasing towards the exit). Every other cell holds
/// [`NOT_ON_PATH`]. When the exit cannot be reached all entries are
/// [`NOT_ON_PATH`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "PathData"))]
pub struct PathResult {
    width: i32,
    height: i32,
    steps: Vec<i32>,
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct PathData {
    width: i32,
    height: i32,
    steps: Vec<i32>,
}

#[cfg(feature = "serde")]
impl TryFrom<PathData> for PathResult {
    type Error = mazer_core::ShapeError;

    fn try_from(data: PathData) -> Result<Self, Self::Error> {
        mazer_core::ShapeError::check(data.width, data.height, data.steps.len())?;
        Ok(Self {
            width: data.width,
            height: data.height,
            steps: data.steps,
        })
    }
}

impl PathResult {
    /// An all-sentinel result of the given size.
    pub fn unsolved(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            steps: vec![NOT_ON_PATH; (width as usize) * (height as usize)],
        }
    }

    /// Encode an ordered path. Points outside the size are ignored.
    pub fn from_path(width: i32, height: i32, path: &[Point]) -> Self {
        let mut res = Self::unsolved(width, height);
        for (ordinal, &p) in path.iter().enumerate() {
            if let Some(i) = res.index(p) {
                res.steps[i] = ordinal as i32;
            }
        }
        res
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        if p.x < 0 || p.y < 0 || p.x >= self.width || p.y >= self.height {
            return None;
        }
        Some(p.y as usize * self.width as usize + p.x as usize)
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Ordinal at `p` ([`NOT_ON_PATH`] if off the path), or `None` if out of
    /// bounds.
    #[inline]
    pub fn at(&self, p: Point) -> Option<i32> {
        self.index(p).map(|i| self.steps[i])
    }

    /// Whether `p` lies on the path.
    #[inline]
    pub fn on_path(&self, p: Point) -> bool {
        self.at(p).is_some_and(|v| v != NOT_ON_PATH)
    }

    /// Whether a path was found.
    pub fn is_solved(&self) -> bool {
        self.steps.iter().any(|&v| v != NOT_ON_PATH)
    }

    /// Number of moves from start to exit, or `None` if unsolved.
    pub fn steps(&self) -> Option<usize> {
        self.steps
            .iter()
            .copied()
            .filter(|&v| v != NOT_ON_PATH)
            .max()
            .map(|v| v as usize)
    }

    /// The path cells from start to exit. Empty if unsolved.
    pub fn path(&self) -> Vec<Point> {
        let mut cells: Vec<(i32, Point)> = self
            .steps
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v != NOT_ON_PATH)
            .map(|(i, &v)| {
                let w = self.width as usize;
                (v, Point::new((i % w) as i32, (i / w) as i32))
            })
            .collect();
        cells.sort_unstable_by_key(|&(v, _)| v);
        cells.into_iter().map(|(_, p)| p).collect()
    }

    /// Raw row-major entries.
    #[inline]
    pub fn as_slice(&self) -> &[i32] {
        &self.steps
    }
}

/// Errors that can occur when solving a maze.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    /// The start cell lies outside the grid.
    OutOfBounds { pos: Point, width: i32, height: i32 },
    /// No cell of the grid carries the exit flag.
    NoExitDefined,
}

impl fmt::Display for SolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds { pos, width, height } => {
                write!(f, "start {pos} is outside the {width}x{height} maze")
            }
            Self::NoExitDefined => f.write_str("maze has no exit cell"),
        }
    }
}

impl std::error::Error for SolveError {}

impl PathRange {
    /// Solve `grid` from `start` to its exit cell, reusing this range's
    /// caches. The range is resized to the grid when they differ.
    pub fn solve_maze(&mut self, grid: &Grid, start: Point) -> Result<PathResult, SolveError> {
        if !grid.contains(start) {
            return Err(SolveError::OutOfBounds {
                pos: start,
                width: grid.width(),
                height: grid.height(),
            });
        }
        let exit = grid.exit().ok_or(SolveError::NoExitDefined)?;

        if self.range() != grid.bounds() {
            self.set_range(grid.bounds());
        }

        match self.astar_path(grid, start, exit) {
            Some(path) => {
                log::debug!("solved {start} -> {exit} in {} moves", path.len() - 1);
                Ok(PathResult::from_path(grid.width(), grid.height(), &path))
            }
            None => {
                log::debug!("no path from {start} to exit {exit}");
                Ok(PathResult::unsolved(grid.width(), grid.height()))
            }
        }
    }
}

/// Solve `grid` from `(column, row)` to its exit cell with a fresh
/// [`PathRange`].
///
/// An unreachable exit is not an error: the returned [`PathResult`] is then
/// entirely [`NOT_ON_PATH`].
pub fn solve(grid: &Grid, column: i32, row: i32) -> Result<PathResult, SolveError> {
    PathRange::new(grid.bounds()).solve_maze(grid, Point::new(column, row))
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn path_result_round_trip() {
        let res = PathResult::from_path(3, 1, &[Point::new(0, 0), Point::new(1, 0)]);
        let json = serde_json::to_string(&res).unwrap();
        let back: PathResult = serde_json::from_str(&json).unwrap();
        assert_eq!(res, back);
    }

    #[test]
    fn mismatched_path_result_is_rejected() {
        let bad = r#"{"width":3,"height":2,"steps":[0,1]}"#;
        assert!(serde_json::from_str::<PathResult>(bad).is_err());
    }

    #[test]
    fn malformed_grid_never_reaches_the_solver() {
        let cell = serde_json::to_string(&mazer_core::Cell::default()).unwrap();
        let json = format!(r#"{{"width":3,"height":3,"cells":[{cell}]}}"#);
        assert!(serde_json::from_str::<Grid>(&json).is_err());

        let mut g = Grid::new(3, 3);
        g.open_wall(Point::new(1, 2), mazer_core::Direction::East);
        g.set_exit(Point::new(2, 2));
        let back: Grid = serde_json::from_str(&serde_json::to_string(&g).unwrap()).unwrap();
        assert_eq!(solve(&back, 2, 2).unwrap().steps(), Some(0));
        assert_eq!(solve(&back, 1, 2).unwrap().steps(), Some(1));
    }
}
