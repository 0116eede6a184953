//! The maze [`Grid`]: a flat row-major buffer of [`Cell`] values.
//!
//! Cells are addressed by `(column, row)` and stored at `row * width + column`.
//! Neighbour relations are pure arithmetic, nothing stores references to other
//! cells. Walls can only be opened or closed in pairs, so the wall flags of two
//! adjacent cells always agree, and walls facing outside the grid stay closed.

use std::fmt;

use crate::cell::{Cell, Player};
use crate::geom::{Direction, Point, Range};

/// A rectangular maze of [`Cell`]s.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "GridData"))]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

/// A row-major buffer whose length does not match its dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeError {
    pub width: i32,
    pub height: i32,
    pub len: usize,
}

impl ShapeError {
    /// Check that `len` entries exactly fill a `width` x `height` rectangle.
    pub fn check(width: i32, height: i32, len: usize) -> Result<(), Self> {
        let expected = usize::try_from(width)
            .ok()
            .zip(usize::try_from(height).ok())
            .and_then(|(w, h)| w.checked_mul(h));
        if expected == Some(len) {
            Ok(())
        } else {
            Err(Self { width, height, len })
        }
    }
}

impl fmt::Display for ShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} entries do not fill a {}x{} grid", self.len, self.width, self.height)
    }
}

impl std::error::Error for ShapeError {}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct GridData {
    width: i32,
    height: i32,
    cells: Vec<Cell>,
}

#[cfg(feature = "serde")]
impl TryFrom<GridData> for Grid {
    type Error = ShapeError;

    fn try_from(data: GridData) -> Result<Self, ShapeError> {
        ShapeError::check(data.width, data.height, data.cells.len())?;
        Ok(Self {
            width: data.width,
            height: data.height,
            cells: data.cells,
        })
    }
}

impl Grid {
    /// Create a new grid with every wall closed, no exit and no occupants.
    ///
    /// Negative sizes are treated as zero.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            cells: vec![Cell::default(); (width as usize) * (height as usize)],
        }
    }

    /// Returns the bounding range of this grid, anchored at the origin.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.width, self.height)
    }

    /// Returns the size as a Point (width = x, height = y).
    #[inline]
    pub fn size(&self) -> Point {
        Point::new(self.width, self.height)
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether the grid contains the given point.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.x < self.width && p.y >= 0 && p.y < self.height
    }

    /// Flat index of `p`, or `None` if out of bounds.
    #[inline]
    pub fn index(&self, p: Point) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some(p.y as usize * self.width as usize + p.x as usize)
    }

    /// Point for a flat index. The index must be below [`len`](Self::len).
    #[inline]
    pub fn point(&self, idx: usize) -> Point {
        let w = self.width.max(1) as usize;
        Point::new((idx % w) as i32, (idx / w) as i32)
    }

    /// Get the cell at a point, or `None` if out of bounds.
    #[inline]
    pub fn at(&self, p: Point) -> Option<&Cell> {
        self.index(p).map(|i| &self.cells[i])
    }

    /// Mutable access to a cell's occupant flags.
    ///
    /// Walls are not reachable through this reference; use
    /// [`open_wall`](Self::open_wall) and [`close_wall`](Self::close_wall).
    #[inline]
    pub fn at_mut(&mut self, p: Point) -> Option<&mut Cell> {
        let i = self.index(p)?;
        Some(&mut self.cells[i])
    }

    /// All cells in row-major order.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate over `(Point, &Cell)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, &Cell)> + '_ {
        self.bounds().iter().zip(self.cells.iter())
    }

    // -----------------------------------------------------------------------
    // Walls
    // -----------------------------------------------------------------------

    /// Whether one can step from `p` towards `dir`.
    ///
    /// Always `false` for points outside the grid and for boundary walls.
    #[inline]
    pub fn is_open(&self, p: Point, dir: Direction) -> bool {
        match self.at(p) {
            Some(c) => !c.has_wall(dir),
            None => false,
        }
    }

    /// Open the wall between `p` and its neighbour towards `dir`.
    ///
    /// Both facing walls are cleared. Returns `false` and changes nothing if
    /// either cell lies outside the grid.
    pub fn open_wall(&mut self, p: Point, dir: Direction) -> bool {
        self.set_wall_pair(p, dir, false)
    }

    /// Close the wall between `p` and its neighbour towards `dir`.
    ///
    /// Returns `false` if either cell lies outside the grid (such walls are
    /// closed already).
    pub fn close_wall(&mut self, p: Point, dir: Direction) -> bool {
        self.set_wall_pair(p, dir, true)
    }

    fn set_wall_pair(&mut self, p: Point, dir: Direction, closed: bool) -> bool {
        let (Some(i), Some(j)) = (self.index(p), self.index(p.step(dir))) else {
            return false;
        };
        self.cells[i].set_wall(dir, closed);
        self.cells[j].set_wall(dir.opposite(), closed);
        true
    }

    /// Neighbours of `p` reachable through an open wall, in
    /// [`Direction::ALL`] order.
    pub fn open_neighbors(&self, p: Point) -> impl Iterator<Item = Point> + '_ {
        Direction::ALL
            .into_iter()
            .filter(move |&d| self.is_open(p, d))
            .map(move |d| p.step(d))
    }

    /// Number of open walls between adjacent cells, each pair counted once.
    pub fn passage_count(&self) -> usize {
        self.iter()
            .map(|(_, c)| {
                usize::from(!c.has_wall(Direction::East)) + usize::from(!c.has_wall(Direction::South))
            })
            .sum()
    }

    // -----------------------------------------------------------------------
    // Exit
    // -----------------------------------------------------------------------

    /// Make `p` the single exit cell, clearing any previous exit.
    ///
    /// Returns `false` and changes nothing if `p` is out of bounds.
    pub fn set_exit(&mut self, p: Point) -> bool {
        let Some(i) = self.index(p) else {
            return false;
        };
        for c in self.cells.iter_mut() {
            c.exit = false;
        }
        self.cells[i].exit = true;
        true
    }

    /// Remove the exit flag from every cell.
    pub fn clear_exit(&mut self) {
        for c in self.cells.iter_mut() {
            c.exit = false;
        }
    }

    /// Position of the exit cell (the first one in row-major order).
    pub fn exit(&self) -> Option<Point> {
        self.cells.iter().position(Cell::is_exit).map(|i| self.point(i))
    }

    // -----------------------------------------------------------------------
    // Occupants
    // -----------------------------------------------------------------------

    /// Move `player`'s flag to `p`, removing it from wherever it was.
    ///
    /// Returns `false` and changes nothing if `p` is out of bounds.
    pub fn place_player(&mut self, p: Point, player: Player) -> bool {
        let Some(i) = self.index(p) else {
            return false;
        };
        self.remove_player(player);
        self.cells[i].set_player(player, true);
        true
    }

    /// Clear `player`'s flag from every cell.
    pub fn remove_player(&mut self, player: Player) {
        for c in self.cells.iter_mut() {
            c.set_player(player, false);
        }
    }

    /// Position of `player`, scanning in row-major order.
    pub fn find_player(&self, player: Player) -> Option<Point> {
        self.cells
            .iter()
            .position(|c| c.has_player(player))
            .map(|i| self.point(i))
    }
}
