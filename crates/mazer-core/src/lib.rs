//! **mazer-core** — grid maze data structures.
//!
//! This crate provides the types shared by the rest of the *mazer*
//! workspace: geometry primitives, the [`Cell`] with its wall, exit and
//! occupant flags, and the flat row-major [`Grid`] that keeps facing walls of
//! adjacent cells in agreement.

pub mod cell;
pub mod geom;
pub mod grid;

pub use cell::{Cell, Player, PlayerIdError, PlayerMask, WallMask};
pub use geom::{Direction, Point, Range};
pub use grid::{Grid, ShapeError};
