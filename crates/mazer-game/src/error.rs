use std::fmt;

use mazer_core::{Player, Point};
use mazer_gen::GenError;
use mazer_paths::SolveError;

/// Errors raised by a [`Game`](crate::Game) session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Building a maze failed.
    Gen(GenError),
    /// Solving the current maze failed.
    Solve(SolveError),
    /// The player has no cell on the grid.
    PlayerNotFound(Player),
    /// A position outside the grid was given.
    OutOfBounds(Point),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gen(e) => write!(f, "maze generation failed: {e}"),
            Self::Solve(e) => write!(f, "solving failed: {e}"),
            Self::PlayerNotFound(p) => write!(f, "{p} is not on the grid"),
            Self::OutOfBounds(p) => write!(f, "position {p} is outside the grid"),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gen(e) => Some(e),
            Self::Solve(e) => Some(e),
            Self::PlayerNotFound(_) | Self::OutOfBounds(_) => None,
        }
    }
}

impl From<GenError> for GameError {
    fn from(e: GenError) -> Self {
        Self::Gen(e)
    }
}

impl From<SolveError> for GameError {
    fn from(e: SolveError) -> Self {
        Self::Solve(e)
    }
}
