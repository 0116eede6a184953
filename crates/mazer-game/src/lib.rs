//! Headless maze game session for mazer.
//!
//! [`Game`] holds the current maze and does the bookkeeping a front end
//! needs: locating players, moving the active player through open walls,
//! detecting a winner on the exit, regenerating the maze, and computing the
//! solution from the active player's cell. Drawing, input and timers are left
//! to the caller.

pub mod error;
pub mod game;

pub use error::GameError;
pub use game::{Game, GameConfig, MoveOutcome};
