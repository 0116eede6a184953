//! Maze generation for mazer: seeded perfect mazes with a single exit.
//!
//! [`generate`] is the one-call entry point. [`generate_with`] takes a full
//! [`MazeConfig`], and [`MazeGen`] exposes the building steps for callers
//! that own their PRNG.

pub mod config;
pub mod error;
pub mod mazegen;

pub use config::{ExitPolicy, MazeConfig};
pub use error::GenError;
pub use mazegen::MazeGen;

use mazer_core::{Grid, Player};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

/// Generate a `width` x `height` perfect maze.
///
/// The same `(width, height, Some(seed))` always yields the same grid. With
/// `None`, a seed is drawn from the thread-local entropy source and logged.
/// The tree grows from (0, 0), which also receives player one's flag; the
/// exit is the cell farthest from it.
pub fn generate(width: i32, height: i32, seed: Option<u64>) -> Result<Grid, GenError> {
    generate_with(&MazeConfig {
        width,
        height,
        seed,
        ..MazeConfig::default()
    })
}

/// Generate a maze from a full configuration.
pub fn generate_with(config: &MazeConfig) -> Result<Grid, GenError> {
    let (width, height) = (config.width, config.height);
    if width < 1 || height < 1 {
        return Err(GenError::InvalidDimensions { width, height });
    }
    let seed = config.seed.unwrap_or_else(|| rand::rng().random());
    log::debug!("generating {width}x{height} maze, seed {seed}");

    let grid = Grid::new(width, height);
    let start = grid.bounds().clamp(config.start);
    let mut mg = MazeGen::with_grid(grid, StdRng::seed_from_u64(seed));
    mg.grow_tree(start);
    if let Some(exit) = mg.place_exit(config.exit_policy, start) {
        log::debug!("maze ready: start {start}, exit {exit}");
    }
    mg.grid.place_player(start, Player::ONE);
    Ok(mg.grid)
}
