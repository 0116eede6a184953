//! Generation parameters.

use mazer_core::Point;

/// Which cell becomes the exit once the maze topology is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExitPolicy {
    /// The cell with the greatest maze distance from the start. Ties go to
    /// the first such cell in row-major order.
    #[default]
    Farthest,
    /// The grid corner diagonally opposite the start's quadrant.
    OppositeCorner,
}

/// Parameters for [`generate_with`](crate::generate_with).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MazeConfig {
    /// Number of columns. Must be at least 1.
    pub width: i32,
    /// Number of rows. Must be at least 1.
    pub height: i32,
    /// PRNG seed. `None` draws one from the thread-local entropy source.
    pub seed: Option<u64>,
    /// Cell where the tree grows from and where player one is placed.
    /// Clamped into the grid.
    pub start: Point,
    pub exit_policy: ExitPolicy,
}

impl Default for MazeConfig {
    fn default() -> Self {
        Self {
            width: 15,
            height: 15,
            seed: None,
            start: Point::ZERO,
            exit_policy: ExitPolicy::Farthest,
        }
    }
}

impl MazeConfig {
    /// Default configuration with the given size.
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Set the seed (builder).
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the start cell (builder).
    pub fn with_start(mut self, start: Point) -> Self {
        self.start = start;
        self
    }

    /// Set the exit policy (builder).
    pub fn with_exit_policy(mut self, exit_policy: ExitPolicy) -> Self {
        self.exit_policy = exit_policy;
        self
    }
}
