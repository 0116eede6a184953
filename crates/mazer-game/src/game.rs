//! Core game state: the current maze, whose turn it is, and player moves.

use mazer_core::{Cell, Direction, Grid, Player, Point};
use mazer_gen::{MazeConfig, generate_with};
use mazer_paths::{PathRange, PathResult};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

use crate::error::GameError;

/// Session parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Size, start cell and exit policy of every maze in the session. The
    /// seed, when set, fixes the first maze and the seeds of all later ones.
    pub maze: MazeConfig,
    /// Replace the maze with a fresh one as soon as someone reaches the exit.
    pub regenerate_on_win: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            maze: MazeConfig::default(),
            regenerate_on_win: true,
        }
    }
}

/// Result of a move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// A closed wall is in the way; nothing changed.
    Blocked,
    /// The player now stands on the given cell.
    Moved(Point),
    /// The player stepped onto the exit at `at`. If regeneration is on, the
    /// grid has already been replaced.
    Won { player: Player, at: Point },
}

/// A headless maze session.
pub struct Game {
    config: GameConfig,
    grid: Grid,
    seed: u64,
    active: Player,
    rng: StdRng,
    pr: PathRange,
}

impl Game {
    /// Start a session and generate its first maze.
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        let seed = config.maze.seed.unwrap_or_else(|| rand::rng().random());
        let grid = build(&config.maze, seed)?;
        let pr = PathRange::new(grid.bounds());
        Ok(Self {
            config,
            grid,
            seed,
            active: Player::ONE,
            rng: StdRng::seed_from_u64(seed),
            pr,
        })
    }

    // -------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Seed of the current maze.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The player moved by [`move_player`](Self::move_player).
    pub fn active_player(&self) -> Player {
        self.active
    }

    pub fn set_active_player(&mut self, player: Player) {
        self.active = player;
    }

    /// Position of `player`, if it is on the grid.
    pub fn find_player(&self, player: Player) -> Option<Point> {
        self.grid.find_player(player)
    }

    /// Put `player` on `pos`, removing it from its previous cell.
    pub fn place_player(&mut self, player: Player, pos: Point) -> Result<(), GameError> {
        if self.grid.place_player(pos, player) {
            Ok(())
        } else {
            Err(GameError::OutOfBounds(pos))
        }
    }

    /// The lowest-numbered player standing on the exit, if any.
    pub fn winner(&self) -> Option<Player> {
        let exit = self.grid.exit()?;
        self.grid.at(exit)?.occupants.iter().next()
    }

    // -------------------------------------------------------------------
    // Actions
    // -------------------------------------------------------------------

    /// Try to move the active player one cell towards `dir`.
    pub fn move_player(&mut self, dir: Direction) -> Result<MoveOutcome, GameError> {
        let player = self.active;
        let pos = self
            .grid
            .find_player(player)
            .ok_or(GameError::PlayerNotFound(player))?;

        if !self.grid.is_open(pos, dir) {
            log::trace!("{player} blocked at {pos} going {dir}");
            return Ok(MoveOutcome::Blocked);
        }

        let target = pos.step(dir);
        self.grid.place_player(target, player);

        if self.grid.at(target).is_some_and(Cell::is_exit) {
            log::debug!("{player} reached the exit at {target}");
            if self.config.regenerate_on_win {
                self.new_maze()?;
            }
            return Ok(MoveOutcome::Won { player, at: target });
        }
        Ok(MoveOutcome::Moved(target))
    }

    /// Replace the maze with a new one of the same size, seeded from the
    /// session PRNG.
    pub fn new_maze(&mut self) -> Result<(), GameError> {
        let seed = self.rng.random();
        self.new_maze_with_seed(seed)
    }

    /// Replace the maze with the one generated from `seed`. Every player
    /// present on the old grid starts on the start cell of the new one.
    pub fn new_maze_with_seed(&mut self, seed: u64) -> Result<(), GameError> {
        let players: Vec<Player> = Player::all()
            .filter(|&p| self.grid.find_player(p).is_some())
            .collect();
        let mut grid = build(&self.config.maze, seed)?;
        let start = grid.bounds().clamp(self.config.maze.start);
        for p in players {
            grid.place_player(start, p);
        }
        self.grid = grid;
        self.seed = seed;
        Ok(())
    }

    /// Shortest route from the active player's cell to the exit.
    pub fn solution(&mut self) -> Result<PathResult, GameError> {
        let player = self.active;
        let pos = self
            .grid
            .find_player(player)
            .ok_or(GameError::PlayerNotFound(player))?;
        Ok(self.pr.solve_maze(&self.grid, pos)?)
    }
}

fn build(maze: &MazeConfig, seed: u64) -> Result<Grid, GameError> {
    let config = MazeConfig {
        seed: Some(seed),
        ..maze.clone()
    };
    Ok(generate_with(&config)?)
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn config_round_trip() {
        let config = GameConfig {
            maze: MazeConfig::new(11, 4).with_seed(5),
            regenerate_on_win: false,
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
