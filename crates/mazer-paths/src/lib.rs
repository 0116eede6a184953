//! Pathfinding algorithms for grid mazes.
//!
//! This crate provides the search engines used by the *mazer* workspace:
//!
//! - **A\*** shortest-path search ([`PathRange::astar_path`]) with
//!   deterministic tie-breaking
//! - **Maze solving** from a cell to the exit ([`solve`],
//!   [`PathRange::solve_maze`]) encoded as a [`PathResult`]
//! - **BFS** distance maps ([`PathRange::bfs_map`]) and the farthest
//!   reachable cell ([`PathRange::bfs_farthest`])
//!
//! Both searches operate through [`PathRange`], which owns and reuses internal
//! caches so that repeated queries incur zero allocations after warm-up.
//! [`Grid`](mazer_core::Grid) implements every pather trait: neighbours are
//! the cells behind open walls, each move costs 1 and the estimate is the
//! Manhattan distance.
//!
//! # Trait hierarchy
//!
//! | Trait | Required for |
//! |---|---|
//! | [`Pather`] | BFS |
//! | [`WeightedPather`] : [`Pather`] | cost of a move |
//! | [`AstarPather`] : [`WeightedPather`] | A* |

mod astar;
mod bfs;
mod distance;
mod maze;
mod pathrange;
mod solve;
mod traits;

pub use distance::manhattan;
pub use pathrange::{PathNode, PathRange, UNREACHABLE};
pub use solve::{NOT_ON_PATH, PathResult, SolveError, solve};
pub use traits::{AstarPather, Pather, WeightedPather};
