//! Navigation domain — grid pathfinding и выбор целей
//!
//! Содержит:
//! - find_path (A* 8-связный, octile heuristic, без corner-cutting)
//! - random_walkable_tile (seeded выбор patrol/search точек)
//! - SeededRandom (Park–Miller LCG, один на агента)
//! - LineOfSight (predicate от хоста + GridLineOfSight для headless)

pub mod line_of_sight;
pub mod pathfinding;
pub mod rng;
pub mod sampler;

#[cfg(test)]
mod sampler_tests;

pub use line_of_sight::{ClearSight, GridLineOfSight, LineOfSight};
pub use pathfinding::{find_cell_path, find_path, octile_distance, path_cost};
pub use rng::SeededRandom;
pub use sampler::{random_walkable_tile, SampleArea};
