//! Level domain — read-only сетка тайлов
//!
//! Содержит:
//! - TileKind / Legend (glyph → тип, проходимость)
//! - LevelGrid (world ↔ grid, выборки клеток)
//! - LevelFile (JSON от генератора уровней)
//! - LevelError

pub mod error;
pub mod grid;
pub mod loader;
pub mod tile;

#[cfg(test)]
mod grid_tests;

pub use error::LevelError;
pub use grid::{LevelGrid, DEFAULT_CELL_SIZE};
pub use loader::LevelFile;
pub use tile::{Legend, TileKind};
