//! Ошибки загрузки уровня.
//!
//! Уровень валидируется один раз при загрузке; дальше навигация работает
//! с уже разобранной сеткой и ошибок не порождает.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to read level file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse level json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("level layout is empty")]
    Empty,

    #[error("row {row} has {found} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("glyph {glyph:?} at row {row}, column {column} is not in the legend")]
    UnknownGlyph { glyph: char, row: usize, column: usize },

    #[error("legend key {0:?} must be exactly one character")]
    InvalidGlyph(String),

    #[error("unknown tile kind {0:?}")]
    UnknownTileKind(String),

    #[error("declared size {declared_width}x{declared_height} does not match layout {width}x{height}")]
    DimensionMismatch {
        declared_width: usize,
        declared_height: usize,
        width: usize,
        height: usize,
    },

    #[error("cell size must be positive and finite, got {0}")]
    InvalidCellSize(f32),
}
