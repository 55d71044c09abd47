//! Level files (JSON от генератора уровней).
//!
//! Формат:
//! ```json
//! { "level_id": "level_1_intro", "width": 5, "height": 3,
//!   "legend": { "#": "Wall", ".": "Floor" },
//!   "layout": ["#####", "#...#", "#####"] }
//! ```
//! `cell_size` опционален (по умолчанию [`DEFAULT_CELL_SIZE`]).

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{Legend, LevelError, LevelGrid, DEFAULT_CELL_SIZE};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelFile {
    #[serde(default)]
    pub level_id: Option<String>,
    #[serde(default)]
    pub width: Option<usize>,
    #[serde(default)]
    pub height: Option<usize>,
    #[serde(default)]
    pub cell_size: Option<f32>,
    pub legend: BTreeMap<String, String>,
    pub layout: Vec<String>,
}

impl LevelFile {
    pub fn into_grid(self) -> Result<LevelGrid, LevelError> {
        let legend = Legend::from_names(
            self.legend
                .iter()
                .map(|(glyph, name)| (glyph.as_str(), name.as_str())),
        )?;
        let grid = LevelGrid::from_rows(
            &self.layout,
            &legend,
            self.cell_size.unwrap_or(DEFAULT_CELL_SIZE),
        )?;

        if let (Some(declared_width), Some(declared_height)) = (self.width, self.height) {
            if declared_width != grid.width() || declared_height != grid.height() {
                return Err(LevelError::DimensionMismatch {
                    declared_width,
                    declared_height,
                    width: grid.width(),
                    height: grid.height(),
                });
            }
        }

        Ok(match self.level_id {
            Some(level_id) => grid.with_level_id(level_id),
            None => grid,
        })
    }
}

impl LevelGrid {
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let file: LevelFile = serde_json::from_str(json)?;
        file.into_grid()
    }

    pub fn from_file(path: &Path) -> Result<Self, LevelError> {
        let json = std::fs::read_to_string(path)?;
        let grid = Self::from_json(&json)?;
        crate::log_info(&format!(
            "Level loaded: {} ({}x{}, cell {})",
            grid.level_id().unwrap_or("<unnamed>"),
            grid.width(),
            grid.height(),
            grid.cell_size()
        ));
        Ok(grid)
    }
}
