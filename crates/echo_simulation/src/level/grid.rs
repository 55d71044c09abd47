//! LevelGrid — разобранная сетка уровня (read-only после загрузки).
//!
//! Координаты:
//! - Grid coordinate: `IVec2 { x: column, y: row }`
//! - World position: `Vec3`, row идёт по оси Z, Y навигацией не используется
//! - `grid = floor(world / cell_size)`, обратное преобразование даёт ЦЕНТР клетки

use bevy::prelude::*;

use super::{Legend, LevelError, TileKind};

/// Размер клетки по умолчанию (world units)
pub const DEFAULT_CELL_SIZE: f32 = 3.0;

#[derive(Debug, Clone, PartialEq)]
pub struct LevelGrid {
    width: usize,
    height: usize,
    /// Row-major, `tiles[row * width + column]`
    tiles: Vec<TileKind>,
    cell_size: f32,
    level_id: Option<String>,
}

impl LevelGrid {
    /// Разбирает layout через legend. Все glyph'ы резолвятся здесь, один раз.
    pub fn from_rows<S: AsRef<str>>(
        rows: &[S],
        legend: &Legend,
        cell_size: f32,
    ) -> Result<Self, LevelError> {
        if !(cell_size.is_finite() && cell_size > 0.0) {
            return Err(LevelError::InvalidCellSize(cell_size));
        }

        let height = rows.len();
        let width = rows.first().map(|row| row.as_ref().chars().count()).unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(LevelError::Empty);
        }

        let mut tiles = Vec::with_capacity(width * height);
        for (row_index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let found = row.chars().count();
            if found != width {
                return Err(LevelError::RaggedRow {
                    row: row_index,
                    expected: width,
                    found,
                });
            }

            for (column, glyph) in row.chars().enumerate() {
                let kind = legend.kind(glyph).ok_or(LevelError::UnknownGlyph {
                    glyph,
                    row: row_index,
                    column,
                })?;
                tiles.push(kind);
            }
        }

        Ok(Self {
            width,
            height,
            tiles,
            cell_size,
            level_id: None,
        })
    }

    pub fn with_level_id(mut self, level_id: impl Into<String>) -> Self {
        self.level_id = Some(level_id.into());
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn level_id(&self) -> Option<&str> {
        self.level_id.as_deref()
    }

    pub fn contains(&self, cell: IVec2) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as usize) < self.width && (cell.y as usize) < self.height
    }

    pub fn tile(&self, cell: IVec2) -> Option<TileKind> {
        if !self.contains(cell) {
            return None;
        }
        Some(self.tiles[cell.y as usize * self.width + cell.x as usize])
    }

    /// Клетки вне сетки непроходимы
    pub fn is_walkable(&self, cell: IVec2) -> bool {
        self.tile(cell).is_some_and(TileKind::is_walkable)
    }

    pub fn world_to_grid(&self, position: Vec3) -> IVec2 {
        IVec2::new(
            (position.x / self.cell_size).floor() as i32,
            (position.z / self.cell_size).floor() as i32,
        )
    }

    /// Центр клетки в world space; `y` просто переносится
    pub fn grid_to_world(&self, cell: IVec2, y: f32) -> Vec3 {
        let half = self.cell_size / 2.0;
        Vec3::new(
            cell.x as f32 * self.cell_size + half,
            y,
            cell.y as f32 * self.cell_size + half,
        )
    }

    /// Центр клетки, содержащей `position` (идемпотентно)
    pub fn cell_center(&self, position: Vec3) -> Vec3 {
        self.grid_to_world(self.world_to_grid(position), position.y)
    }

    /// Все клетки в row-major порядке
    pub fn cells(&self) -> impl Iterator<Item = (IVec2, TileKind)> + '_ {
        self.tiles.iter().enumerate().map(move |(index, kind)| {
            let cell = IVec2::new((index % self.width) as i32, (index / self.width) as i32);
            (cell, *kind)
        })
    }

    pub fn walkable_cells(&self) -> impl Iterator<Item = IVec2> + '_ {
        self.cells()
            .filter(|(_, kind)| kind.is_walkable())
            .map(|(cell, _)| cell)
    }

    /// Центры всех тайлов заданного типа (spawn'ы Entity/Start и т.п.)
    pub fn positions_of(&self, kind: TileKind, y: f32) -> Vec<Vec3> {
        self.cells()
            .filter(|(_, tile)| *tile == kind)
            .map(|(cell, _)| self.grid_to_world(cell, y))
            .collect()
    }
}
