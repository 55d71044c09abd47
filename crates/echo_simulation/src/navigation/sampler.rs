//! Tile sampler: случайная проходимая клетка для patrol/search целей.

use bevy::prelude::*;
use crate::level::LevelGrid;
use crate::navigation::SeededRandom;

/// Ограничение выборки: круг вокруг точки (world units)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleArea {
    pub center: Vec3,
    pub radius: f32,
}

impl SampleArea {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }
}

/// Случайная проходимая клетка (центр, `y` из center или 0).
///
/// С `area` сначала сужаем скан до bounding box `radius / cell_size` (округление
/// наружу), потом фильтруем по точному евклидову расстоянию до центра клетки.
/// Индекс — `rng.next_int(0, n)`: ровно один шаг генератора на выбор, так что
/// seed воспроизводит ту же последовательность patrol точек. `None` — кандидатов нет.
pub fn random_walkable_tile(
    grid: &LevelGrid,
    rng: &mut SeededRandom,
    area: Option<SampleArea>,
) -> Option<Vec3> {
    let candidates = walkable_candidates(grid, area);
    if candidates.is_empty() {
        return None;
    }

    let y = area.map(|a| a.center.y).unwrap_or(0.0);
    let pick = rng.next_int(0, candidates.len() as i64) as usize;
    candidates.get(pick).map(|cell| grid.grid_to_world(*cell, y))
}

/// Кандидаты в row-major порядке (порядок важен для воспроизводимости)
pub fn walkable_candidates(grid: &LevelGrid, area: Option<SampleArea>) -> Vec<IVec2> {
    let Some(area) = area else {
        return grid.walkable_cells().collect();
    };

    if !(area.radius.is_finite() && area.radius >= 0.0) {
        return if area.radius == f32::INFINITY {
            grid.walkable_cells().collect()
        } else {
            Vec::new()
        };
    }

    let center_cell = grid.world_to_grid(area.center);
    // Дальше размеров сетки сканировать нечего
    let span = grid.width().max(grid.height()) as i32;
    let reach = ((area.radius / grid.cell_size()).ceil() as i32).min(span);

    let min_row = center_cell.y.saturating_sub(reach).max(0);
    let max_row = center_cell.y.saturating_add(reach).min(grid.height() as i32 - 1);
    let min_col = center_cell.x.saturating_sub(reach).max(0);
    let max_col = center_cell.x.saturating_add(reach).min(grid.width() as i32 - 1);

    let mut candidates = Vec::new();
    for row in min_row..=max_row {
        for column in min_col..=max_col {
            let cell = IVec2::new(column, row);
            if !grid.is_walkable(cell) {
                continue;
            }
            let center = grid.grid_to_world(cell, area.center.y);
            let offset = Vec2::new(center.x - area.center.x, center.z - area.center.z);
            if offset.length() <= area.radius {
                candidates.push(cell);
            }
        }
    }
    candidates
}
