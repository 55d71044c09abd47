//! Line-of-Sight (LOS) — predicate `(from, to) -> bool`, true = видимость чистая.
//!
//! Хост (рендер/физика) может подставить свой raycast через трейт или closure.
//! `GridLineOfSight` — headless реализация по тайлам уровня.

use std::sync::Arc;

use bevy::prelude::*;

use crate::level::LevelGrid;

pub trait LineOfSight: Send + Sync {
    fn is_clear(&self, from: Vec3, to: Vec3) -> bool;
}

impl<F> LineOfSight for F
where
    F: Fn(Vec3, Vec3) -> bool + Send + Sync,
{
    fn is_clear(&self, from: Vec3, to: Vec3) -> bool {
        self(from, to)
    }
}

/// Видимость всегда чистая (тесты, арена без стен)
#[derive(Debug, Clone, Copy, Default)]
pub struct ClearSight;

impl LineOfSight for ClearSight {
    fn is_clear(&self, _from: Vec3, _to: Vec3) -> bool {
        true
    }
}

/// LOS по сетке: отрезок в плоскости XZ проходит клетки (grid traversal),
/// любая непроходимая клетка на пути блокирует видимость.
#[derive(Debug, Clone)]
pub struct GridLineOfSight {
    grid: Arc<LevelGrid>,
}

impl GridLineOfSight {
    pub fn new(grid: Arc<LevelGrid>) -> Self {
        Self { grid }
    }
}

impl LineOfSight for GridLineOfSight {
    fn is_clear(&self, from: Vec3, to: Vec3) -> bool {
        traversed_cells(&self.grid, from, to)
            .into_iter()
            .all(|cell| self.grid.is_walkable(cell))
    }
}

/// Клетки, через которые проходит отрезок (Amanatides–Woo traversal), по порядку.
pub fn traversed_cells(grid: &LevelGrid, from: Vec3, to: Vec3) -> Vec<IVec2> {
    let cell_size = grid.cell_size();
    let start = Vec2::new(from.x, from.z) / cell_size;
    let end = Vec2::new(to.x, to.z) / cell_size;

    let mut cell = IVec2::new(start.x.floor() as i32, start.y.floor() as i32);
    let last = IVec2::new(end.x.floor() as i32, end.y.floor() as i32);
    let mut cells = vec![cell];

    let delta = end - start;
    let step = IVec2::new(delta.x.signum() as i32, delta.y.signum() as i32);

    let axis_setup = |origin: f32, dir: f32, cell: i32, step: i32| -> (f32, f32) {
        if step == 0 || dir == 0.0 {
            return (f32::INFINITY, f32::INFINITY);
        }
        let boundary = if step > 0 { cell as f32 + 1.0 } else { cell as f32 };
        ((boundary - origin) / dir, (1.0 / dir).abs())
    };
    let (mut t_max_x, t_delta_x) = axis_setup(start.x, delta.x, cell.x, step.x);
    let (mut t_max_y, t_delta_y) = axis_setup(start.y, delta.y, cell.y, step.y);

    // Предохранитель: число клеток на пути ограничено манхэттеном
    let max_steps = ((last.x - cell.x).abs() + (last.y - cell.y).abs()) as usize;
    for _ in 0..max_steps {
        if cell == last {
            break;
        }
        if t_max_x < t_max_y {
            cell.x += step.x;
            t_max_x += t_delta_x;
        } else {
            cell.y += step.y;
            t_max_y += t_delta_y;
        }
        cells.push(cell);
    }
    cells
}
