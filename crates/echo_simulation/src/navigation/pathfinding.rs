//! Grid pathfinder: A* по 8-связной сетке
//!
//! - Cardinal шаг стоит 1, diagonal — √2
//! - Diagonal разрешён только если ОБЕ соседние cardinal клетки проходимы
//!   (никакого corner-cutting между стенами)
//! - Heuristic: octile distance (admissible + consistent для этой модели цен)
//! - Равные f-score разбираются FIFO (порядок discovery) — детерминизм для тестов
//!
//! Stateless: вся память живёт внутри одного вызова. Out-of-bounds, sealed goal
//! и недостижимая цель — это пустой route, не ошибка.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::f32::consts::SQRT_2;

use bevy::prelude::*;
use ordered_float::OrderedFloat;

use crate::level::LevelGrid;

pub const CARDINAL_COST: f32 = 1.0;
pub const DIAGONAL_COST: f32 = SQRT_2;

/// Cardinal направления первыми (замена goal смотрит только на первые четыре)
pub const NEIGHBOR_OFFSETS: [IVec2; 8] = [
    IVec2::new(0, -1),
    IVec2::new(0, 1),
    IVec2::new(-1, 0),
    IVec2::new(1, 0),
    IVec2::new(-1, -1),
    IVec2::new(1, -1),
    IVec2::new(-1, 1),
    IVec2::new(1, 1),
];

/// Octile distance: `(dx + dz) + (√2 - 2) * min(dx, dz)`
pub fn octile_distance(a: IVec2, b: IVec2) -> f32 {
    let dx = (a.x - b.x).abs() as f32;
    let dz = (a.y - b.y).abs() as f32;
    (dx + dz) + (SQRT_2 - 2.0) * dx.min(dz)
}

pub fn step_cost(offset: IVec2) -> f32 {
    if offset.x != 0 && offset.y != 0 {
        DIAGONAL_COST
    } else {
        CARDINAL_COST
    }
}

/// Можно ли шагнуть из `from` на `offset` (проходимость + corner rule)
pub fn can_step(grid: &LevelGrid, from: IVec2, offset: IVec2) -> bool {
    if !grid.is_walkable(from + offset) {
        return false;
    }
    if offset.x != 0 && offset.y != 0 {
        return grid.is_walkable(from + IVec2::new(offset.x, 0))
            && grid.is_walkable(from + IVec2::new(0, offset.y));
    }
    true
}

/// Соседи, в которые A* может перейти из `cell`
pub fn walkable_neighbors(grid: &LevelGrid, cell: IVec2) -> impl Iterator<Item = IVec2> + '_ {
    NEIGHBOR_OFFSETS
        .into_iter()
        .filter(move |offset| can_step(grid, cell, *offset))
        .map(move |offset| cell + offset)
}

/// Если goal внутри препятствия — ближайший (Manhattan, в world space) проходимый
/// cardinal сосед, ничьи в порядке N, S, W, E. Диагонали не рассматриваются:
/// `None`, если все четыре cardinal соседа закрыты.
pub fn resolve_goal_cell(grid: &LevelGrid, goal: Vec3) -> Option<IVec2> {
    let goal_cell = grid.world_to_grid(goal);
    if grid.is_walkable(goal_cell) {
        return Some(goal_cell);
    }

    NEIGHBOR_OFFSETS[..4]
        .iter()
        .map(|offset| goal_cell + *offset)
        .filter(|cell| grid.is_walkable(*cell))
        .min_by_key(|cell| {
            let center = grid.grid_to_world(*cell, goal.y);
            OrderedFloat((center.x - goal.x).abs() + (center.z - goal.z).abs())
        })
}

/// A* между двумя world позициями.
///
/// Возвращает центры клеток от start до (возможно подменённого) goal включительно,
/// `y` всех waypoint'ов берётся из `start`. Пустой Vec = маршрута нет.
pub fn find_path(start: Vec3, goal: Vec3, grid: &LevelGrid) -> Vec<Vec3> {
    let start_cell = grid.world_to_grid(start);
    let goal_cell = grid.world_to_grid(goal);

    if !grid.contains(start_cell) || !grid.contains(goal_cell) {
        crate::log(&format!(
            "Pathfinding: start {:?} or goal {:?} out of bounds",
            start_cell, goal_cell
        ));
        return Vec::new();
    }

    let Some(target_cell) = resolve_goal_cell(grid, goal) else {
        crate::log(&format!(
            "Pathfinding: goal {:?} sealed inside obstacle",
            goal_cell
        ));
        return Vec::new();
    };

    match find_cell_path(grid, start_cell, target_cell) {
        Some(cells) => cells
            .into_iter()
            .map(|cell| grid.grid_to_world(cell, start.y))
            .collect(),
        None => {
            crate::log(&format!(
                "Pathfinding: no path from {:?} to {:?}",
                start_cell, target_cell
            ));
            Vec::new()
        }
    }
}

/// A* в grid координатах. Клетки обоих концов должны лежать в сетке.
pub fn find_cell_path(grid: &LevelGrid, start: IVec2, goal: IVec2) -> Option<Vec<IVec2>> {
    if !grid.contains(start) || !grid.contains(goal) {
        return None;
    }

    let width = grid.width();
    let index = |cell: IVec2| cell.y as usize * width + cell.x as usize;
    let cell_at = |idx: usize| IVec2::new((idx % width) as i32, (idx / width) as i32);

    let cell_count = width * grid.height();
    let mut g_score = vec![f32::INFINITY; cell_count];
    let mut came_from: Vec<Option<usize>> = vec![None; cell_count];
    let mut closed = vec![false; cell_count];

    // (f, discovery order, cell index); Reverse превращает max-heap в min-heap
    let mut open = BinaryHeap::<(Reverse<OrderedFloat<f32>>, Reverse<u64>, usize)>::new();
    let mut discovery: u64 = 0;

    let start_idx = index(start);
    let goal_idx = index(goal);
    g_score[start_idx] = 0.0;
    open.push((Reverse(OrderedFloat(octile_distance(start, goal))), Reverse(discovery), start_idx));

    while let Some((_, _, current_idx)) = open.pop() {
        if closed[current_idx] {
            continue;
        }
        if current_idx == goal_idx {
            return Some(reconstruct(&came_from, goal_idx, cell_at));
        }
        closed[current_idx] = true;

        let current = cell_at(current_idx);
        for offset in NEIGHBOR_OFFSETS {
            if !can_step(grid, current, offset) {
                continue;
            }
            let neighbor = current + offset;
            let neighbor_idx = index(neighbor);
            if closed[neighbor_idx] {
                continue;
            }

            let tentative = g_score[current_idx] + step_cost(offset);
            if tentative < g_score[neighbor_idx] {
                g_score[neighbor_idx] = tentative;
                came_from[neighbor_idx] = Some(current_idx);
                discovery += 1;
                let f = tentative + octile_distance(neighbor, goal);
                open.push((Reverse(OrderedFloat(f)), Reverse(discovery), neighbor_idx));
            }
        }
    }

    None
}

fn reconstruct(
    came_from: &[Option<usize>],
    goal_idx: usize,
    cell_at: impl Fn(usize) -> IVec2,
) -> Vec<IVec2> {
    let mut cells = vec![cell_at(goal_idx)];
    let mut current = goal_idx;
    while let Some(parent) = came_from[current] {
        cells.push(cell_at(parent));
        current = parent;
    }
    cells.reverse();
    cells
}

/// Стоимость маршрута по клеткам (сумма step costs)
pub fn path_cost(cells: &[IVec2]) -> f32 {
    cells
        .windows(2)
        .map(|pair| step_cost(pair[1] - pair[0]))
        .sum()
}
