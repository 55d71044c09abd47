//! Tests for tile sampling, SeededRandom and grid line-of-sight.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use bevy::prelude::*;
    use rand::RngCore;

    use crate::level::{Legend, LevelGrid};
    use crate::navigation::line_of_sight::traversed_cells;
    use crate::navigation::sampler::walkable_candidates;
    use crate::navigation::{
        random_walkable_tile, ClearSight, GridLineOfSight, LineOfSight, SampleArea, SeededRandom,
    };

    fn room() -> LevelGrid {
        LevelGrid::from_rows(
            &[
                "#########",
                "#.......#",
                "#.......#",
                "#...#...#",
                "#.......#",
                "#.......#",
                "#########",
            ],
            &Legend::standard(),
            2.0,
        )
        .unwrap()
    }

    #[test]
    fn test_park_miller_sequence() {
        let mut rng = SeededRandom::new(1);
        rng.next_f64();
        assert_eq!(rng.state(), 16_807);
        rng.next_f64();
        assert_eq!(rng.state(), 282_475_249);
        rng.next_f64();
        assert_eq!(rng.state(), 1_622_650_073);
    }

    #[test]
    fn test_zero_seed_is_remapped() {
        assert_eq!(SeededRandom::new(0).state(), 2_147_483_646);
        assert_eq!(SeededRandom::new(2_147_483_647).state(), 2_147_483_646);
    }

    #[test]
    fn test_next_f64_in_unit_range() {
        let mut rng = SeededRandom::new(42);
        for _ in 0..1000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v), "v = {}", v);
        }
    }

    #[test]
    fn test_next_int_bounds() {
        let mut rng = SeededRandom::new(99);
        for _ in 0..1000 {
            let v = rng.next_int(-3, 4);
            assert!((-3..4).contains(&v));
        }
        assert_eq!(rng.next_int(5, 5), 5);
        assert_eq!(rng.next_int(7, 2), 7);
    }

    #[test]
    fn test_from_level_id() {
        assert_eq!(SeededRandom::from_level_id("77"), SeededRandom::new(77));
        assert_eq!(SeededRandom::from_level_id(""), SeededRandom::new(12_345));
        assert_eq!(
            SeededRandom::from_level_id("crypt-02"),
            SeededRandom::from_level_id("crypt-02")
        );
        assert_ne!(
            SeededRandom::from_level_id("crypt-02"),
            SeededRandom::from_level_id("crypt-03")
        );
    }

    #[test]
    fn test_rng_core_fill_bytes_is_deterministic() {
        let mut a = SeededRandom::new(5);
        let mut b = SeededRandom::new(5);
        let mut buf_a = [0u8; 11];
        let mut buf_b = [0u8; 11];
        a.fill_bytes(&mut buf_a);
        b.fill_bytes(&mut buf_b);
        assert_eq!(buf_a, buf_b);
        assert_eq!(a.next_u64(), b.next_u64());
    }

    #[test]
    fn test_same_seed_same_samples() {
        let grid = room();
        let mut a = SeededRandom::new(2024);
        let mut b = SeededRandom::new(2024);
        for _ in 0..50 {
            assert_eq!(
                random_walkable_tile(&grid, &mut a, None),
                random_walkable_tile(&grid, &mut b, None)
            );
        }
    }

    #[test]
    fn test_samples_are_walkable_centers() {
        let grid = room();
        let mut rng = SeededRandom::new(3);
        for _ in 0..100 {
            let p = random_walkable_tile(&grid, &mut rng, None).unwrap();
            assert!(grid.is_walkable(grid.world_to_grid(p)));
            assert_eq!(grid.cell_center(p), p);
            assert_eq!(p.y, 0.0);
        }
    }

    #[test]
    fn test_area_restricts_samples() {
        let grid = room();
        let center = grid.grid_to_world(IVec2::new(2, 2), 1.5);
        let area = SampleArea::new(center, 2.5);
        let mut rng = SeededRandom::new(8);
        for _ in 0..100 {
            let p = random_walkable_tile(&grid, &mut rng, Some(area)).unwrap();
            let offset = Vec2::new(p.x - center.x, p.z - center.z);
            assert!(offset.length() <= 2.5);
            assert_eq!(p.y, 1.5);
        }
        // Центр + 4 cardinal соседа (диагонали на 2√2 > 2.5)
        assert_eq!(walkable_candidates(&grid, Some(area)).len(), 5);
    }

    #[test]
    fn test_area_without_walkable_tiles() {
        let grid = room();
        // Стена (4,3) и радиус меньше шага до соседей
        let area = SampleArea::new(grid.grid_to_world(IVec2::new(4, 3), 0.0), 0.5);
        let mut rng = SeededRandom::new(1);
        assert_eq!(random_walkable_tile(&grid, &mut rng, Some(area)), None);

        let sealed = LevelGrid::from_rows(&["###", "###"], &Legend::standard(), 1.0).unwrap();
        assert_eq!(random_walkable_tile(&sealed, &mut rng, None), None);
    }

    #[test]
    fn test_pick_is_single_next_int_step() {
        let grid = room();
        let candidates = walkable_candidates(&grid, None);
        for seed in 1..50u64 {
            let mut rng = SeededRandom::new(seed);
            let picked = random_walkable_tile(&grid, &mut rng, None).unwrap();

            let mut reference = SeededRandom::new(seed);
            let index = reference.next_int(0, candidates.len() as i64) as usize;
            assert_eq!(picked, grid.grid_to_world(candidates[index], 0.0), "seed {}", seed);
            assert_eq!(rng.state(), reference.state(), "seed {}", seed);
        }

        let mut rng = SeededRandom::new(1);
        random_walkable_tile(&grid, &mut rng, None);
        assert_eq!(rng.state(), 16807);
    }

    #[test]
    fn test_huge_radius_is_clamped_to_grid() {
        let grid = room();
        let area = SampleArea::new(grid.grid_to_world(IVec2::new(5, 3), 0.0), 1.0e12);
        assert_eq!(
            walkable_candidates(&grid, Some(area)).len(),
            grid.walkable_cells().count()
        );
        let mut rng = SeededRandom::new(4);
        assert!(random_walkable_tile(&grid, &mut rng, Some(area)).is_some());

        // Центр далеко за пределами сетки
        let far = SampleArea::new(Vec3::new(1.0e12, 0.0, -1.0e12), 1.0e12);
        assert!(walkable_candidates(&grid, Some(far)).is_empty());
    }

    #[test]
    fn test_grid_line_of_sight() {
        let grid = Arc::new(room());
        let los = GridLineOfSight::new(grid.clone());
        let left = grid.grid_to_world(IVec2::new(2, 3), 0.0);
        let right = grid.grid_to_world(IVec2::new(6, 3), 0.0);
        let above = grid.grid_to_world(IVec2::new(6, 1), 0.0);

        assert!(!los.is_clear(left, right), "pillar blocks the row");
        assert!(los.is_clear(left, grid.grid_to_world(IVec2::new(2, 5), 0.0)));
        assert!(los.is_clear(grid.grid_to_world(IVec2::new(1, 1), 0.0), above));
        assert!(ClearSight.is_clear(left, right));
    }

    #[test]
    fn test_closure_line_of_sight() {
        let never = |_: Vec3, _: Vec3| false;
        assert!(!never.is_clear(Vec3::ZERO, Vec3::X));
    }

    #[test]
    fn test_traversed_cells_are_contiguous() {
        let grid = room();
        let cells = traversed_cells(&grid, Vec3::new(2.5, 0.0, 2.5), Vec3::new(13.0, 0.0, 9.0));
        assert_eq!(cells.first(), Some(&IVec2::new(1, 1)));
        assert_eq!(cells.last(), Some(&IVec2::new(6, 4)));
        for pair in cells.windows(2) {
            let step = pair[1] - pair[0];
            assert_eq!(step.x.abs() + step.y.abs(), 1);
        }
    }
}
