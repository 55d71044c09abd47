//! Tests for level grid parsing and coordinate mapping.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use crate::level::{Legend, LevelError, LevelGrid, TileKind};

    fn sample_grid() -> LevelGrid {
        let rows = ["#####", "#S.E#", "#OKL#", "#D.X#", "#####"];
        LevelGrid::from_rows(&rows, &Legend::standard(), 2.0).unwrap()
    }

    #[test]
    fn test_walkability_by_kind() {
        assert!(!TileKind::Wall.is_walkable());
        assert!(!TileKind::Pillar.is_walkable());
        assert!(!TileKind::LockedDoor.is_walkable());
        for kind in [
            TileKind::Floor,
            TileKind::Start,
            TileKind::Entity,
            TileKind::Key,
            TileKind::Debris,
            TileKind::Exit,
        ] {
            assert!(kind.is_walkable(), "{:?} should be walkable", kind);
        }
    }

    #[test]
    fn test_tile_names_round_trip() {
        for kind in TileKind::ALL {
            assert_eq!(TileKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(TileKind::from_name("Locked Door"), Some(TileKind::LockedDoor));
        assert_eq!(TileKind::from_name("Lava"), None);
    }

    #[test]
    fn test_parse_resolves_every_glyph() {
        let grid = sample_grid();
        assert_eq!(grid.width(), 5);
        assert_eq!(grid.height(), 5);
        assert_eq!(grid.tile(IVec2::new(1, 1)), Some(TileKind::Start));
        assert_eq!(grid.tile(IVec2::new(3, 1)), Some(TileKind::Entity));
        assert_eq!(grid.tile(IVec2::new(1, 2)), Some(TileKind::Pillar));
        assert_eq!(grid.tile(IVec2::new(3, 2)), Some(TileKind::LockedDoor));
        assert_eq!(grid.tile(IVec2::new(5, 0)), None);
        assert!(!grid.is_walkable(IVec2::new(-1, 2)));
        assert!(grid.is_walkable(IVec2::new(2, 2)));
    }

    #[test]
    fn test_unknown_glyph_is_rejected() {
        let err = LevelGrid::from_rows(&["#?#"], &Legend::standard(), 1.0).unwrap_err();
        assert!(matches!(
            err,
            LevelError::UnknownGlyph { glyph: '?', row: 0, column: 1 }
        ));
    }

    #[test]
    fn test_ragged_rows_are_rejected() {
        let err = LevelGrid::from_rows(&["###", "##"], &Legend::standard(), 1.0).unwrap_err();
        assert!(matches!(
            err,
            LevelError::RaggedRow { row: 1, expected: 3, found: 2 }
        ));
    }

    #[test]
    fn test_invalid_cell_size() {
        let empty: [&str; 0] = [];
        assert!(matches!(
            LevelGrid::from_rows(&["#"], &Legend::standard(), 0.0),
            Err(LevelError::InvalidCellSize(_))
        ));
        assert!(matches!(
            LevelGrid::from_rows(&empty, &Legend::standard(), 1.0),
            Err(LevelError::Empty)
        ));
    }

    #[test]
    fn test_world_to_grid_floors_both_axes() {
        let grid = sample_grid();
        assert_eq!(grid.world_to_grid(Vec3::new(3.9, 7.0, 1.99)), IVec2::new(1, 0));
        assert_eq!(grid.world_to_grid(Vec3::new(-0.1, 0.0, 4.0)), IVec2::new(-1, 2));
    }

    #[test]
    fn test_cell_center_round_trip_is_idempotent() {
        let grid = sample_grid();
        let p = Vec3::new(5.3, 1.25, 2.7);
        let center = grid.cell_center(p);
        assert_eq!(center, Vec3::new(5.0, 1.25, 3.0));
        assert_eq!(grid.cell_center(center), center);
        assert_eq!(grid.world_to_grid(center), grid.world_to_grid(p));
    }

    #[test]
    fn test_positions_of_kind() {
        let grid = sample_grid();
        assert_eq!(grid.positions_of(TileKind::Entity, 0.0), vec![Vec3::new(7.0, 0.0, 3.0)]);
        assert_eq!(grid.positions_of(TileKind::Exit, 1.0), vec![Vec3::new(7.0, 1.0, 7.0)]);
        assert_eq!(grid.walkable_cells().count(), 7);
    }

    #[test]
    fn test_json_level_file() {
        let json = r#####"{
            "level_id": "level_1_intro",
            "width": 4,
            "height": 3,
            "legend": { "#": "Wall", ".": "Floor", "L": "Locked Door" },
            "layout": ["####", "#.L#", "####"]
        }"#####;
        let grid = LevelGrid::from_json(json).unwrap();
        assert_eq!(grid.level_id(), Some("level_1_intro"));
        assert_eq!(grid.cell_size(), crate::level::DEFAULT_CELL_SIZE);
        assert_eq!(grid.tile(IVec2::new(2, 1)), Some(TileKind::LockedDoor));
    }

    #[test]
    fn test_json_dimension_mismatch() {
        let json = r#####"{ "width": 9, "height": 1, "legend": { "#": "Wall" }, "layout": ["##"] }"#####;
        assert!(matches!(
            LevelGrid::from_json(json),
            Err(LevelError::DimensionMismatch { declared_width: 9, width: 2, .. })
        ));
    }

    #[test]
    fn test_json_bad_legend() {
        let json = r#####"{ "legend": { "##": "Wall" }, "layout": ["#"] }"#####;
        assert!(matches!(LevelGrid::from_json(json), Err(LevelError::InvalidGlyph(_))));

        let json = r#####"{ "legend": { "#": "Lava" }, "layout": ["#"] }"#####;
        assert!(matches!(LevelGrid::from_json(json), Err(LevelError::UnknownTileKind(_))));
    }
}
