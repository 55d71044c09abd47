//! Типы тайлов и legend (glyph → TileKind).

use std::collections::BTreeMap;

use bevy::prelude::*;

use super::LevelError;

/// Закрытый набор типов тайлов уровня.
///
/// Проходимость — чистая функция от типа: Wall, Pillar и Locked Door блокируют,
/// всё остальное проходимо.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum TileKind {
    Wall,
    Floor,
    Start,
    Entity,
    Key,
    Debris,
    Pillar,
    LockedDoor,
    Exit,
}

impl TileKind {
    pub const ALL: [TileKind; 9] = [
        TileKind::Wall,
        TileKind::Floor,
        TileKind::Start,
        TileKind::Entity,
        TileKind::Key,
        TileKind::Debris,
        TileKind::Pillar,
        TileKind::LockedDoor,
        TileKind::Exit,
    ];

    /// Имя типа в том виде, в каком оно записано в level files
    pub fn name(self) -> &'static str {
        match self {
            TileKind::Wall => "Wall",
            TileKind::Floor => "Floor",
            TileKind::Start => "Start",
            TileKind::Entity => "Entity",
            TileKind::Key => "Key",
            TileKind::Debris => "Debris",
            TileKind::Pillar => "Pillar",
            TileKind::LockedDoor => "Locked Door",
            TileKind::Exit => "Exit",
        }
    }

    pub fn from_name(name: &str) -> Option<TileKind> {
        TileKind::ALL.into_iter().find(|kind| kind.name() == name)
    }

    pub fn is_walkable(self) -> bool {
        !matches!(self, TileKind::Wall | TileKind::Pillar | TileKind::LockedDoor)
    }
}

/// Legend: односимвольный glyph → тип тайла
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Legend {
    glyphs: BTreeMap<char, TileKind>,
}

impl Legend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Legend, которую пишет генератор уровней
    pub fn standard() -> Self {
        Self::new()
            .with('#', TileKind::Wall)
            .with('.', TileKind::Floor)
            .with('S', TileKind::Start)
            .with('E', TileKind::Entity)
            .with('K', TileKind::Key)
            .with('D', TileKind::Debris)
            .with('O', TileKind::Pillar)
            .with('L', TileKind::LockedDoor)
            .with('X', TileKind::Exit)
    }

    pub fn with(mut self, glyph: char, kind: TileKind) -> Self {
        self.insert(glyph, kind);
        self
    }

    pub fn insert(&mut self, glyph: char, kind: TileKind) {
        self.glyphs.insert(glyph, kind);
    }

    pub fn kind(&self, glyph: char) -> Option<TileKind> {
        self.glyphs.get(&glyph).copied()
    }

    /// Собирает legend из строковой формы level file (`{"#": "Wall", ...}`)
    pub fn from_names<'a, I>(entries: I) -> Result<Self, LevelError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut legend = Self::new();
        for (glyph, name) in entries {
            let mut chars = glyph.chars();
            let (Some(ch), None) = (chars.next(), chars.next()) else {
                return Err(LevelError::InvalidGlyph(glyph.to_string()));
            };
            let kind = TileKind::from_name(name)
                .ok_or_else(|| LevelError::UnknownTileKind(name.to_string()))?;
            legend.insert(ch, kind);
        }
        Ok(legend)
    }
}
