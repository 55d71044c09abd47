//! ECS components охотника (обёртки над чистым brain/steering).

use bevy::prelude::*;

use crate::ai::components::fsm::NavFeedback;
use crate::navigation::SeededRandom;

/// Marker охотника + кого он преследует
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Hunter {
    /// Entity с `TargetSense` + `Transform` (обычно игрок)
    pub target: Option<Entity>,
}

/// Seeded RNG агента для patrol/search точек
#[derive(Component, Debug, Clone)]
pub struct HunterRng(pub SeededRandom);

/// Решение brain на этот tick: куда и как идти
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Reflect)]
#[reflect(Component)]
pub struct HunterIntent {
    pub goal: Option<Vec3>,
    pub speed: f32,
    pub move_directly: bool,
}

/// Статус steering с прошлого tick'а (вход brain на следующем)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct NavigationFeedback(pub NavFeedback);

/// Stimulus, собранный perception системой на этот tick
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct PerceivedStimulus(pub Option<crate::ai::Stimulus>);
