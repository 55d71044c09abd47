//! PhysicsBody + интеграция velocity для headless режима.

use bevy::prelude::*;

/// Скорость, запрошенная симуляцией (m/s). Применяет её физика хоста.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PhysicsBody {
    pub velocity: Vec3,
}

/// Система интеграции velocity → Transform (headless режим)
///
/// Работает в FixedUpdate после hunter_navigation. Без коллизий: стены
/// сдерживает только маршрут.
pub fn integrate_velocity(mut query: Query<(&PhysicsBody, &mut Transform)>, time: Res<Time<Fixed>>) {
    let delta = time.delta_secs();

    for (body, mut transform) in query.iter_mut() {
        if body.velocity != Vec3::ZERO {
            transform.translation += body.velocity * delta;
        }
    }
}

/// Подключает integrate_velocity (когда хоста с физикой нет)
pub struct HeadlessPhysicsPlugin;

impl Plugin for HeadlessPhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(FixedUpdate, integrate_velocity.after(crate::ai::hunter_navigation));
    }
}
