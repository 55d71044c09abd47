//! Navigation: HunterIntent → Steering → PhysicsBody.velocity + feedback.

use bevy::prelude::*;

use crate::ai::{HunterEvent, HunterIntent, NavFeedback, NavigationFeedback};
use crate::movement::{Steering, SteeringConfig};
use crate::physics::PhysicsBody;
use crate::LevelResource;

/// Система: steering tick для каждого охотника
///
/// Позицию не трогает — пишет velocity в `PhysicsBody` (её применяет физика).
/// Path* события шлём только на смене статуса, иначе latch `Complete` спамит.
pub fn hunter_navigation(
    mut hunters: Query<(
        Entity,
        &Transform,
        &HunterIntent,
        &SteeringConfig,
        &mut Steering,
        &mut NavigationFeedback,
        &mut PhysicsBody,
    )>,
    level: Option<Res<LevelResource>>,
    time: Res<Time<Fixed>>,
    mut hunter_events: EventWriter<HunterEvent>,
) {
    let Some(level) = level else {
        return;
    };
    let dt = time.delta_secs();

    for (entity, transform, intent, config, mut steering, mut feedback, mut body) in hunters.iter_mut() {
        let previous = steering.status();
        let output = steering.update(
            dt,
            transform.translation,
            intent.goal,
            intent.speed,
            intent.move_directly,
            &level.0,
            config,
        );
        let (status, velocity) = (output.status, output.velocity);

        if status != previous {
            if let Some(event) = HunterEvent::from_nav_status(entity, status) {
                hunter_events.write(event);
            }
        }

        feedback.0 = NavFeedback::new(status, intent.goal);
        body.velocity = velocity;
    }
}
