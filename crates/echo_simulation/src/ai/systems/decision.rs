//! Decision: stimulus + feedback навигации → HunterBrain → HunterIntent.

use bevy::prelude::*;

use crate::ai::{
    AIConfig, BrainInput, GoalRequest, Hunter, HunterBrain, HunterEvent, HunterIntent, HunterRng,
    NavigationFeedback, PerceivedStimulus, TargetObservation, TargetSense,
};
use crate::level::LevelGrid;
use crate::navigation::{random_walkable_tile, ClearSight, SampleArea, SeededRandom};
use crate::{LevelResource, LineOfSightOracle};

/// Система: один tick FSM для каждого охотника
///
/// Если brain просит goal (`GoalRequest`), выбираем случайную проходимую клетку
/// через RNG охотника и возвращаем её через `set_external_goal` в тот же tick.
pub fn hunter_decision(
    mut hunters: Query<(
        Entity,
        &Transform,
        &Hunter,
        &AIConfig,
        &PerceivedStimulus,
        &NavigationFeedback,
        &mut HunterBrain,
        &mut HunterRng,
        &mut HunterIntent,
    )>,
    targets: Query<(&Transform, &TargetSense)>,
    level: Option<Res<LevelResource>>,
    oracle: Option<Res<LineOfSightOracle>>,
    time: Res<Time<Fixed>>,
    mut hunter_events: EventWriter<HunterEvent>,
) {
    let dt = time.delta_secs();
    let los = oracle.as_deref().map(|o| o.as_los()).unwrap_or(&ClearSight);

    for (entity, transform, hunter, config, perceived, feedback, mut brain, mut rng, mut intent) in
        hunters.iter_mut()
    {
        let target = hunter
            .target
            .and_then(|e| targets.get(e).ok())
            .map(|(target_transform, sense)| TargetObservation::new(target_transform.translation, *sense));

        let input = BrainInput {
            dt,
            agent_position: transform.translation,
            target,
            stimulus: perceived.0,
            nav: feedback.0,
            line_of_sight: los,
        };
        let output = brain.update(&input, config);

        for event in output.events.iter().copied() {
            hunter_events.write(HunterEvent::from_brain(entity, event));
        }

        if let (Some(request), Some(level)) = (output.goal_request, level.as_deref()) {
            match sample_goal(&level.0, &mut rng.0, request) {
                Some(goal) => brain.set_external_goal(goal),
                None => crate::log_warning(&format!(
                    "AI: {:?} no walkable tile for {:?}, staying idle",
                    entity, request
                )),
            }
        }

        let next = HunterIntent {
            goal: brain.goal(),
            speed: output.speed,
            move_directly: output.move_directly,
        };
        if *intent != next {
            *intent = next;
        }
    }
}

/// Случайная точка по запросу brain; `Near` без кандидатов откатывается на весь уровень
pub fn sample_goal(grid: &LevelGrid, rng: &mut SeededRandom, request: GoalRequest) -> Option<Vec3> {
    match request {
        GoalRequest::Anywhere => random_walkable_tile(grid, rng, None),
        GoalRequest::Near { center, radius } => {
            random_walkable_tile(grid, rng, Some(SampleArea::new(center, radius)))
                .or_else(|| random_walkable_tile(grid, rng, None))
        }
    }
}
