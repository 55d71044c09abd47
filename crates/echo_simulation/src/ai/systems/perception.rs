//! Perception: мир → `PerceivedStimulus` (один на охотника за tick).

use bevy::prelude::*;

use crate::ai::{
    assemble_stimulus, AIConfig, Hunter, PerceivedStimulus, Pulse, PulseEmitted, TargetObservation, TargetSense,
};
use crate::navigation::ClearSight;
use crate::LineOfSightOracle;

/// Система: собирает stimulus для каждого охотника
///
/// Pulse'ы этого tick'а читаются один раз и раздаются всем охотникам.
/// Без `LineOfSightOracle` видимость считается чистой.
pub fn hunter_perception(
    mut hunters: Query<(&Transform, &Hunter, &AIConfig, &mut PerceivedStimulus)>,
    targets: Query<(&Transform, &TargetSense)>,
    mut pulses: EventReader<PulseEmitted>,
    oracle: Option<Res<LineOfSightOracle>>,
) {
    let pulses: Vec<Pulse> = pulses.read().map(|event| Pulse { origin: event.origin }).collect();
    let los = oracle.as_deref().map(|o| o.as_los()).unwrap_or(&ClearSight);

    for (transform, hunter, config, mut perceived) in hunters.iter_mut() {
        let observation = hunter
            .target
            .and_then(|entity| targets.get(entity).ok())
            .map(|(target_transform, sense)| TargetObservation::new(target_transform.translation, *sense));

        let stimulus = assemble_stimulus(transform.translation, observation.as_ref(), &pulses, config, los);
        if perceived.0 != stimulus {
            perceived.0 = stimulus;
        }
    }
}
