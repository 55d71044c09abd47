//! Tests for stimulus assembly.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use super::super::fsm::AIConfig;
    use super::super::stimulus::{assemble_stimulus, Gait, Pulse, Stimulus, TargetObservation};
    use crate::navigation::ClearSight;

    fn target(x: f32, gait: Gait, panting: bool) -> TargetObservation {
        TargetObservation {
            position: Vec3::new(x, 0.0, 0.0),
            gait,
            panting,
        }
    }

    #[test]
    fn test_nothing_perceived() {
        let config = AIConfig::default();
        assert_eq!(assemble_stimulus(Vec3::ZERO, None, &[], &config, &ClearSight), None);
        let far = target(30.0, Gait::Sprinting, true);
        assert_eq!(assemble_stimulus(Vec3::ZERO, Some(&far), &[], &config, &ClearSight), None);
    }

    #[test]
    fn test_pulse_wins_over_everything() {
        let config = AIConfig::default();
        let close = target(1.5, Gait::Sprinting, false);
        let pulses = [Pulse { origin: Vec3::new(0.0, 0.0, 15.0) }];
        assert_eq!(
            assemble_stimulus(Vec3::ZERO, Some(&close), &pulses, &config, &ClearSight),
            Some(Stimulus::Pulse(Vec3::new(0.0, 0.0, 15.0)))
        );
    }

    #[test]
    fn test_nearest_pulse_in_range() {
        let config = AIConfig::default();
        let pulses = [
            Pulse { origin: Vec3::new(25.0, 0.0, 0.0) },
            Pulse { origin: Vec3::new(0.0, 0.0, 12.0) },
            Pulse { origin: Vec3::new(-8.0, 0.0, 0.0) },
        ];
        assert_eq!(
            assemble_stimulus(Vec3::ZERO, None, &pulses, &config, &ClearSight),
            Some(Stimulus::Pulse(Vec3::new(-8.0, 0.0, 0.0)))
        );

        let out_of_range = [Pulse { origin: Vec3::new(25.0, 0.0, 0.0) }];
        assert_eq!(assemble_stimulus(Vec3::ZERO, None, &out_of_range, &config, &ClearSight), None);
    }

    #[test]
    fn test_loud_beats_proximity() {
        let config = AIConfig::default();
        let sprinting_close = target(1.5, Gait::Sprinting, false);
        assert_eq!(
            assemble_stimulus(Vec3::ZERO, Some(&sprinting_close), &[], &config, &ClearSight),
            Some(Stimulus::VibrationLoud(sprinting_close.position))
        );
    }

    #[test]
    fn test_proximity_beats_faint() {
        let config = AIConfig::default();
        let walking_close = target(1.5, Gait::Walking, false);
        assert_eq!(
            assemble_stimulus(Vec3::ZERO, Some(&walking_close), &[], &config, &ClearSight),
            Some(Stimulus::Proximity(walking_close.position))
        );
    }

    #[test]
    fn test_occluded_breath_falls_back_to_faint() {
        let config = AIConfig::default();
        let blocked = |_: Vec3, _: Vec3| false;
        let walking_close = target(1.5, Gait::Walking, false);
        assert_eq!(
            assemble_stimulus(Vec3::ZERO, Some(&walking_close), &[], &config, &blocked),
            Some(Stimulus::VibrationFaint(walking_close.position))
        );

        let still_close = target(1.5, Gait::Still, false);
        assert_eq!(assemble_stimulus(Vec3::ZERO, Some(&still_close), &[], &config, &blocked), None);

        let touching = target(0.5, Gait::Still, false);
        assert_eq!(
            assemble_stimulus(Vec3::ZERO, Some(&touching), &[], &config, &blocked),
            Some(Stimulus::Proximity(touching.position))
        );
    }

    #[test]
    fn test_vibration_radii() {
        let config = AIConfig::default();
        let walking = target(4.0, Gait::Walking, false);
        assert_eq!(
            assemble_stimulus(Vec3::ZERO, Some(&walking), &[], &config, &ClearSight),
            Some(Stimulus::VibrationFaint(walking.position))
        );
        let walking_far = target(6.0, Gait::Walking, false);
        assert_eq!(assemble_stimulus(Vec3::ZERO, Some(&walking_far), &[], &config, &ClearSight), None);
        let sprinting = target(9.0, Gait::Sprinting, false);
        assert_eq!(
            assemble_stimulus(Vec3::ZERO, Some(&sprinting), &[], &config, &ClearSight),
            Some(Stimulus::VibrationLoud(sprinting.position))
        );
    }

    #[test]
    fn test_panting_target_heard_further() {
        let config = AIConfig::default();
        let panting = target(5.5, Gait::Still, true);
        assert_eq!(
            assemble_stimulus(Vec3::ZERO, Some(&panting), &[], &config, &ClearSight),
            Some(Stimulus::Proximity(panting.position))
        );
    }

    #[test]
    fn test_priority_order() {
        let p = Vec3::ONE;
        let mut all = [
            Stimulus::VibrationFaint(p),
            Stimulus::Proximity(p),
            Stimulus::Pulse(p),
            Stimulus::VibrationLoud(p),
        ];
        all.sort_by_key(|s| s.priority());
        assert_eq!(
            all,
            [
                Stimulus::Pulse(p),
                Stimulus::VibrationLoud(p),
                Stimulus::Proximity(p),
                Stimulus::VibrationFaint(p),
            ]
        );
        assert!(!Stimulus::VibrationFaint(p).triggers_chase());
        assert!(Stimulus::Proximity(p).triggers_chase());
    }
}
