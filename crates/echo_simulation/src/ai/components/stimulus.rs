//! Stimulus model: сырые факты мира → максимум один stimulus за tick.
//!
//! Каналы восприятия:
//! - Pulse (дальний скан цели, источник = точка скана)
//! - Vibration (шаги цели: ходьба — faint, спринт — loud)
//! - Proximity / "breath" (дыхание цели вблизи, с occlusion по LOS)
//!
//! Приоритет: Pulse > VibrationLoud > Proximity > VibrationFaint.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::ai::AIConfig;
use crate::navigation::LineOfSight;

/// Один приоритетный сенсорный сигнал (позиция = воспринятый источник)
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub enum Stimulus {
    Pulse(Vec3),
    VibrationLoud(Vec3),
    Proximity(Vec3),
    VibrationFaint(Vec3),
}

impl Stimulus {
    pub fn position(&self) -> Vec3 {
        match *self {
            Stimulus::Pulse(p)
            | Stimulus::VibrationLoud(p)
            | Stimulus::Proximity(p)
            | Stimulus::VibrationFaint(p) => p,
        }
    }

    /// Меньше = важнее
    pub fn priority(&self) -> u8 {
        match self {
            Stimulus::Pulse(_) => 0,
            Stimulus::VibrationLoud(_) => 1,
            Stimulus::Proximity(_) => 2,
            Stimulus::VibrationFaint(_) => 3,
        }
    }

    /// Немедленная погоня (всё кроме faint)
    pub fn triggers_chase(&self) -> bool {
        !matches!(self, Stimulus::VibrationFaint(_))
    }
}

/// Как цель двигается (источник вибрации)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect, Serialize, Deserialize)]
pub enum Gait {
    #[default]
    Still,
    Walking,
    Sprinting,
}

/// Component на цели: то, что охотник может почувствовать
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct TargetSense {
    pub gait: Gait,
    /// Усталость — дыхание слышно дальше
    pub panting: bool,
}

/// Снимок цели на этот tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetObservation {
    pub position: Vec3,
    pub gait: Gait,
    pub panting: bool,
}

impl TargetObservation {
    pub fn new(position: Vec3, sense: TargetSense) -> Self {
        Self {
            position,
            gait: sense.gait,
            panting: sense.panting,
        }
    }
}

/// Pulse-скан, испущенный в мире (например, сонар игрока)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pulse {
    pub origin: Vec3,
}

/// Результат проверки "слышу/вижу цель" для одного агента
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetReading {
    pub distance: f32,
    /// Эффективный радиус дыхания (×multiplier при panting)
    pub breath_radius: f32,
    /// LOS проверяется только внутри breath radius
    pub line_of_sight: Option<bool>,
    pub walking_heard: bool,
    pub sprinting_heard: bool,
    pub breath_detected: bool,
}

impl TargetReading {
    pub fn read(
        agent: Vec3,
        target: &TargetObservation,
        config: &AIConfig,
        los: &dyn LineOfSight,
    ) -> Self {
        let distance = agent.distance(target.position);
        let breath_radius = config.effective_breath_radius(target.panting);

        let line_of_sight = (distance < breath_radius).then(|| los.is_clear(agent, target.position));
        // Ближе contact_distance — физический контакт, occlusion не важен
        let breath_detected = line_of_sight
            .is_some_and(|clear| clear || distance < config.contact_distance);

        Self {
            distance,
            breath_radius,
            line_of_sight,
            walking_heard: target.gait == Gait::Walking && distance < config.tremor_radius_walk,
            sprinting_heard: target.gait == Gait::Sprinting && distance < config.tremor_radius_sprint,
            breath_detected,
        }
    }

    /// Цель всё ещё обнаружима любым каналом
    pub fn detected(&self) -> bool {
        self.walking_heard || self.sprinting_heard || self.breath_detected
    }
}

/// Собирает один stimulus за tick по фиксированному приоритету.
pub fn assemble_stimulus(
    agent: Vec3,
    target: Option<&TargetObservation>,
    pulses: &[Pulse],
    config: &AIConfig,
    los: &dyn LineOfSight,
) -> Option<Stimulus> {
    let nearest_pulse = pulses
        .iter()
        .map(|pulse| (agent.distance(pulse.origin), pulse.origin))
        .filter(|(distance, _)| *distance <= config.pulse_range)
        .min_by(|a, b| a.0.total_cmp(&b.0));
    if let Some((_, origin)) = nearest_pulse {
        return Some(Stimulus::Pulse(origin));
    }

    let target = target?;
    let reading = TargetReading::read(agent, target, config, los);

    if reading.sprinting_heard {
        Some(Stimulus::VibrationLoud(target.position))
    } else if reading.breath_detected {
        Some(Stimulus::Proximity(target.position))
    } else if reading.walking_heard {
        Some(Stimulus::VibrationFaint(target.position))
    } else {
        None
    }
}
