//! AI Events — входящие сенсорные события и исходящий event sink охотника
//!
//! PulseEmitted → hunter_perception (stimulus)
//! HunterEvent ← hunter_decision / hunter_navigation (звук, телеметрия)

use bevy::prelude::*;

use crate::ai::HunterState;

/// Pulse-скан в мире (например, сонар игрока). Слышен охотникам в `pulse_range`.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PulseEmitted {
    pub origin: Vec3,
}

/// События охотника для внешних систем (audio, анимация, телеметрия)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum HunterEvent {
    /// Смена поведенческого состояния
    StateChanged {
        hunter: Entity,
        from: HunterState,
        to: HunterState,
    },

    /// Вход в Chase — звук охоты
    HuntStarted { hunter: Entity },

    /// Steering дошёл до goal
    PathComplete { hunter: Entity },

    /// Steering застрял, маршрут сброшен
    PathStuck { hunter: Entity },

    /// Маршрута до goal нет (или он кончился далеко от goal)
    PathUnreachable { hunter: Entity },
}

impl HunterEvent {
    pub fn hunter(&self) -> Entity {
        match *self {
            HunterEvent::StateChanged { hunter, .. }
            | HunterEvent::HuntStarted { hunter }
            | HunterEvent::PathComplete { hunter }
            | HunterEvent::PathStuck { hunter }
            | HunterEvent::PathUnreachable { hunter } => hunter,
        }
    }

    /// Строковый tag (формат подписчиков audio/telemetry)
    pub fn tag(&self) -> String {
        match self {
            HunterEvent::StateChanged { from, to, .. } => format!("StateChange:{}->{}", from, to),
            HunterEvent::HuntStarted { .. } => "playSound:hunt".to_string(),
            HunterEvent::PathComplete { .. } => "PathComplete".to_string(),
            HunterEvent::PathStuck { .. } => "PathStuck".to_string(),
            HunterEvent::PathUnreachable { .. } => "PathUnreachable".to_string(),
        }
    }

    pub(crate) fn from_brain(hunter: Entity, event: crate::ai::BrainEvent) -> Self {
        match event {
            crate::ai::BrainEvent::StateChanged { from, to } => HunterEvent::StateChanged { hunter, from, to },
            crate::ai::BrainEvent::HuntStarted => HunterEvent::HuntStarted { hunter },
        }
    }

    pub(crate) fn from_nav_status(hunter: Entity, status: crate::movement::NavStatus) -> Option<Self> {
        use crate::movement::NavStatus;
        match status {
            NavStatus::Complete => Some(HunterEvent::PathComplete { hunter }),
            NavStatus::Stuck => Some(HunterEvent::PathStuck { hunter }),
            NavStatus::Unreachable => Some(HunterEvent::PathUnreachable { hunter }),
            NavStatus::Idle | NavStatus::Moving => None,
        }
    }
}
