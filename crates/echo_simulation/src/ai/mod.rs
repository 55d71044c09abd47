//! AI decision-making module
//!
//! Hunter FSM (Patrol/Investigate/Chase/Search) поверх stimulus модели.
//! Чистая логика в components (HunterBrain, assemble_stimulus), ECS системы —
//! тонкие адаптеры вокруг неё.

use bevy::prelude::*;

pub mod components;
pub mod events;
pub mod systems;

// Re-export основных типов
pub use components::*;
pub use events::*;
pub use systems::{hunter_decision, hunter_navigation, hunter_perception, sample_goal};

/// AI Plugin
///
/// Регистрирует AI системы в FixedUpdate для детерминизма.
/// Порядок выполнения:
/// 1. hunter_perception — PulseEmitted + цель → PerceivedStimulus
/// 2. hunter_decision — HunterBrain tick → HunterIntent (+ goal sampling)
/// 3. hunter_navigation — Steering tick → PhysicsBody.velocity + NavigationFeedback
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PulseEmitted>()
            .add_event::<HunterEvent>()
            .add_systems(
                FixedUpdate,
                (hunter_perception, hunter_decision, hunter_navigation).chain(), // Последовательное выполнение для детерминизма
            );
    }
}
