//! ECHO Simulation Core
//!
//! Enemy AI + навигация для grid-based stealth-horror (Bevy 0.16 ECS, headless).
//!
//! Pipeline одного tick'а (FixedUpdate):
//! - perception: pulse / вибрация / дыхание → один Stimulus
//! - decision: HunterBrain FSM → goal + speed (+ lunge)
//! - navigation: Steering по A* маршруту → velocity + NavStatus
//! - physics (хост или HeadlessPhysicsPlugin) применяет velocity

use std::sync::Arc;

use bevy::prelude::*;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod ai;
pub mod level;
pub mod logger;
pub mod movement;
pub mod navigation;
pub mod physics;

// Re-export базовых типов для удобства
pub use ai::{
    AIConfig, AIPlugin, BrainEvent, GoalRequest, Hunter, HunterBrain, HunterEvent, HunterIntent, HunterRng,
    HunterState, NavigationFeedback, PerceivedStimulus, PulseEmitted, Stimulus, TargetSense,
};
pub use level::{Legend, LevelError, LevelGrid, TileKind};
pub use logger::{
    init_logger, log, log_error, log_info, log_level, log_warning, log_with_level, set_log_level, set_logger,
    set_logger_if_needed, LogLevel, LogPrinter,
};
pub use movement::{NavStatus, Steering, SteeringConfig};
pub use navigation::{find_path, random_walkable_tile, GridLineOfSight, LineOfSight, SeededRandom};
pub use physics::{HeadlessPhysicsPlugin, PhysicsBody};

/// Главный plugin симуляции (объединяет все подсистемы)
///
/// Уровень (`LevelResource`) и LOS (`LineOfSightOracle`) вставляет хост.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            .add_plugins(AIPlugin);

        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }
    }
}

/// Детерминистичный RNG resource (seeded)
///
/// Мировой seed: из него раздаются seed'ы для `SeededRandom` охотников.
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Следующий seed агента (порядок спавна определяет последовательность)
    pub fn next_agent_seed(&mut self) -> u64 {
        self.rng.next_u64()
    }
}

/// Текущий уровень (read-only, общий для всех охотников)
#[derive(Resource, Debug, Clone)]
pub struct LevelResource(pub Arc<LevelGrid>);

impl LevelResource {
    pub fn new(grid: LevelGrid) -> Self {
        Self(Arc::new(grid))
    }
}

/// Line-of-sight predicate хоста (raycast рендера/физики)
#[derive(Resource, Clone)]
pub struct LineOfSightOracle(pub Arc<dyn LineOfSight>);

impl LineOfSightOracle {
    pub fn new(los: impl LineOfSight + 'static) -> Self {
        Self(Arc::new(los))
    }

    /// LOS по тайлам уровня
    pub fn from_grid(grid: Arc<LevelGrid>) -> Self {
        Self::new(GridLineOfSight::new(grid))
    }

    pub fn as_los(&self) -> &dyn LineOfSight {
        self.0.as_ref()
    }
}

/// Компоненты охотника (seed задаёт его patrol/search последовательность)
pub fn hunter_bundle(position: Vec3, target: Option<Entity>, seed: u64) -> impl Bundle {
    (
        Hunter { target },
        HunterBrain::new(),
        Steering::new(),
        SteeringConfig::default(),
        AIConfig::default(),
        HunterRng(SeededRandom::new(seed)),
        HunterIntent::default(),
        NavigationFeedback::default(),
        PerceivedStimulus::default(),
        PhysicsBody::default(),
        Transform::from_translation(position),
    )
}

/// Спавнит охотника с дефолтными конфигами
pub fn spawn_hunter(commands: &mut Commands, position: Vec3, target: Option<Entity>, seed: u64) -> Entity {
    let entity = commands.spawn(hunter_bundle(position, target, seed)).id();
    crate::log_info(&format!(
        "Spawned hunter {:?} at {:?} (seed {}, target {:?})",
        entity, position, seed, target
    ));
    entity
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(60.0)); // 60Hz FixedUpdate

    app
}

/// Snapshot мира для сравнения детерминизма
///
/// Компоненты типа `T` в порядке Entity index, сериализованные через Debug.
pub fn world_snapshot<T: Component + std::fmt::Debug>(world: &mut World) -> Vec<u8> {
    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();
    entities.sort_by_key(|(entity, _)| entity.index());

    let mut snapshot = Vec::new();
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }
    snapshot
}
