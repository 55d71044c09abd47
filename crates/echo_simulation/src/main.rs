//! Headless симуляция ECHO
//!
//! Демо-лабиринт: охотник патрулирует, цель идёт от Start к Exit, на полпути
//! срывается на спринт и пускает pulse. Печатает события охотника.

use std::sync::Arc;
use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use echo_simulation::navigation::find_path;
use echo_simulation::{
    create_headless_app, hunter_bundle, DeterministicRng, HeadlessPhysicsPlugin, HunterBrain, HunterEvent, Legend,
    LevelGrid, LevelResource, LineOfSightOracle, PulseEmitted, SimulationPlugin, TargetSense, TileKind,
};
use echo_simulation::ai::Gait;

const DEMO_MAZE: [&str; 9] = [
    "###########",
    "#S....#...#",
    "#.##.##.#.#",
    "#.#...E.#.#",
    "#.#.###.#.#",
    "#...#.....#",
    "###.#.###.#",
    "#.....#..X#",
    "###########",
];

const TICKS: u32 = 60 * 40;
const SPRINT_FROM_TICK: u32 = 60 * 15;
const PULSE_AT_TICK: u32 = 60 * 20;

/// Цель идёт по заранее посчитанному маршруту
#[derive(Component)]
struct ScriptedWalk {
    waypoints: Vec<Vec3>,
    index: usize,
}

#[derive(Resource, Default)]
struct TickCounter(u32);

fn main() {
    let seed = 42;
    println!("Starting ECHO headless simulation (seed: {})", seed);

    let grid = match LevelGrid::from_rows(&DEMO_MAZE, &Legend::standard(), 3.0) {
        Ok(grid) => Arc::new(grid.with_level_id("demo")),
        Err(err) => {
            eprintln!("Demo maze is invalid: {}", err);
            return;
        }
    };

    let mut app = create_headless_app(seed);
    app.add_plugins((SimulationPlugin, HeadlessPhysicsPlugin))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(1.0 / 60.0)))
        .insert_resource(LevelResource(grid.clone()))
        .insert_resource(LineOfSightOracle::from_grid(grid.clone()))
        .init_resource::<TickCounter>()
        .add_systems(FixedPreUpdate, script_target)
        .add_systems(Update, print_hunter_events);

    let start = grid.positions_of(TileKind::Start, 0.0).first().copied().unwrap_or_default();
    let exit = grid.positions_of(TileKind::Exit, 0.0).first().copied().unwrap_or_default();
    let spawn = grid.positions_of(TileKind::Entity, 0.0).first().copied().unwrap_or_default();

    let target = app
        .world_mut()
        .spawn((
            Transform::from_translation(start),
            TargetSense { gait: Gait::Walking, panting: false },
            ScriptedWalk { waypoints: find_path(start, exit, &grid), index: 0 },
        ))
        .id();

    let hunter_seed = app.world_mut().resource_mut::<DeterministicRng>().next_agent_seed();
    let hunter = app.world_mut().spawn(hunter_bundle(spawn, Some(target), hunter_seed)).id();
    println!("Hunter {:?} spawned at {:?} (seed {})", hunter, spawn, hunter_seed);

    for tick in 0..TICKS {
        app.update();

        if tick % 600 == 0 {
            let mut brains = app.world_mut().query::<(&HunterBrain, &Transform)>();
            for (brain, transform) in brains.iter(app.world()) {
                println!(
                    "Tick {}: hunter {} at ({:.1}, {:.1})",
                    tick,
                    brain.state(),
                    transform.translation.x,
                    transform.translation.z
                );
            }
        }
    }

    println!("Simulation complete!");
}

/// Двигает цель по маршруту; спринт и pulse по расписанию
fn script_target(
    mut targets: Query<(&mut Transform, &mut TargetSense, &mut ScriptedWalk)>,
    mut counter: ResMut<TickCounter>,
    mut pulses: EventWriter<PulseEmitted>,
    time: Res<Time<Fixed>>,
) {
    counter.0 += 1;
    let dt = time.delta_secs();

    for (mut transform, mut sense, mut walk) in targets.iter_mut() {
        if counter.0 == SPRINT_FROM_TICK {
            sense.gait = Gait::Sprinting;
            sense.panting = true;
        }
        if counter.0 == PULSE_AT_TICK {
            pulses.write(PulseEmitted { origin: transform.translation });
        }

        let Some(waypoint) = walk.waypoints.get(walk.index).copied() else {
            sense.gait = Gait::Still;
            continue;
        };
        let speed = if sense.gait == Gait::Sprinting { 4.0 } else { 1.5 };
        let to_waypoint = waypoint - transform.translation;
        if to_waypoint.length() <= speed * dt {
            transform.translation = waypoint;
            walk.index += 1;
        } else {
            transform.translation += to_waypoint.normalize() * speed * dt;
        }
    }
}

fn print_hunter_events(mut events: EventReader<HunterEvent>) {
    for event in events.read() {
        println!("[{:?}] {}", event.hunter(), event.tag());
    }
}
