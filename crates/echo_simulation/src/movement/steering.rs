//! Steering unit: goal → route → velocity, с инерцией и stuck detection.
//!
//! Один `Steering` на агента. Время передаётся явно через `dt` (таймер с момента
//! последнего расчёта маршрута), поэтому throttling перерасчёта детерминирован.
//! Позицию не трогает: результат — velocity + `NavStatus`, физика применяет сама.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::level::LevelGrid;
use crate::navigation::find_path;

/// Цель "та же самая" для arrival latch
const SAME_TARGET_TOLERANCE: f32 = 0.01;

/// Статус навигации за последний update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect, Serialize, Deserialize)]
pub enum NavStatus {
    #[default]
    Idle,
    Moving,
    Complete,
    Stuck,
    Unreachable,
}

impl NavStatus {
    /// Цель отработана (успешно или нет) — владельцу нужна новая
    pub fn ends_goal(self) -> bool {
        matches!(self, NavStatus::Complete | NavStatus::Stuck | NavStatus::Unreachable)
    }

    pub fn is_failure(self) -> bool {
        matches!(self, NavStatus::Stuck | NavStatus::Unreachable)
    }
}

/// Пороги steering (world units / секунды)
#[derive(Component, Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct SteeringConfig {
    /// Ближе этого к цели — прибыли, маршрут не нужен
    pub arrival_distance: f32,
    /// Радиус "footprint" агента: waypoint считается пройденным
    pub waypoint_radius: f32,
    /// Маршрут кончился, а цель дальше этого — Unreachable
    pub unreachable_slack: f32,
    /// Цель сместилась больше чем на это — кандидат на перерасчёт
    pub repath_distance: f32,
    /// Минимальный интервал между перерасчётами (секунды)
    pub repath_interval: f32,
    /// Скорость поворота velocity к желаемой (lerp rate)
    pub turn_rate: f32,
    /// Скорость торможения (lerp rate к нулю)
    pub brake_rate: f32,
    /// Период stuck-проверки (секунды)
    pub stuck_interval: f32,
    /// Смещение за период меньше этого — застряли
    pub stuck_displacement: f32,
}

impl Default for SteeringConfig {
    fn default() -> Self {
        Self {
            arrival_distance: 1.0,
            waypoint_radius: 1.0,
            unreachable_slack: 2.0,
            repath_distance: 3.0,
            repath_interval: 1.0,
            turn_rate: 5.0,
            brake_rate: 5.0,
            stuck_interval: 0.5,
            stuck_displacement: 0.1,
        }
    }
}

/// Результат одного update
#[derive(Debug, Clone, PartialEq)]
pub struct SteeringOutput<'a> {
    pub velocity: Vec3,
    pub status: NavStatus,
    pub route: &'a [Vec3],
    pub follow_index: usize,
}

/// Навигационное состояние агента (маршрут, инерция, stuck таймер)
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct Steering {
    route: Vec<Vec3>,
    follow_index: usize,
    /// Секунд с последнего расчёта маршрута (`None` — ещё не считали)
    since_path: Option<f32>,
    last_path_target: Option<Vec3>,
    velocity: Vec3,
    stuck_timer: f32,
    last_position: Option<Vec3>,
    /// Цель, для которой уже отдали Complete
    arrived_at: Option<Vec3>,
    status: NavStatus,
}

impl Steering {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(&self) -> &[Vec3] {
        &self.route
    }

    pub fn follow_index(&self) -> usize {
        self.follow_index
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn status(&self) -> NavStatus {
        self.status
    }

    /// Сбросить маршрут и latch (например, после телепорта агента)
    pub fn reset(&mut self) {
        self.clear_route();
        self.arrived_at = None;
        self.last_position = None;
        self.stuck_timer = 0.0;
        self.velocity = Vec3::ZERO;
        self.status = NavStatus::Idle;
    }

    /// Один tick steering.
    ///
    /// - `move_directly` + target: прямой рывок без маршрута и stuck-проверки
    /// - ближе `arrival_distance`: Complete, плавное торможение
    /// - иначе маршрут через `find_path` (с throttling) и следование по waypoint'ам
    pub fn update(
        &mut self,
        dt: f32,
        current: Vec3,
        target: Option<Vec3>,
        speed: f32,
        move_directly: bool,
        grid: &LevelGrid,
        config: &SteeringConfig,
    ) -> SteeringOutput<'_> {
        let dt = dt.max(0.0);
        if let Some(elapsed) = self.since_path.as_mut() {
            *elapsed += dt;
        }
        if self.last_position.is_none() {
            self.last_position = Some(current);
        }

        // 1. Direct mode (lunge)
        if let (true, Some(target)) = (move_directly, target) {
            self.velocity = planar(target - current).normalize_or_zero() * speed;
            self.clear_route();
            self.arrived_at = None;
            self.reset_stuck_sample(current);
            return self.finish(NavStatus::Moving);
        }

        let Some(target) = target else {
            // Цель отозвана — старый маршрут больше не нужен
            self.clear_route();
            self.arrived_at = None;
            self.reset_stuck_sample(current);
            self.brake(dt, config);
            return self.finish(NavStatus::Idle);
        };

        if self
            .arrived_at
            .is_some_and(|latched| latched.distance(target) > SAME_TARGET_TOLERANCE)
        {
            self.arrived_at = None;
        }

        // 2. Arrival shortcut / latch / (пере)расчёт маршрута
        let mut status = NavStatus::Idle;
        if planar_distance(current, target) < config.arrival_distance || self.arrived_at.is_some() {
            self.clear_route();
            self.arrived_at = Some(target);
            self.reset_stuck_sample(current);
            self.brake(dt, config);
            return self.finish(NavStatus::Complete);
        }

        if self.should_repath(target, config) {
            let route = find_path(current, target, grid);
            self.since_path = Some(0.0);
            self.last_path_target = Some(target);
            if route.is_empty() {
                crate::log_info(&format!(
                    "Steering: no route from {:?} to {:?}, unreachable",
                    current, target
                ));
                self.clear_route();
                status = NavStatus::Unreachable;
            } else {
                self.route = route;
                self.follow_index = 0;
            }
        }

        if self.route.is_empty() {
            self.reset_stuck_sample(current);
            self.brake(dt, config);
            return self.finish(status);
        }

        // 3. Stuck detection (только пока маршрут активен)
        self.stuck_timer += dt;
        if self.stuck_timer > config.stuck_interval {
            let last = self.last_position.unwrap_or(current);
            let moved = planar_distance(current, last);
            self.last_position = Some(current);
            self.stuck_timer = 0.0;
            if moved < config.stuck_displacement {
                crate::log_info(&format!(
                    "Steering: stuck at {:?} (moved {:.3} in {:.2}s), dropping route",
                    current, moved, config.stuck_interval
                ));
                self.clear_route();
                self.brake(dt, config);
                return self.finish(NavStatus::Stuck);
            }
        }

        // 4. Следование по waypoint'ам
        while let Some(waypoint) = self.route.get(self.follow_index).copied() {
            let to_waypoint = planar(waypoint - current);
            if to_waypoint.length() >= config.waypoint_radius {
                let desired = to_waypoint.normalize_or_zero() * speed;
                self.velocity = self.velocity.lerp(desired, factor(dt, config.turn_rate));
                return self.finish(NavStatus::Moving);
            }
            self.follow_index += 1;
        }

        // Маршрут исчерпан
        self.clear_route();
        self.brake(dt, config);
        if planar_distance(current, target) > config.unreachable_slack {
            crate::log_info(&format!(
                "Steering: route ended {:.2} short of {:?}, unreachable",
                planar_distance(current, target),
                target
            ));
            self.finish(NavStatus::Unreachable)
        } else {
            self.arrived_at = Some(target);
            self.finish(NavStatus::Complete)
        }
    }

    /// Пересчитать, если маршрута нет, или цель ушла далеко и прошло достаточно времени
    fn should_repath(&self, target: Vec3, config: &SteeringConfig) -> bool {
        if self.route.is_empty() {
            return true;
        }
        let target_moved = self
            .last_path_target
            .map_or(true, |last| planar_distance(last, target) > config.repath_distance);
        let interval_passed = self
            .since_path
            .map_or(true, |elapsed| elapsed >= config.repath_interval);
        target_moved && interval_passed
    }

    fn clear_route(&mut self) {
        self.route.clear();
        self.follow_index = 0;
    }

    fn reset_stuck_sample(&mut self, current: Vec3) {
        self.stuck_timer = 0.0;
        self.last_position = Some(current);
    }

    fn brake(&mut self, dt: f32, config: &SteeringConfig) {
        self.velocity = self.velocity.lerp(Vec3::ZERO, factor(dt, config.brake_rate));
    }

    fn finish(&mut self, status: NavStatus) -> SteeringOutput<'_> {
        self.status = status;
        SteeringOutput {
            velocity: self.velocity,
            status,
            route: &self.route,
            follow_index: self.follow_index,
        }
    }
}

fn planar(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

fn planar_distance(a: Vec3, b: Vec3) -> f32 {
    planar(a - b).length()
}

fn factor(dt: f32, rate: f32) -> f32 {
    (dt * rate).clamp(0.0, 1.0)
}
