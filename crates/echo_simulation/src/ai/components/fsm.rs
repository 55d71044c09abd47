//! Hunter FSM (Patrol / Investigate / Chase / Search), config и I/O одного tick'а.
//!
//! `HunterBrain::update` — чистая функция от (state, input): stimulus + позиции +
//! feedback навигации → новое состояние, goal, speed, события. Выбор случайных
//! точек (нужна геометрия + RNG) остаётся снаружи: brain только просит goal
//! через `GoalRequest`, владелец отвечает `set_external_goal`.

use std::fmt;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::ai::components::stimulus::{Stimulus, TargetObservation, TargetReading};
use crate::movement::NavStatus;
use crate::navigation::LineOfSight;

/// Feedback навигации относится к goal, если совпадает с ним в этих пределах
const GOAL_MATCH_TOLERANCE: f32 = 0.01;

/// Поведенческое состояние охотника (Patrol — стартовое)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect, Serialize, Deserialize)]
pub enum HunterState {
    #[default]
    Patrol,
    Investigate,
    Chase,
    Search,
}

impl HunterState {
    pub fn name(self) -> &'static str {
        match self {
            HunterState::Patrol => "patrol",
            HunterState::Investigate => "investigate",
            HunterState::Chase => "chase",
            HunterState::Search => "search",
        }
    }

    /// Состояния, где goal выбирается случайно (не из погони)
    pub fn wanders(self) -> bool {
        !matches!(self, HunterState::Chase)
    }
}

impl fmt::Display for HunterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Параметры охотника
#[derive(Component, Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct AIConfig {
    pub patrol_speed: f32,
    pub investigate_speed: f32,
    pub hunt_speed: f32,
    /// Investigate дольше этого без результата → Chase (anti-kiting)
    pub frustration_time: f32,
    /// Минимум секунд в Chase до возможного понижения в Search
    pub commitment_time: f32,
    /// Цель не обнаруживается дольше этого → Search
    pub lost_timeout: f32,
    pub search_duration: f32,
    /// Радиус вибрации от ходьбы (faint)
    pub tremor_radius_walk: f32,
    /// Радиус вибрации от спринта (loud)
    pub tremor_radius_sprint: f32,
    pub breath_radius: f32,
    pub panting_breath_multiplier: f32,
    pub pulse_range: f32,
    /// Ближе — контакт, дыхание слышно сквозь occlusion. Tunable, не производная величина.
    pub contact_distance: f32,
    /// Ближе этого lunge не нужен (уже вплотную)
    pub lunge_min_distance: f32,
    /// Радиус случайных точек в Investigate/Search
    pub wander_radius: f32,
}

impl Default for AIConfig {
    fn default() -> Self {
        Self {
            patrol_speed: 2.0,
            investigate_speed: 3.0,
            hunt_speed: 5.0,
            frustration_time: 5.0,
            commitment_time: 2.0,
            lost_timeout: 2.0,
            search_duration: 10.0,
            tremor_radius_walk: 5.0,
            tremor_radius_sprint: 10.0,
            breath_radius: 2.0,
            panting_breath_multiplier: 3.0,
            pulse_range: 20.0,
            contact_distance: 1.0,
            lunge_min_distance: 0.5,
            wander_radius: 9.0,
        }
    }
}

impl AIConfig {
    pub fn speed_for(&self, state: HunterState) -> f32 {
        match state {
            HunterState::Patrol => self.patrol_speed,
            HunterState::Investigate | HunterState::Search => self.investigate_speed,
            HunterState::Chase => self.hunt_speed,
        }
    }

    pub fn effective_breath_radius(&self, panting: bool) -> f32 {
        if panting {
            self.breath_radius * self.panting_breath_multiplier
        } else {
            self.breath_radius
        }
    }
}

/// Что навигация сделала с goal на прошлом tick'е
#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect)]
pub struct NavFeedback {
    pub status: NavStatus,
    /// Goal, к которому относится status
    pub goal: Option<Vec3>,
}

impl NavFeedback {
    pub fn new(status: NavStatus, goal: Option<Vec3>) -> Self {
        Self { status, goal }
    }
}

/// Вход одного tick'а
pub struct BrainInput<'a> {
    pub dt: f32,
    pub agent_position: Vec3,
    pub target: Option<TargetObservation>,
    pub stimulus: Option<Stimulus>,
    pub nav: NavFeedback,
    pub line_of_sight: &'a dyn LineOfSight,
}

/// Просьба к владельцу выбрать случайную проходимую точку
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GoalRequest {
    /// Любая точка уровня (Patrol)
    Anywhere,
    /// Точка в радиусе (Investigate/Search)
    Near { center: Vec3, radius: f32 },
}

/// События для внешних систем (звук, телеметрия)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrainEvent {
    StateChanged { from: HunterState, to: HunterState },
    HuntStarted,
}

impl BrainEvent {
    /// Строковый tag для event sink
    pub fn tag(&self) -> String {
        match self {
            BrainEvent::StateChanged { from, to } => format!("StateChange:{}->{}", from, to),
            BrainEvent::HuntStarted => "playSound:hunt".to_string(),
        }
    }
}

/// Результат tick'а
#[derive(Debug, Clone, PartialEq)]
pub struct BrainOutput {
    pub state: HunterState,
    pub goal: Option<Vec3>,
    pub speed: f32,
    /// Lunge: идти напрямую, без маршрута
    pub move_directly: bool,
    pub goal_request: Option<GoalRequest>,
    pub events: Vec<BrainEvent>,
}

/// Таймеры FSM (секунды)
#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect)]
pub struct BrainTimers {
    /// Накопление в Investigate
    pub frustration: f32,
    /// Обратный отсчёт минимальной погони
    pub commitment: f32,
    /// Накопление "цель потеряна" в Chase
    pub lost: f32,
    /// Обратный отсчёт Search
    pub search: f32,
    /// Время в текущем состоянии
    pub in_state: f32,
}

/// Поведенческая FSM охотника
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct HunterBrain {
    state: HunterState,
    goal: Option<Vec3>,
    last_known_position: Option<Vec3>,
    timers: BrainTimers,
}

impl HunterBrain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> HunterState {
        self.state
    }

    pub fn goal(&self) -> Option<Vec3> {
        self.goal
    }

    pub fn last_known_position(&self) -> Option<Vec3> {
        self.last_known_position
    }

    pub fn timers(&self) -> &BrainTimers {
        &self.timers
    }

    /// Внешний goal (ответ на `GoalRequest` или принудительная точка).
    ///
    /// Заменяет текущий goal сразу. Держится, пока навигация не отчитается
    /// (Complete/Stuck/Unreachable) в Patrol/Investigate/Search, пока его не
    /// заменит stimulus-переход, или пока Chase не перехватит цель.
    pub fn set_external_goal(&mut self, goal: Vec3) {
        self.goal = Some(goal);
    }

    pub fn update(&mut self, input: &BrainInput, config: &AIConfig) -> BrainOutput {
        let dt = input.dt.max(0.0);
        let mut events = Vec::new();

        // 1. Feedback навигации: goal отработан → забываем, попросим новый
        if self.state.wanders() && input.nav.status.ends_goal() && self.feedback_matches(&input.nav) {
            self.goal = None;
        }

        // 2. Stimulus
        let mut next = self.state;
        let mut stimulus_goal = None;
        if let Some(stimulus) = input.stimulus {
            let source = stimulus.position();
            self.last_known_position = Some(source);
            if stimulus.triggers_chase() {
                next = HunterState::Chase;
                self.timers.commitment = config.commitment_time;
                stimulus_goal = Some(source);
            } else if self.state != HunterState::Chase {
                next = HunterState::Investigate;
                stimulus_goal = Some(source);
            }
        }

        // 3. Frustration (только если уже были в Investigate)
        if self.state == HunterState::Investigate {
            self.timers.frustration += dt;
            if self.timers.frustration > config.frustration_time {
                crate::log_info(&format!(
                    "HunterBrain: frustrated after {:.2}s of investigating, escalating to chase",
                    self.timers.frustration
                ));
                next = HunterState::Chase;
            }
        }

        // 4. Переход
        if next != self.state {
            self.transition(next, stimulus_goal, config, &mut events);
        } else if let Some(goal) = stimulus_goal {
            self.goal = Some(goal);
        }
        self.timers.in_state += dt;

        // 5. Логика состояния
        let reading = input
            .target
            .as_ref()
            .map(|target| TargetReading::read(input.agent_position, target, config, input.line_of_sight));

        match self.state {
            HunterState::Chase => self.chase(dt, input, reading.as_ref(), config, &mut events),
            HunterState::Search => {
                self.timers.search -= dt;
                if self.timers.search <= 0.0 {
                    self.transition(HunterState::Patrol, None, config, &mut events);
                    self.last_known_position = None;
                }
            }
            HunterState::Patrol | HunterState::Investigate => {}
        }

        let move_directly = self.state == HunterState::Chase
            && reading.is_some_and(|r| {
                r.distance < r.breath_radius
                    && (r.distance < config.contact_distance || r.line_of_sight == Some(true))
                    && r.distance > config.lunge_min_distance
            });

        let goal_request = match (self.goal, self.state) {
            (Some(_), _) | (None, HunterState::Chase) => None,
            (None, HunterState::Patrol) => Some(GoalRequest::Anywhere),
            (None, HunterState::Investigate | HunterState::Search) => Some(GoalRequest::Near {
                center: input.agent_position,
                radius: config.wander_radius,
            }),
        };

        BrainOutput {
            state: self.state,
            goal: self.goal,
            speed: config.speed_for(self.state),
            move_directly,
            goal_request,
            events,
        }
    }

    /// Chase: трекаем цель, пока её слышно/видно; иначе копим "lost"
    fn chase(
        &mut self,
        dt: f32,
        input: &BrainInput,
        reading: Option<&TargetReading>,
        config: &AIConfig,
        events: &mut Vec<BrainEvent>,
    ) {
        self.timers.commitment -= dt;

        let detected = input
            .target
            .as_ref()
            .zip(reading)
            .filter(|(_, reading)| reading.detected())
            .map(|(target, _)| target.position);

        if let Some(position) = detected {
            self.goal = Some(position);
            self.last_known_position = Some(position);
            self.timers.lost = 0.0;
            return;
        }

        self.timers.lost += dt;
        if self.timers.lost > config.lost_timeout && self.timers.commitment <= 0.0 {
            let search_goal = self
                .last_known_position
                .or(input.target.map(|t| t.position))
                .unwrap_or(input.agent_position);
            crate::log_info(&format!(
                "HunterBrain: target lost for {:.2}s, searching around {:?}",
                self.timers.lost, search_goal
            ));
            self.transition(HunterState::Search, Some(search_goal), config, events);
        } else if self.goal.is_none() {
            self.goal = self.last_known_position;
        }
    }

    fn transition(
        &mut self,
        to: HunterState,
        goal: Option<Vec3>,
        config: &AIConfig,
        events: &mut Vec<BrainEvent>,
    ) {
        let from = self.state;
        crate::log_info(&format!("HunterBrain: state {} -> {}", from, to));

        self.state = to;
        self.goal = goal;
        self.timers.frustration = 0.0;
        self.timers.in_state = 0.0;
        match to {
            HunterState::Chase => {
                self.timers.commitment = config.commitment_time;
                self.timers.lost = 0.0;
            }
            HunterState::Search => {
                self.timers.search = config.search_duration;
                self.timers.lost = 0.0;
                self.timers.commitment = 0.0;
            }
            HunterState::Patrol | HunterState::Investigate => {}
        }

        events.push(BrainEvent::StateChanged { from, to });
        if to == HunterState::Chase {
            events.push(BrainEvent::HuntStarted);
        }
    }

    fn feedback_matches(&self, nav: &NavFeedback) -> bool {
        match (self.goal, nav.goal) {
            (Some(goal), Some(reported)) => goal.distance(reported) <= GOAL_MATCH_TOLERANCE,
            (None, _) => true,
            (Some(_), None) => false,
        }
    }
}
