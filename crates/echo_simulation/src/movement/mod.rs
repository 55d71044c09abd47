//! Movement domain — steering агента по маршруту
//!
//! Содержит:
//! - Steering (маршрут, follow index, инерция, stuck detection)
//! - SteeringConfig (пороги, serde)
//! - NavStatus (Idle/Moving/Complete/Stuck/Unreachable)

pub mod steering;


pub use steering::{NavStatus, Steering, SteeringConfig, SteeringOutput};
