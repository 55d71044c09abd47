//! Physics stand-in (headless)
//!
//! Настоящая физика (коллизии, kinematic controller) живёт у хоста: она читает
//! `PhysicsBody.velocity` и двигает тело. Здесь только интеграция velocity →
//! Transform для headless прогонов и тестов.

pub mod body;

pub use body::{integrate_velocity, HeadlessPhysicsPlugin, PhysicsBody};
