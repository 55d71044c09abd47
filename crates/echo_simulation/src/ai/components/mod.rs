//! AI components

pub mod fsm;
pub mod hunter;
pub mod stimulus;

#[cfg(test)]
mod stimulus_tests;

pub use fsm::*;
pub use hunter::*;
pub use stimulus::*;
