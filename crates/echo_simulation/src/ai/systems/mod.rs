//! AI systems (per-tick pipeline охотника)
//!
//! hunter_perception → hunter_decision → hunter_navigation

pub mod decision;
pub mod navigation;
pub mod perception;

// Re-export all systems
pub use decision::*;
pub use navigation::*;
pub use perception::*;
