//! AI systems (player input, hostile strategies, FSM)

pub mod fsm;
pub mod hostile;
pub mod player;

// Tests (separate files with _tests suffix)
#[cfg(test)]
mod hostile_tests;

// Re-export all systems
pub use fsm::*;
pub use hostile::*;
pub use player::*;
