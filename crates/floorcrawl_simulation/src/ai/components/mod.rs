//! AI components

pub mod fsm;
pub mod variant;


// Re-export all components
pub use fsm::*;
pub use variant::*;
