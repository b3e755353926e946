//! Hunt simulation engine.
//!
//! This module implements the bounded grid where a single hunter wanders
//! randomly and captures any prey it lands on.

pub mod agent;
pub mod grid;
pub mod random;
pub mod simulation;

pub use agent::{Hunter, Player, Prey};
pub use grid::render_grid;
pub use random::RandomSource;
pub use simulation::{
    AgentState, CaptureEvent, Simulation, SimulationResult, TickReport, TickSnapshot,
};
