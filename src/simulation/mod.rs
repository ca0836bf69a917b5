//! Turn scheduling and the real-time clock
//!
//! `Simulation` owns the world and advances it one turn at a time.
//! `SharedSimulation` serializes access for async callers, and
//! `SimulationClock` drives it in real time.

pub mod clock;
pub mod drift;
pub mod engine;
pub mod report;
pub mod shared;

pub use clock::{ClockState, SimulationClock};
pub use engine::{Simulation, TurnPhase};
pub use report::{DecisionOutcome, TurnAction, TurnReport};
pub use shared::SharedSimulation;
