pub mod calendar;
pub mod config;
pub mod error;
pub mod types;

pub use calendar::{Calendar, Quarter, SimulationSpeed};
pub use config::{CostPolicy, SimulationConfig};
pub use error::{DominionError, Result};
