//! Turn calendar and clock speeds
//!
//! A turn is one quarter of a year at the default four turns per year.
//! The year counter rolls over on every turn that is a multiple of
//! `turns_per_year` (turns 4, 8, 12, ...).
//!
//! Turn 0 is the opening position in Q1 of the start year, and each
//! advance moves one quarter forward. The first played turn therefore
//! reports Q2, and the turn that rolls the year reports Q1 of the new year.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::types::Turn;

/// Quarter of the in-game year a turn falls in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quarter {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quarter {
    /// Quarter of the year the calendar is in after `turn` advances
    pub fn from_turn(turn: Turn, turns_per_year: u32) -> Self {
        let turns_per_year = turns_per_year.max(1);
        // Position within the year, scaled onto four quarters
        let position = (turn % turns_per_year) * 4 / turns_per_year;
        match position {
            0 => Quarter::Q1,
            1 => Quarter::Q2,
            2 => Quarter::Q3,
            _ => Quarter::Q4,
        }
    }
}

/// Calendar tracks simulation time with turn/year granularity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Calendar {
    turn: Turn,
    year: u32,
    turns_per_year: u32,
}

impl Calendar {
    pub fn new(start_year: u32, turns_per_year: u32) -> Self {
        Self {
            turn: 0,
            year: start_year,
            turns_per_year: turns_per_year.max(1),
        }
    }

    /// Advance one turn. Returns true when the year rolled over.
    pub fn advance(&mut self) -> bool {
        self.turn += 1;
        if self.turn % self.turns_per_year == 0 {
            self.year += 1;
            return true;
        }
        false
    }

    pub fn current_turn(&self) -> Turn {
        self.turn
    }

    pub fn current_year(&self) -> u32 {
        self.year
    }

    pub fn current_quarter(&self) -> Quarter {
        Quarter::from_turn(self.turn, self.turns_per_year)
    }

    pub fn turns_per_year(&self) -> u32 {
        self.turns_per_year
    }
}

impl Default for Calendar {
    fn default() -> Self {
        Self::new(2024, 4)
    }
}

/// Named real-time speeds for the simulation clock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulationSpeed {
    Slow,
    #[default]
    Normal,
    Fast,
    VeryFast,
}

impl SimulationSpeed {
    pub const ALL: [SimulationSpeed; 4] = [
        SimulationSpeed::Slow,
        SimulationSpeed::Normal,
        SimulationSpeed::Fast,
        SimulationSpeed::VeryFast,
    ];

    /// Real time between two ticks
    pub fn interval(self) -> Duration {
        match self {
            SimulationSpeed::Slow => Duration::from_secs(10),
            SimulationSpeed::Normal => Duration::from_secs(5),
            SimulationSpeed::Fast => Duration::from_secs(2),
            SimulationSpeed::VeryFast => Duration::from_secs(1),
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().replace('-', "_").as_str() {
            "slow" => Some(SimulationSpeed::Slow),
            "normal" => Some(SimulationSpeed::Normal),
            "fast" => Some(SimulationSpeed::Fast),
            "very_fast" | "veryfast" => Some(SimulationSpeed::VeryFast),
            _ => None,
        }
    }
}
