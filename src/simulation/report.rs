//! Per-turn and per-decision reports

use serde::{Deserialize, Serialize};

use crate::consequences::Consequence;
use crate::core::calendar::Quarter;
use crate::core::types::{CountryId, Turn};
use crate::decisions::AppliedResult;
use crate::events::WorldEvent;

/// Result of executing one decision: its own effects plus the ripples
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DecisionOutcome {
    pub applied: AppliedResult,
    pub consequences: Vec<Consequence>,
}

/// A decision an AI country took during a turn
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurnAction {
    pub country: CountryId,
    pub decision_id: String,
    pub title: String,
    pub consequences: Vec<Consequence>,
}

/// Everything that happened in one turn
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TurnReport {
    pub turn: Turn,
    pub year: u32,
    pub quarter: Quarter,
    pub year_rolled: bool,
    pub actions: Vec<TurnAction>,
    pub event: Option<WorldEvent>,
    /// News items published during the turn
    pub news_published: u64,
}

impl TurnReport {
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn summary(&self) -> String {
        let event = self
            .event
            .as_ref()
            .map(|e| e.headline.as_str())
            .unwrap_or("none");
        format!(
            "Turn {} ({:?} {}): {} AI decisions, event: {}, {} news items",
            self.turn,
            self.quarter,
            self.year,
            self.actions.len(),
            event,
            self.news_published,
        )
    }
}
