//! News events and the bounded news journal

pub mod journal;

pub use journal::NewsJournal;

use serde::{Deserialize, Serialize};

use crate::core::types::Turn;

/// Category tag used by the presentation layer to pick an icon and color
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NewsCategory {
    Breaking,
    Announcement,
    Economic,
    Military,
    Diplomatic,
    Domestic,
    Disaster,
}

impl NewsCategory {
    pub fn icon(self) -> &'static str {
        match self {
            NewsCategory::Breaking => "🔴",
            NewsCategory::Announcement => "📢",
            NewsCategory::Economic => "📈",
            NewsCategory::Military => "⚔️",
            NewsCategory::Diplomatic => "🤝",
            NewsCategory::Domestic => "🏠",
            NewsCategory::Disaster => "🌪️",
        }
    }
}

/// A published news item. Stamped with sequence, turn and year on publish.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewsEvent {
    pub seq: u64,
    pub turn: Turn,
    pub year: u32,
    pub category: NewsCategory,
    /// Names of the countries involved, originator first
    pub actors: Vec<String>,
    pub headline: String,
    pub description: String,
    /// 0.0 (trivia) to 1.0 (world-changing)
    pub severity: f64,
}

impl NewsEvent {
    pub fn new(category: NewsCategory, headline: impl Into<String>) -> Self {
        Self {
            seq: 0,
            turn: 0,
            year: 0,
            category,
            actors: Vec::new(),
            headline: headline.into(),
            description: String::new(),
            severity: 0.0,
        }
    }

    pub fn actor(mut self, name: impl Into<String>) -> Self {
        self.actors.push(name.into());
        self
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = text.into();
        self
    }

    pub fn severity(mut self, severity: f64) -> Self {
        self.severity = severity.clamp(0.0, 1.0);
        self
    }

    /// One-line rendering: "⚔️ Russia & China: headline"
    pub fn render(&self) -> String {
        if self.actors.is_empty() {
            format!("{} {}", self.category.icon(), self.headline)
        } else {
            format!(
                "{} {}: {}",
                self.category.icon(),
                self.actors.join(" & "),
                self.headline
            )
        }
    }
}
