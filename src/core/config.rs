//! Simulation configuration with documented constants
//!
//! All magic numbers are collected here with explanations of their purpose
//! and how they interact with each other. Every section can be overridden
//! from a TOML file; missing keys fall back to the defaults below.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ai::PolicyKind;
use crate::core::calendar::SimulationSpeed;
use crate::core::error::{DominionError, Result};

/// How a decision's `cost` is treated when it is executed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostPolicy {
    /// Cost is informational only
    #[default]
    Ignore,
    /// Cost is added to the actor's debt, never refused
    ChargeDebt,
    /// Cost is added to debt; refused when debt/gdp would exceed `debt_ceiling`
    Enforce,
}

/// Configuration for the simulation systems
///
/// These values have been tuned for pacing, not realism.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Calendar year at turn 0
    pub start_year: u32,

    /// Turns per in-game year; the year rolls on every multiple of this
    pub turns_per_year: u32,

    /// Maximum number of retained news items (oldest evicted first)
    pub news_capacity: usize,

    /// Relation score below which sanctions become available
    ///
    /// Relations start between 30 and 90 for most pairs, so sanctions are
    /// rare at the start and appear as relations sour.
    pub sanctions_threshold: f64,

    /// Treatment of decision costs
    pub cost_policy: CostPolicy,

    /// Highest debt/gdp ratio an `Enforce` cost policy accepts
    pub debt_ceiling: f64,

    pub ai: AiConfig,
    pub consequences: ConsequenceConfig,
    pub events: EventConfig,
    pub drift: DriftConfig,
    pub clock: ClockConfig,
}

/// AI policy selector tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Chance that a non-player country acts at all in a turn
    ///
    /// At 0.4 with nine AI countries, roughly 3-4 decisions land per turn.
    pub action_probability: f64,

    /// Policy used by countries without an explicit override
    pub default_policy: PolicyKind,
}

/// Reactive rule tuning for the consequence engine
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsequenceConfig {
    /// Escalation added to a country that orders a military buildup
    pub buildup_escalation: f64,
    /// Chance each rival (different alliance) raises readiness in response
    pub buildup_reaction_probability: f64,
    /// Readiness gained by a reacting rival
    pub buildup_reaction_readiness: f64,

    /// Unrest level above which austerity can trigger protests
    pub austerity_unrest_threshold: f64,
    pub austerity_protest_probability: f64,
    /// Unrest added when austerity protests erupt
    pub austerity_protest_unrest: f64,

    /// Stability granted to alliance partners of a stimulating economy
    pub stimulus_ally_stability: f64,

    /// Approval above which a country may condemn a crackdown
    pub crackdown_approval_threshold: f64,
    pub crackdown_condemnation_probability: f64,

    /// Escalation removed by any diplomatic decision
    pub diplomatic_deescalation: f64,

    /// Technology level above which research can spill into gdp growth
    pub tech_growth_threshold: f64,
    pub tech_growth_probability: f64,
    /// Gdp growth in percent when the spillover fires
    pub tech_growth_percent: f64,

    /// Chance of a flavor "world reaction" headline after any decision
    pub world_reaction_probability: f64,
}

/// Random world event tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EventConfig {
    /// Chance that one random event fires per turn
    pub fire_probability: f64,
}

/// Passive per-turn drift tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DriftConfig {
    /// Gdp moves by up to +/- this many percent each turn
    pub gdp_percent: f64,
    /// Approval moves by up to +/- this many points each turn
    pub approval_points: f64,
    /// Enables structural pressure: low stability feeds unrest and erodes
    /// approval, and readiness decays toward a floor
    pub structural_pressure: bool,
    /// Enables regional politics: independence support in registered
    /// regions follows the parent country's stability and unrest
    pub regional_politics: bool,
}

/// Real-time clock settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    pub speed: SimulationSpeed,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            start_year: 2024,
            turns_per_year: 4,
            news_capacity: 50,
            sanctions_threshold: 30.0,
            cost_policy: CostPolicy::Ignore,
            debt_ceiling: 1.5,
            ai: AiConfig::default(),
            consequences: ConsequenceConfig::default(),
            events: EventConfig::default(),
            drift: DriftConfig::default(),
            clock: ClockConfig::default(),
        }
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            action_probability: 0.4,
            default_policy: PolicyKind::Random,
        }
    }
}

impl Default for ConsequenceConfig {
    fn default() -> Self {
        Self {
            buildup_escalation: 5.0,
            buildup_reaction_probability: 0.4,
            buildup_reaction_readiness: 5.0,
            austerity_unrest_threshold: 40.0,
            austerity_protest_probability: 0.5,
            austerity_protest_unrest: 10.0,
            stimulus_ally_stability: 2.0,
            crackdown_approval_threshold: 50.0,
            crackdown_condemnation_probability: 0.3,
            diplomatic_deescalation: 3.0,
            tech_growth_threshold: 70.0,
            tech_growth_probability: 0.3,
            tech_growth_percent: 2.0,
            world_reaction_probability: 0.3,
        }
    }
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            fire_probability: 0.2,
        }
    }
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            gdp_percent: 1.0,
            approval_points: 1.5,
            structural_pressure: false,
            regional_politics: false,
        }
    }
}

impl SimulationConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text, then validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SimulationConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.turns_per_year == 0 {
            return Err(DominionError::InvalidConfig(
                "turns_per_year must be at least 1".into(),
            ));
        }

        if self.news_capacity == 0 {
            return Err(DominionError::InvalidConfig(
                "news_capacity must be at least 1".into(),
            ));
        }

        // NaN fails every comparison, so rule out non-finite values first
        if !self.debt_ceiling.is_finite() || self.debt_ceiling <= 0.0 {
            return Err(DominionError::InvalidConfig(format!(
                "debt_ceiling ({}) must be positive",
                self.debt_ceiling
            )));
        }

        let c = &self.consequences;
        let probabilities = [
            ("ai.action_probability", self.ai.action_probability),
            ("events.fire_probability", self.events.fire_probability),
            ("consequences.buildup_reaction_probability", c.buildup_reaction_probability),
            ("consequences.austerity_protest_probability", c.austerity_protest_probability),
            ("consequences.crackdown_condemnation_probability", c.crackdown_condemnation_probability),
            ("consequences.tech_growth_probability", c.tech_growth_probability),
            ("consequences.world_reaction_probability", c.world_reaction_probability),
        ];
        for (name, p) in probabilities {
            if !(0.0..=1.0).contains(&p) {
                return Err(DominionError::InvalidConfig(format!(
                    "{} ({}) must lie in [0, 1]",
                    name, p
                )));
            }
        }

        let magnitudes = [
            ("sanctions_threshold", self.sanctions_threshold),
            ("drift.gdp_percent", self.drift.gdp_percent),
            ("drift.approval_points", self.drift.approval_points),
            ("consequences.buildup_escalation", c.buildup_escalation),
            ("consequences.buildup_reaction_readiness", c.buildup_reaction_readiness),
            ("consequences.austerity_unrest_threshold", c.austerity_unrest_threshold),
            ("consequences.austerity_protest_unrest", c.austerity_protest_unrest),
            ("consequences.stimulus_ally_stability", c.stimulus_ally_stability),
            ("consequences.crackdown_approval_threshold", c.crackdown_approval_threshold),
            ("consequences.diplomatic_deescalation", c.diplomatic_deescalation),
            ("consequences.tech_growth_threshold", c.tech_growth_threshold),
            ("consequences.tech_growth_percent", c.tech_growth_percent),
        ];
        for (name, value) in magnitudes {
            if !value.is_finite() {
                return Err(DominionError::InvalidConfig(format!(
                    "{} ({}) must be finite",
                    name, value
                )));
            }
        }

        if self.drift.gdp_percent < 0.0 || self.drift.approval_points < 0.0 {
            return Err(DominionError::InvalidConfig(
                "drift magnitudes must not be negative".into(),
            ));
        }

        Ok(())
    }
}
