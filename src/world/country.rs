//! Country - a sovereign state and its economic, military and political stats

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::types::{clamp_stat, AllianceId, CountryId};

/// Relation score assumed when no explicit entry exists
pub const NEUTRAL_RELATION: f64 = 50.0;

/// A sovereign state
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Country {
    pub id: CountryId,
    pub name: String,
    pub flag: String,
    pub government: Government,

    pub economy: Economy,
    pub military: Military,
    pub opinion: PublicOpinion,

    // Bounded 0-100
    pub escalation_risk: f64,
    pub technology: f64,
    pub resources: f64,

    /// Affinity toward other countries. Not symmetric, not clamped.
    pub relations: BTreeMap<CountryId, f64>,

    /// Primary alliance affiliation
    pub alliance: Option<AllianceId>,
    pub is_player_controlled: bool,

    /// AI personality weights
    pub doctrine: Doctrine,

    /// Inert placeholder for voice features; never read by the simulation
    pub voice_profile: Option<VoiceProfile>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GovernmentType {
    Democracy,
    Monarchy,
    Authoritarian,
    Federal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Expertise {
    Military,
    Economy,
    ForeignPolicy,
    Intelligence,
    Domestic,
}

impl Expertise {
    pub const ALL: [Expertise; 5] = [
        Expertise::Military,
        Expertise::Economy,
        Expertise::ForeignPolicy,
        Expertise::Intelligence,
        Expertise::Domestic,
    ];

    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().replace('-', "_").as_str() {
            "military" => Some(Expertise::Military),
            "economy" | "economic" => Some(Expertise::Economy),
            "foreign_policy" | "diplomacy" | "diplomatic" => Some(Expertise::ForeignPolicy),
            "intelligence" => Some(Expertise::Intelligence),
            "domestic" => Some(Expertise::Domestic),
            _ => None,
        }
    }
}

/// A cabinet advisor. Advisors only produce briefings; they never act.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Advisor {
    pub name: String,
    pub expertise: Expertise,
    pub competence: u8,
    pub aggressive: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Government {
    pub kind: GovernmentType,
    pub advisors: Vec<Advisor>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Economy {
    pub gdp: f64,
    pub debt: f64,
    pub stability: f64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Military {
    pub strength: f64,
    pub readiness: f64,
    pub nuclear_capable: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PublicOpinion {
    pub approval: f64,
    pub unrest: f64,
}

/// Belief weights in [0, 1] used by the utility policy
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Doctrine {
    pub peaceful: f64,
    pub expansionist: f64,
    pub protectionist: f64,
}

impl Default for Doctrine {
    fn default() -> Self {
        Self {
            peaceful: 0.5,
            expansionist: 0.5,
            protectionist: 0.5,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VoiceProfile {
    pub person_name: String,
    pub accent: String,
    pub dialect: String,
    pub speaking_rate: f32,
    pub pitch: f32,
}

/// Every stat an effect can target
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stat {
    Gdp,
    Debt,
    Stability,
    MilitaryStrength,
    Readiness,
    Approval,
    Unrest,
    Escalation,
    Technology,
    Resources,
    /// Affinity toward a counterpart country
    Relation,
}

impl Stat {
    /// True for stats held in [0, 100]
    pub fn is_bounded(self) -> bool {
        !matches!(self, Stat::Gdp | Stat::Debt | Stat::Relation)
    }

    pub fn label(self) -> &'static str {
        match self {
            Stat::Gdp => "gdp",
            Stat::Debt => "debt",
            Stat::Stability => "stability",
            Stat::MilitaryStrength => "military strength",
            Stat::Readiness => "readiness",
            Stat::Approval => "approval",
            Stat::Unrest => "unrest",
            Stat::Escalation => "escalation risk",
            Stat::Technology => "technology",
            Stat::Resources => "resources",
            Stat::Relation => "relations",
        }
    }
}

/// Coarse classification of a relation score
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationStance {
    Allied,
    Friendly,
    Neutral,
    Tense,
    Hostile,
    AtWar,
}

impl RelationStance {
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 80.0 => RelationStance::Allied,
            s if s >= 60.0 => RelationStance::Friendly,
            s if s >= 40.0 => RelationStance::Neutral,
            s if s >= 20.0 => RelationStance::Tense,
            s if s >= 0.0 => RelationStance::Hostile,
            _ => RelationStance::AtWar,
        }
    }
}

impl Country {
    /// A country with mid-range default stats
    pub fn new(id: impl Into<CountryId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            flag: "🏳".to_string(),
            government: Government {
                kind: GovernmentType::Democracy,
                advisors: Vec::new(),
            },
            economy: Economy {
                gdp: 1000.0,
                debt: 500.0,
                stability: 50.0,
            },
            military: Military {
                strength: 50.0,
                readiness: 50.0,
                nuclear_capable: false,
            },
            opinion: PublicOpinion {
                approval: 50.0,
                unrest: 20.0,
            },
            escalation_risk: 0.0,
            technology: 50.0,
            resources: 50.0,
            relations: BTreeMap::new(),
            alliance: None,
            is_player_controlled: false,
            doctrine: Doctrine::default(),
            voice_profile: None,
        }
    }

    /// Read a scalar stat. Relations need a counterpart, see `relation`.
    pub fn stat(&self, stat: Stat) -> Option<f64> {
        let value = match stat {
            Stat::Gdp => self.economy.gdp,
            Stat::Debt => self.economy.debt,
            Stat::Stability => self.economy.stability,
            Stat::MilitaryStrength => self.military.strength,
            Stat::Readiness => self.military.readiness,
            Stat::Approval => self.opinion.approval,
            Stat::Unrest => self.opinion.unrest,
            Stat::Escalation => self.escalation_risk,
            Stat::Technology => self.technology,
            Stat::Resources => self.resources,
            Stat::Relation => return None,
        };
        Some(value)
    }

    /// Write a scalar stat. The only write path for scalar stats: bounded
    /// stats are clamped into [0, 100], currency is floored at zero.
    pub fn set_stat(&mut self, stat: Stat, value: f64) {
        let value = if stat.is_bounded() {
            clamp_stat(value)
        } else {
            value.max(0.0)
        };

        match stat {
            Stat::Gdp => self.economy.gdp = value,
            Stat::Debt => self.economy.debt = value,
            Stat::Stability => self.economy.stability = value,
            Stat::MilitaryStrength => self.military.strength = value,
            Stat::Readiness => self.military.readiness = value,
            Stat::Approval => self.opinion.approval = value,
            Stat::Unrest => self.opinion.unrest = value,
            Stat::Escalation => self.escalation_risk = value,
            Stat::Technology => self.technology = value,
            Stat::Resources => self.resources = value,
            Stat::Relation => {}
        }
    }

    /// Add a delta to a scalar stat through the clamp
    pub fn adjust_stat(&mut self, stat: Stat, delta: f64) {
        if let Some(current) = self.stat(stat) {
            self.set_stat(stat, current + delta);
        }
    }

    pub fn relation(&self, other: &CountryId) -> f64 {
        self.relations.get(other).copied().unwrap_or(NEUTRAL_RELATION)
    }

    pub fn set_relation(&mut self, other: CountryId, value: f64) {
        self.relations.insert(other, value);
    }

    pub fn relation_stance(&self, other: &CountryId) -> RelationStance {
        RelationStance::from_score(self.relation(other))
    }

    /// Debt as a share of gdp (infinite when gdp has collapsed)
    pub fn debt_ratio(&self) -> f64 {
        if self.economy.gdp > 0.0 {
            self.economy.debt / self.economy.gdp
        } else {
            f64::INFINITY
        }
    }

    pub fn shares_alliance_with(&self, other: &Country) -> bool {
        self.alliance.is_some() && self.alliance == other.alliance
    }

    // Legacy projections, derived from the canonical fields

    pub fn military_power(&self) -> f64 {
        self.military.strength
    }

    pub fn government_support(&self) -> f64 {
        self.opinion.approval
    }

    pub fn protest_intensity(&self) -> f64 {
        self.opinion.unrest
    }

    /// True when every bounded stat lies in [0, 100]
    pub fn bounded_stats_valid(&self) -> bool {
        [
            Stat::Stability,
            Stat::MilitaryStrength,
            Stat::Readiness,
            Stat::Approval,
            Stat::Unrest,
            Stat::Escalation,
            Stat::Technology,
            Stat::Resources,
        ]
        .iter()
        .filter_map(|&s| self.stat(s))
        .all(|v| (0.0..=100.0).contains(&v))
    }
}
