//! Decision catalog - what a country may decide this turn

use serde::{Deserialize, Serialize};

use crate::core::types::CountryId;
use crate::decisions::effect::{severity_of, Effect};
use crate::news::NewsCategory;
use crate::world::country::Stat;
use crate::world::registry::CountryRegistry;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DecisionCategory {
    Economic,
    Military,
    Domestic,
    Diplomatic,
    Technology,
}

impl DecisionCategory {
    /// News category used when a decision of this category is announced
    pub fn news_category(self) -> NewsCategory {
        match self {
            DecisionCategory::Economic => NewsCategory::Economic,
            DecisionCategory::Military => NewsCategory::Military,
            DecisionCategory::Domestic => NewsCategory::Domestic,
            DecisionCategory::Diplomatic => NewsCategory::Diplomatic,
            DecisionCategory::Technology => NewsCategory::Announcement,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DecisionKind {
    Stimulus,
    Austerity,
    MilitaryBuildup,
    Demobilize,
    SocialPrograms,
    Crackdown,
    ResearchFunding,
    DiplomaticOutreach,
    Sanctions,
}

impl DecisionKind {
    pub fn category(self) -> DecisionCategory {
        match self {
            DecisionKind::Stimulus | DecisionKind::Austerity => DecisionCategory::Economic,
            DecisionKind::MilitaryBuildup | DecisionKind::Demobilize => DecisionCategory::Military,
            DecisionKind::SocialPrograms | DecisionKind::Crackdown => DecisionCategory::Domestic,
            DecisionKind::ResearchFunding => DecisionCategory::Technology,
            DecisionKind::DiplomaticOutreach | DecisionKind::Sanctions => DecisionCategory::Diplomatic,
        }
    }

    /// True for decisions aimed at another country
    pub fn is_targeted(self) -> bool {
        matches!(self, DecisionKind::DiplomaticOutreach | DecisionKind::Sanctions)
    }
}

/// A concrete option offered to one actor
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    /// Stable within a query: "stimulus", "diplomacy_china", ...
    pub id: String,
    pub kind: DecisionKind,
    pub title: String,
    pub description: String,
    pub category: DecisionCategory,
    pub effects: Vec<Effect>,
    pub cost: Option<f64>,
    /// Counterpart country for diplomatic decisions
    pub target: Option<CountryId>,
}

impl Decision {
    /// News severity when this decision is announced
    pub fn severity(&self) -> f64 {
        severity_of(&self.effects)
    }
}

struct Template {
    kind: DecisionKind,
    id: &'static str,
    title: &'static str,
    description: &'static str,
    cost: Option<f64>,
    effects: &'static [Effect],
}

impl Template {
    fn instantiate(&self) -> Decision {
        Decision {
            id: self.id.to_string(),
            kind: self.kind,
            title: self.title.to_string(),
            description: self.description.to_string(),
            category: self.kind.category(),
            effects: self.effects.to_vec(),
            cost: self.cost,
            target: None,
        }
    }
}

/// Options every country always has, in presentation order
const BASELINE: &[Template] = &[
    Template {
        kind: DecisionKind::Stimulus,
        id: "stimulus",
        title: "Economic Stimulus",
        description: "Inject money into the economy to boost growth",
        cost: Some(100.0),
        effects: &[
            Effect::percent(Stat::Gdp, 5.0),
            Effect::percent(Stat::Debt, 10.0),
            Effect::absolute(Stat::Approval, 3.0),
        ],
    },
    Template {
        kind: DecisionKind::Austerity,
        id: "austerity",
        title: "Austerity Measures",
        description: "Cut spending to reduce debt",
        cost: None,
        effects: &[
            Effect::percent(Stat::Debt, -15.0),
            Effect::absolute(Stat::Approval, -10.0),
            Effect::absolute(Stat::Unrest, 5.0),
        ],
    },
    Template {
        kind: DecisionKind::MilitaryBuildup,
        id: "military_buildup",
        title: "Military Buildup",
        description: "Increase military strength and readiness",
        cost: Some(50.0),
        effects: &[
            Effect::absolute(Stat::MilitaryStrength, 5.0),
            Effect::absolute(Stat::Readiness, 10.0),
            Effect::percent(Stat::Debt, 5.0),
        ],
    },
    Template {
        kind: DecisionKind::Demobilize,
        id: "demobilize",
        title: "Demobilize Forces",
        description: "Reduce military spending",
        cost: None,
        effects: &[
            Effect::absolute(Stat::MilitaryStrength, -3.0),
            Effect::percent(Stat::Debt, -5.0),
            Effect::absolute(Stat::Stability, 2.0),
        ],
    },
    Template {
        kind: DecisionKind::SocialPrograms,
        id: "social_programs",
        title: "Expand Social Programs",
        description: "Increase welfare and social safety nets",
        cost: Some(30.0),
        effects: &[
            Effect::absolute(Stat::Approval, 10.0),
            Effect::absolute(Stat::Unrest, -8.0),
            Effect::percent(Stat::Debt, 8.0),
        ],
    },
    Template {
        kind: DecisionKind::Crackdown,
        id: "crackdown",
        title: "Security Crackdown",
        description: "Suppress civil unrest with force",
        cost: None,
        effects: &[
            Effect::absolute(Stat::Unrest, -15.0),
            Effect::absolute(Stat::Approval, -8.0),
            Effect::absolute(Stat::Stability, 5.0),
        ],
    },
    Template {
        kind: DecisionKind::ResearchFunding,
        id: "research_funding",
        title: "Fund Research",
        description: "Increase R&D spending",
        cost: Some(40.0),
        effects: &[
            Effect::absolute(Stat::Technology, 8.0),
            Effect::percent(Stat::Debt, 5.0),
        ],
    },
];

const OUTREACH_EFFECTS: &[Effect] = &[Effect::absolute(Stat::Relation, 10.0)];

const SANCTION_EFFECTS: &[Effect] = &[
    Effect::absolute(Stat::Relation, -15.0),
    Effect::percent(Stat::Gdp, -5.0).on_target(),
    Effect::absolute(Stat::Escalation, 8.0),
];

fn outreach(other_id: &CountryId, other_name: &str) -> Decision {
    Decision {
        id: format!("diplomacy_{}", other_id),
        kind: DecisionKind::DiplomaticOutreach,
        title: format!("Diplomatic Outreach to {}", other_name),
        description: "Improve relations through diplomatic channels".to_string(),
        category: DecisionKind::DiplomaticOutreach.category(),
        effects: OUTREACH_EFFECTS.to_vec(),
        cost: None,
        target: Some(other_id.clone()),
    }
}

fn sanctions(other_id: &CountryId, other_name: &str) -> Decision {
    Decision {
        id: format!("sanctions_{}", other_id),
        kind: DecisionKind::Sanctions,
        title: format!("Impose Sanctions on {}", other_name),
        description: format!("Economic sanctions to pressure {}", other_name),
        category: DecisionKind::Sanctions.category(),
        effects: SANCTION_EFFECTS.to_vec(),
        cost: None,
        target: Some(other_id.clone()),
    }
}

/// Every decision currently open to `actor`.
///
/// Baseline options first, then outreach (and sanctions, when relations
/// have soured below `sanctions_threshold`) toward every other country in
/// registry order. Unknown actors get an empty list.
pub fn available(registry: &CountryRegistry, actor: &CountryId, sanctions_threshold: f64) -> Vec<Decision> {
    let Some(country) = registry.get(actor) else {
        return Vec::new();
    };

    let mut decisions: Vec<Decision> = BASELINE.iter().map(Template::instantiate).collect();

    for other in registry.iter().filter(|c| c.id != *actor) {
        decisions.push(outreach(&other.id, &other.name));
        if country.relation(&other.id) < sanctions_threshold {
            decisions.push(sanctions(&other.id, &other.name));
        }
    }

    decisions
}

/// Look up one of `actor`'s currently available decisions by id
pub fn find(
    registry: &CountryRegistry,
    actor: &CountryId,
    decision_id: &str,
    sanctions_threshold: f64,
) -> Option<Decision> {
    available(registry, actor, sanctions_threshold)
        .into_iter()
        .find(|d| d.id == decision_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decisions::effect::{EffectMode, EffectScope};
    use crate::world::country::Country;

    fn registry() -> CountryRegistry {
        let mut registry = CountryRegistry::default();
        registry.insert(Country::new("usa", "United States")).unwrap();
        registry.insert(Country::new("china", "China")).unwrap();
        registry.insert(Country::new("russia", "Russia")).unwrap();
        registry
    }

    #[test]
    fn test_baseline_comes_first() {
        let decisions = available(&registry(), &"usa".into(), 30.0);
        let ids: Vec<&str> = decisions.iter().take(7).map(|d| d.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["stimulus", "austerity", "military_buildup", "demobilize", "social_programs", "crackdown", "research_funding"]
        );
        // Two neutral neighbours: outreach only
        assert_eq!(decisions.len(), 9);
        assert_eq!(decisions[7].id, "diplomacy_china");
        assert_eq!(decisions[8].id, "diplomacy_russia");
    }

    #[test]
    fn test_sanctions_offered_below_threshold() {
        let mut registry = registry();
        let usa = CountryId::new("usa");
        registry.get_mut(&usa).unwrap().set_relation("china".into(), 29.9);
        registry.get_mut(&usa).unwrap().set_relation("russia".into(), 30.0);

        let ids: Vec<String> = available(&registry, &usa, 30.0).into_iter().map(|d| d.id).collect();
        assert!(ids.contains(&"sanctions_china".to_string()));
        assert!(!ids.contains(&"sanctions_russia".to_string()));

        let position = ids.iter().position(|id| id == "sanctions_china").unwrap();
        assert_eq!(ids[position - 1], "diplomacy_china");
    }

    #[test]
    fn test_sanctions_shape() {
        let mut registry = registry();
        let usa = CountryId::new("usa");
        registry.get_mut(&usa).unwrap().set_relation("china".into(), 10.0);

        let decision = find(&registry, &usa, "sanctions_china", 30.0).unwrap();
        assert_eq!(decision.title, "Impose Sanctions on China");
        assert_eq!(decision.target, Some(CountryId::new("china")));
        assert_eq!(decision.effects[1].scope, EffectScope::Target);
        assert_eq!(decision.effects[1].mode, EffectMode::RelativePercent);
        assert_eq!(decision.category, DecisionCategory::Diplomatic);
    }

    #[test]
    fn test_unknown_actor_has_no_options() {
        assert!(available(&registry(), &"atlantis".into(), 30.0).is_empty());
    }

    #[test]
    fn test_currency_effects_are_relative() {
        for decision in available(&registry(), &"usa".into(), 30.0) {
            for effect in &decision.effects {
                let expected = match effect.stat {
                    Stat::Gdp | Stat::Debt => EffectMode::RelativePercent,
                    _ => EffectMode::Absolute,
                };
                assert_eq!(effect.mode, expected, "{} {:?}", decision.id, effect.stat);
            }
        }
    }

    #[test]
    fn test_technology_announced_as_announcement() {
        assert_eq!(DecisionCategory::Technology.news_category(), NewsCategory::Announcement);
        assert_eq!(DecisionKind::ResearchFunding.category(), DecisionCategory::Technology);
    }
}
