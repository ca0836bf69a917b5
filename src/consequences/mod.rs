//! Consequence engine - reactive rules that ripple out from a decision
//!
//! Runs after a decision's own effects have landed. Rules are keyed on the
//! decision kind or category; third parties are visited in registry order so
//! a seeded run always rolls the same dice in the same sequence.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::config::ConsequenceConfig;
use crate::core::types::CountryId;
use crate::decisions::{Decision, DecisionCategory, DecisionKind};
use crate::news::{NewsCategory, NewsEvent};
use crate::world::country::Stat;
use crate::world::registry::CountryRegistry;

/// A reaction that fired
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Consequence {
    /// The actor's escalation risk rose after arming
    EscalationRaised { country: CountryId, amount: f64 },
    /// A rival raised readiness in response to `against`
    RivalMobilized { country: CountryId, against: CountryId },
    AusterityProtests { country: CountryId },
    /// An alliance partner gained stability from a stimulus
    AllyStabilized { country: CountryId },
    Condemnation { by: CountryId, of: CountryId },
    Deescalation { country: CountryId, amount: f64 },
    TechGrowth { country: CountryId },
    WorldReaction { headline: String },
}

fn roll<R: Rng + ?Sized>(rng: &mut R, probability: f64) -> bool {
    rng.gen::<f64>() < probability
}

/// Apply every reactive rule for `decision` taken by `actor`
pub fn process<R: Rng + ?Sized>(
    registry: &mut CountryRegistry,
    actor: &CountryId,
    decision: &Decision,
    config: &ConsequenceConfig,
    rng: &mut R,
) -> Vec<Consequence> {
    let mut fired = Vec::new();
    if !registry.contains(actor) {
        return fired;
    }

    match decision.kind {
        DecisionKind::MilitaryBuildup => military_buildup(registry, actor, config, rng, &mut fired),
        DecisionKind::Austerity => austerity(registry, actor, config, rng, &mut fired),
        DecisionKind::Stimulus => stimulus(registry, actor, config, &mut fired),
        DecisionKind::Crackdown => crackdown(registry, actor, config, rng, &mut fired),
        _ => {}
    }

    match decision.category {
        DecisionCategory::Diplomatic => {
            if let Some(country) = registry.get_mut(actor) {
                country.adjust_stat(Stat::Escalation, -config.diplomatic_deescalation);
                fired.push(Consequence::Deescalation {
                    country: actor.clone(),
                    amount: config.diplomatic_deescalation,
                });
            }
        }
        DecisionCategory::Technology => technology(registry, actor, config, rng, &mut fired),
        _ => {}
    }

    if roll(rng, config.world_reaction_probability) {
        let name = registry.name_of(actor);
        let templates = [
            format!("International markets react to {}'s decision", name),
            format!("Analysts debate implications of {}'s {}", name, decision.title),
            format!("Global leaders watch {}'s moves closely", name),
            format!("Think tanks assess {}'s new policy direction", name),
        ];
        if let Some(headline) = templates.choose(rng) {
            registry.publish(NewsEvent::new(NewsCategory::Breaking, headline.clone()).severity(0.2));
            fired.push(Consequence::WorldReaction {
                headline: headline.clone(),
            });
        }
    }

    for consequence in &fired {
        debug!(?consequence, "Consequence fired");
    }
    fired
}

fn military_buildup<R: Rng + ?Sized>(
    registry: &mut CountryRegistry,
    actor: &CountryId,
    config: &ConsequenceConfig,
    rng: &mut R,
    fired: &mut Vec<Consequence>,
) {
    let Some(country) = registry.get_mut(actor) else {
        return;
    };
    country.adjust_stat(Stat::Escalation, config.buildup_escalation);
    let actor_alliance = country.alliance.clone();
    let actor_name = country.name.clone();
    fired.push(Consequence::EscalationRaised {
        country: actor.clone(),
        amount: config.buildup_escalation,
    });

    for other in registry.ids() {
        if other == *actor {
            continue;
        }
        let Some(rival) = registry.get_mut(&other) else {
            continue;
        };
        if rival.alliance == actor_alliance || !roll(rng, config.buildup_reaction_probability) {
            continue;
        }
        rival.adjust_stat(Stat::Readiness, config.buildup_reaction_readiness);
        let rival_name = rival.name.clone();

        registry.publish(
            NewsEvent::new(
                NewsCategory::Military,
                format!("increases military readiness in response to {}", actor_name),
            )
            .actor(rival_name)
            .severity(0.4),
        );
        fired.push(Consequence::RivalMobilized {
            country: other,
            against: actor.clone(),
        });
    }
}

fn austerity<R: Rng + ?Sized>(
    registry: &mut CountryRegistry,
    actor: &CountryId,
    config: &ConsequenceConfig,
    rng: &mut R,
    fired: &mut Vec<Consequence>,
) {
    let Some(country) = registry.get_mut(actor) else {
        return;
    };
    if country.opinion.unrest <= config.austerity_unrest_threshold
        || !roll(rng, config.austerity_protest_probability)
    {
        return;
    }
    country.adjust_stat(Stat::Unrest, config.austerity_protest_unrest);
    let name = country.name.clone();

    registry.publish(
        NewsEvent::new(NewsCategory::Domestic, "Protests erupt over austerity measures")
            .actor(name)
            .severity(0.5),
    );
    fired.push(Consequence::AusterityProtests {
        country: actor.clone(),
    });
}

fn stimulus(
    registry: &mut CountryRegistry,
    actor: &CountryId,
    config: &ConsequenceConfig,
    fired: &mut Vec<Consequence>,
) {
    let Some(alliance) = registry.get(actor).and_then(|c| c.alliance.clone()) else {
        return;
    };

    for ally in registry.iter_mut() {
        if ally.id == *actor || ally.alliance.as_ref() != Some(&alliance) {
            continue;
        }
        ally.adjust_stat(Stat::Stability, config.stimulus_ally_stability);
        fired.push(Consequence::AllyStabilized {
            country: ally.id.clone(),
        });
    }
}

fn crackdown<R: Rng + ?Sized>(
    registry: &mut CountryRegistry,
    actor: &CountryId,
    config: &ConsequenceConfig,
    rng: &mut R,
    fired: &mut Vec<Consequence>,
) {
    let actor_name = registry.name_of(actor);
    let critics: Vec<(CountryId, String)> = registry
        .iter()
        .filter(|c| c.id != *actor && c.opinion.approval > config.crackdown_approval_threshold)
        .map(|c| (c.id.clone(), c.name.clone()))
        .collect();

    for (critic, critic_name) in critics {
        if !roll(rng, config.crackdown_condemnation_probability) {
            continue;
        }
        registry.publish(
            NewsEvent::new(NewsCategory::Diplomatic, "condemns human rights situation")
                .actor(critic_name)
                .actor(actor_name.clone())
                .severity(0.3),
        );
        fired.push(Consequence::Condemnation {
            by: critic,
            of: actor.clone(),
        });
    }
}

fn technology<R: Rng + ?Sized>(
    registry: &mut CountryRegistry,
    actor: &CountryId,
    config: &ConsequenceConfig,
    rng: &mut R,
    fired: &mut Vec<Consequence>,
) {
    let Some(country) = registry.get_mut(actor) else {
        return;
    };
    if country.technology <= config.tech_growth_threshold || !roll(rng, config.tech_growth_probability) {
        return;
    }
    let gdp = country.economy.gdp;
    country.set_stat(Stat::Gdp, gdp + gdp * config.tech_growth_percent / 100.0);
    let name = country.name.clone();

    registry.publish(
        NewsEvent::new(NewsCategory::Economic, "Tech sector drives economic growth")
            .actor(name)
            .severity(0.3),
    );
    fired.push(Consequence::TechGrowth {
        country: actor.clone(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decisions::find;
    use crate::world::alliance::{Alliance, AllianceType};
    use crate::world::country::Country;
    use rand::rngs::mock::StepRng;

    /// Every `gen::<f64>()` is 0.0, so every roll succeeds
    fn always() -> StepRng {
        StepRng::new(0, 0)
    }

    /// Every `gen::<f64>()` is just below 1.0, so every roll fails
    fn never() -> StepRng {
        StepRng::new(u64::MAX, 0)
    }

    fn world() -> CountryRegistry {
        let mut registry = CountryRegistry::default();
        for (id, name) in [("usa", "United States"), ("uk", "United Kingdom"), ("china", "China"), ("russia", "Russia")] {
            registry.insert(Country::new(id, name)).unwrap();
        }
        registry.register_alliance(
            Alliance::new("NATO", "North Atlantic Treaty Organization", AllianceType::Military)
                .with_collective_defense()
                .with_members(["usa", "uk"]),
        );
        registry
    }

    fn decision(registry: &CountryRegistry, id: &str) -> Decision {
        find(registry, &"usa".into(), id, 30.0).unwrap()
    }

    #[test]
    fn test_buildup_with_every_roll_succeeding() {
        let mut registry = world();
        registry.get_mut(&"china".into()).unwrap().military.readiness = 98.0;
        let buildup = decision(&registry, "military_buildup");

        let fired = process(&mut registry, &"usa".into(), &buildup, &ConsequenceConfig::default(), &mut always());

        assert_eq!(registry.get(&"usa".into()).unwrap().escalation_risk, 5.0);
        // Ally untouched, rivals raised and clamped
        assert_eq!(registry.get(&"uk".into()).unwrap().military.readiness, 50.0);
        assert_eq!(registry.get(&"china".into()).unwrap().military.readiness, 100.0);
        assert_eq!(registry.get(&"russia".into()).unwrap().military.readiness, 55.0);

        let mobilized = fired
            .iter()
            .filter(|c| matches!(c, Consequence::RivalMobilized { .. }))
            .count();
        assert_eq!(mobilized, 2);
        assert!(fired.iter().any(|c| matches!(c, Consequence::WorldReaction { .. })));
    }

    #[test]
    fn test_buildup_with_every_roll_failing() {
        let mut registry = world();
        let buildup = decision(&registry, "military_buildup");
        let fired = process(&mut registry, &"usa".into(), &buildup, &ConsequenceConfig::default(), &mut never());

        assert_eq!(fired.len(), 1);
        assert_eq!(registry.get(&"usa".into()).unwrap().escalation_risk, 5.0);
        assert_eq!(registry.get(&"china".into()).unwrap().military.readiness, 50.0);
        assert!(registry.news().is_empty());
    }

    #[test]
    fn test_austerity_protests_need_high_unrest() {
        let mut registry = world();
        let austerity = decision(&registry, "austerity");
        let config = ConsequenceConfig::default();

        registry.get_mut(&"usa".into()).unwrap().opinion.unrest = 40.0;
        let fired = process(&mut registry, &"usa".into(), &austerity, &config, &mut always());
        assert!(!fired.iter().any(|c| matches!(c, Consequence::AusterityProtests { .. })));

        registry.get_mut(&"usa".into()).unwrap().opinion.unrest = 45.0;
        let fired = process(&mut registry, &"usa".into(), &austerity, &config, &mut always());
        assert!(fired.iter().any(|c| matches!(c, Consequence::AusterityProtests { .. })));
        assert_eq!(registry.get(&"usa".into()).unwrap().opinion.unrest, 55.0);
    }

    #[test]
    fn test_stimulus_steadies_allies_only() {
        let mut registry = world();
        let stimulus = decision(&registry, "stimulus");
        process(&mut registry, &"usa".into(), &stimulus, &ConsequenceConfig::default(), &mut never());

        assert_eq!(registry.get(&"uk".into()).unwrap().economy.stability, 52.0);
        assert_eq!(registry.get(&"usa".into()).unwrap().economy.stability, 50.0);
        assert_eq!(registry.get(&"china".into()).unwrap().economy.stability, 50.0);
    }

    #[test]
    fn test_unaligned_stimulus_has_no_ally_effect() {
        let mut registry = world();
        let stimulus = find(&registry, &"china".into(), "stimulus", 30.0).unwrap();
        let fired = process(&mut registry, &"china".into(), &stimulus, &ConsequenceConfig::default(), &mut never());
        assert!(fired.is_empty());
        assert_eq!(registry.get(&"russia".into()).unwrap().economy.stability, 50.0);
    }

    #[test]
    fn test_crackdown_condemned_by_popular_governments() {
        let mut registry = world();
        registry.get_mut(&"uk".into()).unwrap().opinion.approval = 60.0;
        let crackdown = decision(&registry, "crackdown");
        let fired = process(&mut registry, &"usa".into(), &crackdown, &ConsequenceConfig::default(), &mut always());

        let condemners: Vec<&str> = fired
            .iter()
            .filter_map(|c| match c {
                Consequence::Condemnation { by, .. } => Some(by.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(condemners, vec!["uk"]);
        let item = registry.news().all().find(|n| n.category == NewsCategory::Diplomatic).unwrap();
        assert_eq!(item.actors, vec!["United Kingdom", "United States"]);
    }

    #[test]
    fn test_diplomacy_deescalates() {
        let mut registry = world();
        registry.get_mut(&"usa".into()).unwrap().escalation_risk = 2.0;
        let outreach = decision(&registry, "diplomacy_china");
        process(&mut registry, &"usa".into(), &outreach, &ConsequenceConfig::default(), &mut never());
        assert_eq!(registry.get(&"usa".into()).unwrap().escalation_risk, 0.0);
    }

    #[test]
    fn test_research_spills_into_gdp_when_advanced() {
        let mut registry = world();
        let research = decision(&registry, "research_funding");
        let config = ConsequenceConfig::default();

        process(&mut registry, &"usa".into(), &research, &config, &mut always());
        assert_eq!(registry.get(&"usa".into()).unwrap().economy.gdp, 1000.0);

        registry.get_mut(&"usa".into()).unwrap().technology = 75.0;
        let fired = process(&mut registry, &"usa".into(), &research, &config, &mut always());
        assert!(fired.contains(&Consequence::TechGrowth { country: "usa".into() }));
        assert_eq!(registry.get(&"usa".into()).unwrap().economy.gdp, 1020.0);
    }
}
