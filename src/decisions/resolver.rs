//! Effect resolver - applies a decision to the registry and announces it

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::config::CostPolicy;
use crate::core::error::{DominionError, Result};
use crate::core::types::CountryId;
use crate::decisions::catalog::Decision;
use crate::decisions::effect::{apply_effect, EffectScope};
use crate::news::NewsEvent;
use crate::world::country::Stat;
use crate::world::registry::CountryRegistry;

/// Record of one effect that landed
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppliedEffect {
    pub country: CountryId,
    pub stat: Stat,
    /// Other party of a relation change
    pub counterpart: Option<CountryId>,
    pub before: f64,
    pub after: f64,
}

/// Outcome of resolving one decision's effects
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AppliedResult {
    pub decision_id: String,
    pub actor: CountryId,
    pub applied: Vec<AppliedEffect>,
    /// Effects skipped because their country could not be resolved
    pub skipped: usize,
    /// Amount added to the actor's debt by the cost policy
    pub cost_charged: f64,
    /// Sequence number of the announcement
    pub news_seq: u64,
}

/// Refuse a costed decision whose effects plus cost would push the actor's
/// debt/gdp past the ceiling. Works on a copy; the registry is untouched.
fn check_affordable(
    registry: &CountryRegistry,
    actor: &CountryId,
    decision: &Decision,
    debt_ceiling: f64,
) -> Result<()> {
    let Some(cost) = decision.cost else {
        return Ok(());
    };
    let mut projected = registry
        .get(actor)
        .cloned()
        .ok_or_else(|| DominionError::UnknownCountry(actor.clone()))?;

    for effect in decision.effects.iter().filter(|e| e.scope == EffectScope::Actor) {
        apply_effect(&mut projected, effect, decision.target.as_ref());
    }
    projected.adjust_stat(Stat::Debt, cost);

    let ratio = projected.debt_ratio();
    if ratio > debt_ceiling {
        return Err(DominionError::Unaffordable {
            actor: actor.clone(),
            decision: decision.id.clone(),
            ratio,
        });
    }
    Ok(())
}

/// Apply every effect of `decision` for `actor`, charge its cost per
/// `cost_policy` and publish the announcement.
///
/// Unknown actors and unaffordable decisions fail before anything is
/// mutated. Effects whose country cannot be resolved are skipped.
pub fn apply_decision(
    registry: &mut CountryRegistry,
    actor: &CountryId,
    decision: &Decision,
    cost_policy: CostPolicy,
    debt_ceiling: f64,
) -> Result<AppliedResult> {
    let actor_name = registry
        .get(actor)
        .map(|c| c.name.clone())
        .ok_or_else(|| DominionError::UnknownCountry(actor.clone()))?;

    if cost_policy == CostPolicy::Enforce {
        check_affordable(registry, actor, decision, debt_ceiling)?;
    }

    let mut applied = Vec::with_capacity(decision.effects.len());
    let mut skipped = 0;

    for effect in &decision.effects {
        let (country_id, counterpart) = match effect.scope {
            EffectScope::Actor => (Some(actor), decision.target.as_ref()),
            EffectScope::Target => (decision.target.as_ref(), Some(actor)),
        };
        let Some(country_id) = country_id else {
            skipped += 1;
            continue;
        };
        if effect.stat == Stat::Relation && !counterpart.is_some_and(|c| registry.contains(c)) {
            debug!(decision = %decision.id, "Relation counterpart unknown, skipped");
            skipped += 1;
            continue;
        }
        let Some(country) = registry.get_mut(country_id) else {
            debug!(decision = %decision.id, country = %country_id, "Effect target unknown, skipped");
            skipped += 1;
            continue;
        };

        match apply_effect(country, effect, counterpart) {
            Some((before, after)) => applied.push(AppliedEffect {
                country: country_id.clone(),
                stat: effect.stat,
                counterpart: if effect.stat == Stat::Relation {
                    counterpart.cloned()
                } else {
                    None
                },
                before,
                after,
            }),
            None => skipped += 1,
        }
    }

    let mut cost_charged = 0.0;
    if let (Some(cost), CostPolicy::ChargeDebt | CostPolicy::Enforce) = (decision.cost, cost_policy) {
        if let Some(country) = registry.get_mut(actor) {
            country.adjust_stat(Stat::Debt, cost);
            cost_charged = cost;
        }
    }

    let news_seq = registry.publish(
        NewsEvent::new(decision.category.news_category(), decision.title.clone())
            .actor(actor_name.clone())
            .description(format!(
                "{} has decided to {}",
                actor_name,
                decision.description.to_lowercase()
            ))
            .severity(decision.severity()),
    );

    debug!(
        actor = %actor,
        decision = %decision.id,
        applied = applied.len(),
        skipped,
        "Decision resolved"
    );

    Ok(AppliedResult {
        decision_id: decision.id.clone(),
        actor: actor.clone(),
        applied,
        skipped,
        cost_charged,
        news_seq,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decisions::catalog::{available, find};
    use crate::news::NewsCategory;
    use crate::world::country::Country;

    fn registry() -> CountryRegistry {
        let mut registry = CountryRegistry::default();
        let mut usa = Country::new("usa", "United States");
        usa.economy.gdp = 25000.0;
        usa.economy.debt = 31000.0;
        usa.opinion.approval = 45.0;
        usa.opinion.unrest = 25.0;
        registry.insert(usa).unwrap();
        registry.insert(Country::new("china", "China")).unwrap();
        registry
    }

    fn decision(registry: &CountryRegistry, id: &str) -> Decision {
        find(registry, &"usa".into(), id, 30.0).unwrap()
    }

    #[test]
    fn test_austerity_scenario() {
        let mut registry = registry();
        let austerity = decision(&registry, "austerity");
        let result = apply_decision(&mut registry, &"usa".into(), &austerity, CostPolicy::Ignore, 1.5).unwrap();

        let usa = registry.get(&"usa".into()).unwrap();
        assert_eq!(usa.economy.debt, 26350.0);
        assert_eq!(usa.opinion.approval, 35.0);
        assert_eq!(usa.opinion.unrest, 30.0);
        assert_eq!(result.applied.len(), 3);
        assert_eq!(result.skipped, 0);
    }

    #[test]
    fn test_announcement_is_published() {
        let mut registry = registry();
        let stimulus = decision(&registry, "stimulus");
        apply_decision(&mut registry, &"usa".into(), &stimulus, CostPolicy::Ignore, 1.5).unwrap();

        let news = registry.news().newest().unwrap();
        assert_eq!(news.headline, "Economic Stimulus");
        assert_eq!(
            news.description,
            "United States has decided to inject money into the economy to boost growth"
        );
        assert_eq!(news.category, NewsCategory::Economic);
        assert!((news.severity - 0.18).abs() < 1e-9);
    }

    #[test]
    fn test_sanctions_hit_both_sides() {
        let mut registry = registry();
        registry.get_mut(&"usa".into()).unwrap().set_relation("china".into(), 20.0);
        let sanctions = decision(&registry, "sanctions_china");
        apply_decision(&mut registry, &"usa".into(), &sanctions, CostPolicy::Ignore, 1.5).unwrap();

        let usa = registry.get(&"usa".into()).unwrap();
        assert_eq!(usa.relation(&"china".into()), 5.0);
        assert_eq!(usa.escalation_risk, 8.0);
        assert_eq!(registry.get(&"china".into()).unwrap().economy.gdp, 950.0);
    }

    #[test]
    fn test_unknown_target_is_skipped() {
        let mut registry = registry();
        let mut outreach = decision(&registry, "diplomacy_china");
        outreach.target = Some(CountryId::new("atlantis"));
        let mut sanction = outreach.clone();
        sanction.effects = vec![crate::decisions::effect::Effect::percent(Stat::Gdp, -5.0).on_target()];

        let result = apply_decision(&mut registry, &"usa".into(), &sanction, CostPolicy::Ignore, 1.5).unwrap();
        assert_eq!(result.skipped, 1);
        assert!(result.applied.is_empty());
    }

    #[test]
    fn test_relation_toward_unknown_country_is_skipped() {
        let mut registry = registry();
        let mut outreach = decision(&registry, "diplomacy_china");
        outreach.target = Some(CountryId::new("atlantis"));

        let result = apply_decision(&mut registry, &"usa".into(), &outreach, CostPolicy::Ignore, 1.5).unwrap();
        assert_eq!(result.skipped, 1);
        assert!(result.applied.is_empty());
        let usa = registry.get(&"usa".into()).unwrap();
        assert!(!usa.relations.contains_key(&CountryId::new("atlantis")));
    }

    #[test]
    fn test_unknown_actor_is_rejected_without_news() {
        let mut registry = registry();
        let stimulus = decision(&registry, "stimulus");
        let err = apply_decision(&mut registry, &"atlantis".into(), &stimulus, CostPolicy::Ignore, 1.5).unwrap_err();
        assert!(matches!(err, DominionError::UnknownCountry(_)));
        assert!(registry.news().is_empty());
    }

    #[test]
    fn test_charge_debt_adds_cost() {
        let mut registry = registry();
        let research = decision(&registry, "research_funding");
        let result = apply_decision(&mut registry, &"usa".into(), &research, CostPolicy::ChargeDebt, 1.5).unwrap();
        assert_eq!(result.cost_charged, 40.0);
        // 31000 * 1.05 + 40
        assert_eq!(registry.get(&"usa".into()).unwrap().economy.debt, 32590.0);
    }

    #[test]
    fn test_enforce_rejects_without_mutation() {
        let mut registry = registry();
        let stimulus = decision(&registry, "stimulus");
        // (31000 * 1.1 + 100) / (25000 * 1.05) = 1.3029
        let err = apply_decision(&mut registry, &"usa".into(), &stimulus, CostPolicy::Enforce, 1.2).unwrap_err();
        assert!(matches!(err, DominionError::Unaffordable { .. }));

        let usa = registry.get(&"usa".into()).unwrap();
        assert_eq!(usa.economy.debt, 31000.0);
        assert_eq!(usa.economy.gdp, 25000.0);
        assert!(registry.news().is_empty());
    }

    #[test]
    fn test_enforce_counts_the_decisions_own_effects() {
        let stimulus = decision(&registry(), "stimulus");

        // Before effects the ratio is only 1.244; after them it is 1.3029
        let mut registry = registry();
        let err = apply_decision(&mut registry, &"usa".into(), &stimulus, CostPolicy::Enforce, 1.3).unwrap_err();
        match err {
            DominionError::Unaffordable { ratio, .. } => assert!((ratio - 34200.0 / 26250.0).abs() < 1e-9),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(registry.get(&"usa".into()).unwrap().economy.debt, 31000.0);

        let mut registry = self::registry();
        apply_decision(&mut registry, &"usa".into(), &stimulus, CostPolicy::Enforce, 1.31).unwrap();
        let usa = registry.get(&"usa".into()).unwrap();
        assert_eq!(usa.economy.debt, 34200.0);
        assert!(usa.debt_ratio() <= 1.31);
    }

    #[test]
    fn test_enforce_ignores_free_decisions() {
        let mut registry = registry();
        let austerity = decision(&registry, "austerity");
        assert!(apply_decision(&mut registry, &"usa".into(), &austerity, CostPolicy::Enforce, 0.1).is_ok());
    }

    #[test]
    fn test_bounded_stats_stay_in_range() {
        let mut registry = registry();
        let usa = CountryId::new("usa");
        for decision in available(&registry, &usa, 30.0) {
            for _ in 0..20 {
                apply_decision(&mut registry, &usa, &decision, CostPolicy::Ignore, 1.5).unwrap();
            }
        }
        assert!(registry.all_stats_valid());
    }
}
