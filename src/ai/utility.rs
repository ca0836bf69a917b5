//! Utility policy: pick the option that best repairs current weaknesses
//!
//! Each stat gets a desirability in roughly [-1, 1] from the actor's state
//! and doctrine. An option scores the sum of desirability times magnitude
//! over its effects. Negative desirability means the actor wants that stat
//! to fall.

use ordered_float::OrderedFloat;
use rand::RngCore;

use crate::ai::policy::CountryPolicy;
use crate::core::types::CountryId;
use crate::decisions::{Decision, EffectScope};
use crate::world::country::{Country, Stat};

pub struct UtilityPolicy;

/// How much `actor` wants `stat` to rise (negative: to fall)
fn desirability(actor: &Country, stat: Stat, counterpart: Option<&CountryId>) -> f64 {
    let doctrine = &actor.doctrine;
    match stat {
        Stat::Gdp => 0.2 + 0.2 * (1.0 - actor.economy.stability / 100.0),
        Stat::Debt => {
            let excess = (actor.debt_ratio() - 0.6).clamp(0.0, 1.0);
            -(0.1 + excess)
        }
        Stat::Stability => (60.0 - actor.economy.stability).max(0.0) / 60.0,
        Stat::Approval => (60.0 - actor.opinion.approval).max(0.0) / 60.0,
        Stat::Unrest => -(actor.opinion.unrest - 20.0).max(0.0) / 80.0,
        Stat::MilitaryStrength => {
            (60.0 - actor.military.strength).max(0.0) / 60.0 * (0.5 + doctrine.expansionist)
        }
        Stat::Readiness => {
            (60.0 - actor.military.readiness).max(0.0) / 60.0 * (0.5 + doctrine.expansionist)
        }
        Stat::Technology => (70.0 - actor.technology).max(0.0) / 70.0,
        Stat::Resources => (50.0 - actor.resources).max(0.0) / 50.0,
        Stat::Escalation => {
            0.5 * doctrine.expansionist - doctrine.peaceful * (0.5 + actor.escalation_risk / 100.0)
        }
        Stat::Relation => match counterpart {
            Some(other) => {
                let relation = actor.relation(other);
                if relation < 30.0 {
                    // A soured rival: pressure appeals to hawks
                    0.5 * doctrine.peaceful - (1.0 - doctrine.peaceful) * doctrine.protectionist
                } else {
                    doctrine.peaceful * (80.0 - relation).max(0.0) / 80.0
                }
            }
            None => 0.0,
        },
    }
}

/// Utility of `decision` for `actor`
pub fn score(actor: &Country, decision: &Decision) -> f64 {
    decision
        .effects
        .iter()
        .map(|effect| match effect.scope {
            EffectScope::Actor => {
                desirability(actor, effect.stat, decision.target.as_ref()) * effect.magnitude / 10.0
            }
            // Hurting a rival's economy appeals to protectionists
            EffectScope::Target => {
                -actor.doctrine.protectionist * (1.0 - actor.doctrine.peaceful) * effect.magnitude / 10.0
            }
        })
        .sum()
}

impl CountryPolicy for UtilityPolicy {
    fn choose(&self, actor: &Country, options: &[Decision], _rng: &mut dyn RngCore) -> Option<usize> {
        options
            .iter()
            .enumerate()
            .map(|(idx, decision)| (idx, OrderedFloat(score(actor, decision))))
            .filter(|(_, s)| s.0 > 0.0)
            .max_by_key(|(_, s)| *s)
            .map(|(idx, _)| idx)
    }
}
