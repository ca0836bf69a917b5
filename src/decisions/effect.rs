//! Effects: a single stat change and the clamp discipline that applies it

use serde::{Deserialize, Serialize};

use crate::core::types::CountryId;
use crate::world::country::{Country, Stat};

/// How a magnitude combines with the current value
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectMode {
    /// `value + magnitude`
    Absolute,
    /// `value + value * magnitude / 100`
    RelativePercent,
}

/// Which country an effect lands on
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectScope {
    /// The country issuing the decision
    Actor,
    /// The decision's target country
    Target,
}

/// One stat change carried by a decision or a world event
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    pub stat: Stat,
    pub magnitude: f64,
    pub mode: EffectMode,
    pub scope: EffectScope,
}

impl Effect {
    /// Flat change on the actor
    pub const fn absolute(stat: Stat, magnitude: f64) -> Self {
        Self {
            stat,
            magnitude,
            mode: EffectMode::Absolute,
            scope: EffectScope::Actor,
        }
    }

    /// Percentage change on the actor
    pub const fn percent(stat: Stat, magnitude: f64) -> Self {
        Self {
            stat,
            magnitude,
            mode: EffectMode::RelativePercent,
            scope: EffectScope::Actor,
        }
    }

    /// Same effect, landing on the decision target instead
    pub const fn on_target(self) -> Self {
        Self {
            scope: EffectScope::Target,
            ..self
        }
    }

    /// Unclamped result of applying this effect to `current`
    pub fn combine(&self, current: f64) -> f64 {
        match self.mode {
            EffectMode::Absolute => current + self.magnitude,
            EffectMode::RelativePercent => current + current * self.magnitude / 100.0,
        }
    }
}

/// Apply one effect to a resolved country.
///
/// `counterpart` is the other party for relation effects; relation effects
/// without one are skipped. Returns the (before, after) values when the
/// effect landed.
pub fn apply_effect(
    country: &mut Country,
    effect: &Effect,
    counterpart: Option<&CountryId>,
) -> Option<(f64, f64)> {
    if effect.stat == Stat::Relation {
        let other = counterpart?;
        let before = country.relation(other);
        let after = effect.combine(before);
        country.set_relation(other.clone(), after);
        return Some((before, after));
    }

    let before = country.stat(effect.stat)?;
    country.set_stat(effect.stat, effect.combine(before));
    let after = country.stat(effect.stat)?;
    Some((before, after))
}

/// Severity of a bundle of effects: sum of absolute magnitudes / 100, in [0, 1]
pub fn severity_of(effects: &[Effect]) -> f64 {
    let total: f64 = effects.iter().map(|e| e.magnitude.abs()).sum();
    (total / 100.0).clamp(0.0, 1.0)
}
