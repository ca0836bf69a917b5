//! Rule-based policy: quell unrest, otherwise flex a strong military

use rand::RngCore;

use crate::ai::policy::CountryPolicy;
use crate::decisions::{Decision, DecisionKind};
use crate::world::country::Country;

const UNREST_LIMIT: f64 = 60.0;
const STRENGTH_LIMIT: f64 = 70.0;
const READINESS_LIMIT: f64 = 70.0;

pub struct ScriptedPolicy;

fn position_of(options: &[Decision], kind: DecisionKind) -> Option<usize> {
    options.iter().position(|d| d.kind == kind)
}

impl CountryPolicy for ScriptedPolicy {
    fn choose(&self, actor: &Country, options: &[Decision], _rng: &mut dyn RngCore) -> Option<usize> {
        if actor.opinion.unrest > UNREST_LIMIT {
            return position_of(options, DecisionKind::Crackdown);
        }
        if actor.military.strength > STRENGTH_LIMIT && actor.military.readiness > READINESS_LIMIT {
            return position_of(options, DecisionKind::MilitaryBuildup);
        }
        None
    }
}
