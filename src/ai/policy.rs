//! Policy framework for AI-controlled countries

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::decisions::Decision;
use crate::world::country::Country;

/// Named AI policies selectable per country or as the world default
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    /// Uniform choice among every available option
    #[default]
    Random,
    /// Weighs options against current weaknesses and doctrine
    UtilityBased,
    /// Fixed rules for unrest and over-mobilized militaries
    Scripted,
}

impl PolicyKind {
    pub const ALL: [PolicyKind; 3] = [PolicyKind::Random, PolicyKind::UtilityBased, PolicyKind::Scripted];

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "random" => Some(PolicyKind::Random),
            "utility" | "utility_based" => Some(PolicyKind::UtilityBased),
            "scripted" => Some(PolicyKind::Scripted),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PolicyKind::Random => "random",
            PolicyKind::UtilityBased => "utility_based",
            PolicyKind::Scripted => "scripted",
        }
    }
}

/// Trait for AI decision-making
pub trait CountryPolicy {
    /// Index into `options` of the decision to take, or None to abstain
    fn choose(&self, actor: &Country, options: &[Decision], rng: &mut dyn RngCore) -> Option<usize>;
}

/// Get the policy implementation for a kind
pub fn get_policy(kind: PolicyKind) -> Box<dyn CountryPolicy> {
    match kind {
        PolicyKind::Random => Box::new(super::random::RandomPolicy),
        PolicyKind::UtilityBased => Box::new(super::utility::UtilityPolicy),
        PolicyKind::Scripted => Box::new(super::scripted::ScriptedPolicy),
    }
}

/// Decide whether `actor` acts this turn and, if so, what it picks.
///
/// The action roll happens first so a country that sits the turn out never
/// consults its policy.
pub fn select_decision(
    policy: &dyn CountryPolicy,
    actor: &Country,
    options: &[Decision],
    action_probability: f64,
    rng: &mut dyn RngCore,
) -> Option<usize> {
    if options.is_empty() || rng.gen::<f64>() >= action_probability {
        return None;
    }
    policy
        .choose(actor, options, rng)
        .filter(|&idx| idx < options.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    struct FirstOption;

    impl CountryPolicy for FirstOption {
        fn choose(&self, _actor: &Country, _options: &[Decision], _rng: &mut dyn RngCore) -> Option<usize> {
            Some(0)
        }
    }

    fn options() -> Vec<Decision> {
        let mut registry = crate::world::CountryRegistry::default();
        registry.insert(Country::new("usa", "United States")).unwrap();
        crate::decisions::available(&registry, &"usa".into(), 30.0)
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(PolicyKind::parse("utility"), Some(PolicyKind::UtilityBased));
        assert_eq!(PolicyKind::parse("Scripted"), Some(PolicyKind::Scripted));
        assert_eq!(PolicyKind::parse("chaotic"), None);
        for kind in PolicyKind::ALL {
            assert_eq!(PolicyKind::parse(kind.name()), Some(kind));
        }
    }

    #[test]
    fn test_action_roll_gates_policy() {
        let actor = Country::new("usa", "United States");
        let options = options();

        let mut always = StepRng::new(0, 0);
        assert_eq!(select_decision(&FirstOption, &actor, &options, 0.4, &mut always), Some(0));

        let mut never = StepRng::new(u64::MAX, 0);
        assert_eq!(select_decision(&FirstOption, &actor, &options, 0.4, &mut never), None);
    }

    #[test]
    fn test_no_options_no_action() {
        let actor = Country::new("usa", "United States");
        let mut always = StepRng::new(0, 0);
        assert_eq!(select_decision(&FirstOption, &actor, &[], 1.0, &mut always), None);
    }
}
