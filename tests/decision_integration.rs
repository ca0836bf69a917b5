//! Integration tests for decision resolution
//!
//! These tests drive the standard world through `Simulation`:
//! - Effects land on the actor (and target) with clamping
//! - Consequences ripple to third parties
//! - Targeted options follow the current relation scores
//! - Alliance queries on the seeded blocs

use global_dominion::consequences::Consequence;
use global_dominion::core::config::SimulationConfig;
use global_dominion::core::error::DominionError;
use global_dominion::core::types::{AllianceId, CountryId};
use global_dominion::simulation::Simulation;
use rand::rngs::mock::StepRng;

fn seeded() -> Simulation {
    Simulation::seeded(SimulationConfig::default(), 7).unwrap()
}

/// Every probabilistic roll succeeds
fn always() -> Simulation {
    Simulation::with_rng(SimulationConfig::default(), StepRng::new(0, 0)).unwrap()
}

// ============================================================================
// Effect Resolution
// ============================================================================

#[test]
fn test_austerity_on_the_united_states() {
    let mut sim = seeded();
    let usa = CountryId::new("usa");

    let outcome = sim.decide(&usa, "austerity").unwrap();
    assert_eq!(outcome.applied.actor, usa);

    let country = sim.country(&usa).unwrap();
    assert_eq!(country.economy.gdp, 25000.0);
    assert_eq!(country.economy.debt, 26350.0);
    assert_eq!(country.opinion.approval, 35.0);
    assert_eq!(country.opinion.unrest, 30.0);

    // Unrest stays under the protest threshold
    assert!(!outcome
        .consequences
        .iter()
        .any(|c| matches!(c, Consequence::AusterityProtests { .. })));
}

#[test]
fn test_decision_is_published() {
    let mut sim = seeded();
    let usa = CountryId::new("usa");
    let decision = sim.find_decision(&usa, "stimulus").unwrap();

    let outcome = sim.execute_decision(&decision, &usa).unwrap();
    let seq = outcome.applied.news_seq;

    let item = sim.all_news().into_iter().find(|n| n.seq == seq).unwrap();
    assert_eq!(item.headline, "Economic Stimulus");
    assert_eq!(item.actors[0], "United States");
    assert!(item.description.starts_with("United States has decided to"));
}

#[test]
fn test_bounded_stats_clamp_at_the_top() {
    let mut sim = seeded();
    let usa = CountryId::new("usa");
    for _ in 0..20 {
        sim.decide(&usa, "social_programs").unwrap();
    }
    let country = sim.country(&usa).unwrap();
    assert_eq!(country.opinion.approval, 100.0);
    assert_eq!(country.opinion.unrest, 0.0);
    assert!(sim.registry().all_stats_valid());
}

#[test]
fn test_unknown_actor_changes_nothing() {
    let mut sim = seeded();
    let before = serde_json::to_value(sim.countries()).unwrap();
    let published = sim.registry().news().published();

    let decision = sim.find_decision(&"usa".into(), "stimulus").unwrap();
    let err = sim.execute_decision(&decision, &"atlantis".into()).unwrap_err();
    assert!(matches!(err, DominionError::UnknownCountry(_)));

    assert_eq!(serde_json::to_value(sim.countries()).unwrap(), before);
    assert_eq!(sim.registry().news().published(), published);
}

// ============================================================================
// Consequences
// ============================================================================

/// With every roll succeeding, a buildup raises the actor's escalation by 5
/// and readiness by 5 for every country outside its alliance
#[test]
fn test_military_buildup_provokes_rivals() {
    let mut sim = always();
    let usa = CountryId::new("usa");
    let before: Vec<(CountryId, Option<AllianceId>, f64)> = sim
        .countries()
        .iter()
        .map(|c| (c.id.clone(), c.alliance.clone(), c.military.readiness))
        .collect();
    let escalation = sim.country(&usa).unwrap().escalation_risk;

    let outcome = sim.decide(&usa, "military_buildup").unwrap();

    assert_eq!(sim.country(&usa).unwrap().escalation_risk, escalation + 5.0);
    let nato = Some(AllianceId::new("NATO"));
    for (id, alliance, readiness) in before {
        if id == usa {
            continue;
        }
        let after = sim.country(&id).unwrap().military.readiness;
        if alliance == nato {
            assert_eq!(after, readiness, "{} shares the alliance", id);
        } else {
            assert_eq!(after, (readiness + 5.0).min(100.0), "{} is a rival", id);
            assert!(outcome
                .consequences
                .contains(&Consequence::RivalMobilized { country: id.clone(), against: usa.clone() }));
        }
    }
}

#[test]
fn test_diplomacy_deescalates() {
    let mut sim = always();
    let china = CountryId::new("china");
    sim.registry_mut().get_mut(&china).unwrap().escalation_risk = 10.0;

    let outcome = sim.decide(&china, "diplomacy_russia").unwrap();
    assert_eq!(sim.country(&china).unwrap().escalation_risk, 7.0);
    assert!(outcome
        .consequences
        .iter()
        .any(|c| matches!(c, Consequence::Deescalation { .. })));
}

// ============================================================================
// Targeted Options
// ============================================================================

#[test]
fn test_sanctions_follow_relations() {
    let mut sim = seeded();
    let usa = CountryId::new("usa");
    let russia = CountryId::new("russia");
    sim.registry_mut()
        .get_mut(&usa)
        .unwrap()
        .set_relation(russia.clone(), 10.0);

    let country = sim.country(&usa).unwrap().clone();
    let options = sim.available_decisions(&usa);
    for other in sim.countries().iter().filter(|c| c.id != usa) {
        let id = format!("sanctions_{}", other.id);
        let offered = options.iter().any(|d| d.id == id);
        assert_eq!(offered, country.relation(&other.id) < 30.0, "{}", id);
        assert!(options.iter().any(|d| d.id == format!("diplomacy_{}", other.id)));
    }

    let gdp = sim.country(&russia).unwrap().economy.gdp;
    sim.decide(&usa, "sanctions_russia").unwrap();
    assert_eq!(sim.country(&usa).unwrap().relation(&russia), -5.0);
    assert_eq!(sim.country(&russia).unwrap().economy.gdp, gdp - gdp * 5.0 / 100.0);
}

#[test]
fn test_available_decisions_idempotent() {
    let sim = seeded();
    for country in sim.countries() {
        let first: Vec<String> = sim.available_decisions(&country.id).into_iter().map(|d| d.id).collect();
        let second: Vec<String> = sim.available_decisions(&country.id).into_iter().map(|d| d.id).collect();
        assert_eq!(first, second);
        assert!(first.len() >= 7 + 9);
    }
    assert!(sim.available_decisions(&"atlantis".into()).is_empty());
}

// ============================================================================
// Alliances
// ============================================================================

#[test]
fn test_collective_defense_on_standard_world() {
    let sim = seeded();
    let nato = AllianceId::new("NATO");

    let defenders = sim.collective_defense(&nato, &"usa".into()).unwrap();
    let ids: Vec<&str> = defenders.iter().map(|c| c.as_str()).collect();
    assert_eq!(ids, vec!["uk", "germany", "france"]);

    assert!(sim.collective_defense(&nato, &"china".into()).unwrap().is_empty());
    assert!(sim.collective_defense(&"SEATO".into(), &"usa".into()).is_err());
}

#[test]
fn test_membership_changes_update_summary() {
    let mut sim = seeded();
    let nato = AllianceId::new("NATO");
    assert_eq!(sim.alliance_summary(&nato).unwrap().members, 4);

    assert!(sim.add_alliance_member(&nato, &"australia".into()).unwrap());
    assert!(!sim.add_alliance_member(&nato, &"australia".into()).unwrap());
    assert_eq!(sim.alliance_summary(&nato).unwrap().members, 5);
    assert_eq!(sim.country(&"australia".into()).unwrap().alliance, Some(nato.clone()));

    assert!(sim.remove_alliance_member(&nato, &"australia".into()).unwrap());
    assert_eq!(sim.country(&"australia".into()).unwrap().alliance, None);
    assert_eq!(sim.alliance_summary(&nato).unwrap().members, 4);
}

#[test]
fn test_eurozone_gdp_tracks_member_economies() {
    let mut sim = seeded();
    let eu = AllianceId::new("EU");
    assert_eq!(sim.currency_union_gdp(&eu).unwrap(), 7100.0);

    sim.decide(&"germany".into(), "stimulus").unwrap();
    assert_eq!(sim.currency_union_gdp(&eu).unwrap(), 4200.0 + 4200.0 * 5.0 / 100.0 + 2900.0);
    assert!(sim.currency_union_gdp(&"SEATO".into()).is_err());
}
