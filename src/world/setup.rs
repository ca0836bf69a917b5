//! Standard starting world: ten countries, their relations and two blocs

use rand::Rng;

use crate::core::config::SimulationConfig;
use crate::core::error::Result;
use crate::core::types::CountryId;
use crate::news::{NewsCategory, NewsEvent};
use crate::world::alliance::{Alliance, AllianceType};
use crate::world::country::{
    Advisor, Country, Doctrine, Economy, Expertise, GovernmentType, Military, PublicOpinion,
};
use crate::world::regions::RegionalPolitics;
use crate::world::registry::CountryRegistry;

/// Country that starts under player control
pub const DEFAULT_PLAYER: &str = "usa";

/// Static starting figures for one country
struct CountrySeed {
    id: &'static str,
    name: &'static str,
    flag: &'static str,
    government: GovernmentType,
    gdp: f64,
    debt: f64,
    stability: f64,
    strength: f64,
    nuclear: bool,
    readiness: f64,
    approval: f64,
    unrest: f64,
}

const COUNTRY_SEEDS: &[CountrySeed] = &[
    CountrySeed { id: "usa", name: "United States", flag: "🇺🇸", government: GovernmentType::Federal,
        gdp: 25000.0, debt: 31000.0, stability: 65.0, strength: 100.0, nuclear: true, readiness: 85.0, approval: 45.0, unrest: 25.0 },
    CountrySeed { id: "china", name: "China", flag: "🇨🇳", government: GovernmentType::Authoritarian,
        gdp: 18000.0, debt: 8000.0, stability: 75.0, strength: 85.0, nuclear: true, readiness: 80.0, approval: 70.0, unrest: 15.0 },
    CountrySeed { id: "russia", name: "Russia", flag: "🇷🇺", government: GovernmentType::Authoritarian,
        gdp: 2000.0, debt: 300.0, stability: 45.0, strength: 80.0, nuclear: true, readiness: 75.0, approval: 60.0, unrest: 30.0 },
    CountrySeed { id: "uk", name: "United Kingdom", flag: "🇬🇧", government: GovernmentType::Democracy,
        gdp: 3200.0, debt: 2800.0, stability: 60.0, strength: 60.0, nuclear: true, readiness: 70.0, approval: 40.0, unrest: 35.0 },
    CountrySeed { id: "germany", name: "Germany", flag: "🇩🇪", government: GovernmentType::Federal,
        gdp: 4200.0, debt: 2500.0, stability: 70.0, strength: 50.0, nuclear: false, readiness: 55.0, approval: 55.0, unrest: 20.0 },
    CountrySeed { id: "france", name: "France", flag: "🇫🇷", government: GovernmentType::Democracy,
        gdp: 2900.0, debt: 3100.0, stability: 55.0, strength: 55.0, nuclear: true, readiness: 65.0, approval: 35.0, unrest: 45.0 },
    CountrySeed { id: "japan", name: "Japan", flag: "🇯🇵", government: GovernmentType::Democracy,
        gdp: 4900.0, debt: 12000.0, stability: 65.0, strength: 45.0, nuclear: false, readiness: 60.0, approval: 50.0, unrest: 15.0 },
    CountrySeed { id: "india", name: "India", flag: "🇮🇳", government: GovernmentType::Federal,
        gdp: 3500.0, debt: 2000.0, stability: 55.0, strength: 65.0, nuclear: true, readiness: 60.0, approval: 55.0, unrest: 30.0 },
    CountrySeed { id: "brazil", name: "Brazil", flag: "🇧🇷", government: GovernmentType::Federal,
        gdp: 1900.0, debt: 1500.0, stability: 45.0, strength: 40.0, nuclear: false, readiness: 45.0, approval: 40.0, unrest: 40.0 },
    CountrySeed { id: "australia", name: "Australia", flag: "🇦🇺", government: GovernmentType::Democracy,
        gdp: 1700.0, debt: 800.0, stability: 70.0, strength: 35.0, nuclear: false, readiness: 55.0, approval: 50.0, unrest: 15.0 },
];

/// Historic partnerships. Listed pairs start with warm relations.
const PARTNERS: &[(&str, &[&str])] = &[
    ("usa", &["uk", "germany", "france", "japan", "australia"]),
    ("china", &["russia"]),
    ("russia", &["china"]),
];

const CABINET: &[(&str, Expertise)] = &[
    ("Defence Secretary", Expertise::Military),
    ("Finance Minister", Expertise::Economy),
    ("Foreign Minister", Expertise::ForeignPolicy),
    ("Intelligence Director", Expertise::Intelligence),
    ("Interior Minister", Expertise::Domestic),
];

fn are_partners(a: &str, b: &str) -> bool {
    PARTNERS
        .iter()
        .any(|(id, partners)| *id == a && partners.contains(&b))
}

fn build_country<R: Rng + ?Sized>(seed: &CountrySeed, rng: &mut R) -> Country {
    let mut country = Country::new(seed.id, seed.name);
    country.flag = seed.flag.to_string();
    country.government.kind = seed.government;
    country.government.advisors = CABINET
        .iter()
        .map(|(title, expertise)| Advisor {
            name: title.to_string(),
            expertise: *expertise,
            competence: rng.gen_range(40..=90),
            aggressive: rng.gen_bool(0.3),
        })
        .collect();

    country.economy = Economy {
        gdp: seed.gdp,
        debt: seed.debt,
        stability: seed.stability,
    };
    country.military = Military {
        strength: seed.strength,
        readiness: seed.readiness,
        nuclear_capable: seed.nuclear,
    };
    country.opinion = PublicOpinion {
        approval: seed.approval,
        unrest: seed.unrest,
    };

    country.escalation_risk = rng.gen_range(0.0..20.0);
    country.technology = rng.gen_range(40.0..70.0);
    country.resources = rng.gen_range(40.0..80.0);
    country.doctrine = Doctrine {
        peaceful: rng.gen(),
        expansionist: rng.gen(),
        protectionist: rng.gen(),
    };
    country
}

/// Seed every ordered pair with a starting relation
fn seed_relations<R: Rng + ?Sized>(countries: &mut [Country], rng: &mut R) {
    let snapshot: Vec<(CountryId, GovernmentType)> = countries
        .iter()
        .map(|c| (c.id.clone(), c.government.kind))
        .collect();

    for country in countries.iter_mut() {
        for (other_id, other_gov) in &snapshot {
            if *other_id == country.id {
                continue;
            }
            let score = if are_partners(country.id.as_str(), other_id.as_str()) {
                rng.gen_range(70.0..90.0)
            } else if country.government.kind == *other_gov {
                rng.gen_range(50.0..70.0)
            } else {
                rng.gen_range(30.0..60.0)
            };
            country.set_relation(other_id.clone(), score);
        }
    }
}

/// The ten-country starting world with NATO, the EU and the UK's regions
/// registered, the default player selected and a welcome item published
pub fn standard_world<R: Rng + ?Sized>(rng: &mut R, config: &SimulationConfig) -> Result<CountryRegistry> {
    let mut countries: Vec<Country> = COUNTRY_SEEDS.iter().map(|s| build_country(s, rng)).collect();
    seed_relations(&mut countries, rng);

    let mut registry = CountryRegistry::new(config.news_capacity);
    registry.news_mut().set_date(0, config.start_year);
    for country in countries {
        registry.insert(country)?;
    }

    // NATO first so it stays the primary affiliation of EU members
    registry.register_alliance(
        Alliance::new("NATO", "North Atlantic Treaty Organization", AllianceType::Military)
            .with_collective_defense()
            .with_members(["usa", "uk", "germany", "france"]),
    );
    registry.register_alliance(
        Alliance::new("EU", "European Union", AllianceType::Economic)
            .with_economic_integration()
            .with_members(["germany", "france"])
            .with_currency_union(["germany", "france"]),
    );
    registry.register_regions(RegionalPolitics::united_kingdom())?;

    registry.set_player(&CountryId::new(DEFAULT_PLAYER))?;

    registry.publish(
        NewsEvent::new(NewsCategory::Announcement, "Welcome to Global Dominion")
            .actor("Global")
            .description(
                "You are now in control. Make decisions wisely to lead your nation to prosperity.",
            )
            .severity(0.5),
    );

    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::AllianceId;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn world() -> CountryRegistry {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        standard_world(&mut rng, &SimulationConfig::default()).unwrap()
    }

    #[test]
    fn test_ten_countries_in_fixed_order() {
        let registry = world();
        let ids: Vec<String> = registry.ids().into_iter().map(|id| id.0).collect();
        assert_eq!(
            ids,
            vec!["usa", "china", "russia", "uk", "germany", "france", "japan", "india", "brazil", "australia"]
        );
    }

    #[test]
    fn test_usa_is_the_player() {
        let registry = world();
        assert_eq!(registry.player().map(|p| p.as_str()), Some("usa"));
        assert_eq!(registry.iter().filter(|c| c.is_player_controlled).count(), 1);
    }

    #[test]
    fn test_seeded_stats_are_in_range() {
        let registry = world();
        assert!(registry.all_stats_valid());
        for country in registry.iter() {
            assert!((0.0..20.0).contains(&country.escalation_risk));
            assert!((40.0..70.0).contains(&country.technology));
            assert!((40.0..80.0).contains(&country.resources));
            assert_eq!(country.relations.len(), 9);
        }
    }

    #[test]
    fn test_partner_relations_are_warm() {
        let registry = world();
        let china = registry.get(&"china".into()).unwrap();
        assert!(china.relation(&"russia".into()) >= 70.0);
        let usa = registry.get(&"usa".into()).unwrap();
        assert!(usa.relation(&"japan".into()) >= 70.0);
    }

    #[test]
    fn test_nato_stays_primary_for_eu_members() {
        let registry = world();
        let germany = registry.get(&"germany".into()).unwrap();
        assert_eq!(germany.alliance, Some(AllianceId::new("NATO")));
        assert!(registry.alliance(&"EU".into()).unwrap().is_member(&germany.id));
        assert!(registry.get(&"australia".into()).unwrap().alliance.is_none());
    }

    #[test]
    fn test_eurozone_and_uk_regions() {
        let registry = world();
        assert_eq!(registry.currency_union_gdp(&"EU".into()).unwrap(), 4200.0 + 2900.0);
        assert_eq!(registry.currency_union_gdp(&"NATO".into()).unwrap(), 0.0);

        let uk = registry.regions_of(&"uk".into()).unwrap();
        assert_eq!(uk.total_population(), 66_500_000);
        assert!(registry.regions_of(&"usa".into()).is_none());
    }

    #[test]
    fn test_welcome_news_published() {
        let registry = world();
        assert_eq!(registry.news().len(), 1);
        let welcome = registry.news().newest().unwrap();
        assert_eq!(welcome.headline, "Welcome to Global Dominion");
        assert_eq!((welcome.turn, welcome.year), (0, 2024));
    }

    #[test]
    fn test_same_seed_same_world() {
        let a = world();
        let b = world();
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.technology, y.technology);
            assert_eq!(x.relations, y.relations);
        }
    }
}
