//! Passive per-turn drift, optional structural pressure and regional politics

use rand::Rng;
use tracing::debug;

use crate::core::config::DriftConfig;
use crate::news::{NewsCategory, NewsEvent};
use crate::world::country::Stat;
use crate::world::registry::CountryRegistry;

/// Stability below which unrest builds and approval erodes
const FRAGILE_STABILITY: f64 = 30.0;
/// Readiness never decays below this
const READINESS_FLOOR: f64 = 20.0;

/// Random walk on gdp (by percent) and approval (by points) for every
/// country, then structural pressure and regional politics when enabled
pub fn apply_drift<R: Rng + ?Sized>(registry: &mut CountryRegistry, config: &DriftConfig, rng: &mut R) {
    let gdp_span = config.gdp_percent.abs();
    let approval_span = config.approval_points.abs();

    for country in registry.iter_mut() {
        let gdp_change = rng.gen_range(-gdp_span..=gdp_span);
        let gdp = country.economy.gdp;
        country.set_stat(Stat::Gdp, gdp + gdp * gdp_change / 100.0);

        let approval_change = rng.gen_range(-approval_span..=approval_span);
        country.adjust_stat(Stat::Approval, approval_change);

        if config.structural_pressure {
            if country.economy.stability < FRAGILE_STABILITY {
                country.adjust_stat(Stat::Unrest, 5.0);
                country.adjust_stat(Stat::Approval, -3.0);
            }
            if country.military.readiness > READINESS_FLOOR {
                let decayed = (country.military.readiness - 2.0).max(READINESS_FLOOR);
                country.set_stat(Stat::Readiness, decayed);
            }
        }
    }

    if config.regional_politics {
        for (country, region) in registry.advance_regions() {
            debug!(%country, %region, "Region gained autonomy");
            let name = registry.name_of(&country);
            registry.publish(
                NewsEvent::new(NewsCategory::Domestic, format!("{region} Wins Greater Autonomy"))
                    .actor(name.clone())
                    .description(format!(
                        "A majority in {region} backs independence, and {name} has ceded further powers."
                    ))
                    .severity(0.6),
            );
        }
    }
}
