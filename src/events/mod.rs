//! Random world events
//!
//! Each turn at most one event fires. Archetypes are a fixed table of
//! effect bundles; applying one is a pure function of the country.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::config::EventConfig;
use crate::core::types::CountryId;
use crate::decisions::effect::{apply_effect, Effect};
use crate::news::{NewsCategory, NewsEvent};
use crate::world::country::{Country, Stat};
use crate::world::registry::CountryRegistry;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorldEventKind {
    NaturalDisaster,
    EconomicBoom,
    PoliticalScandal,
    DiplomaticBreakthrough,
    MilitaryIncident,
}

/// Fixed presentation and effects of one event kind
#[derive(Debug)]
pub struct EventArchetype {
    pub kind: WorldEventKind,
    pub headline: &'static str,
    pub description: &'static str,
    pub category: NewsCategory,
    pub severity: f64,
    pub effects: &'static [Effect],
}

static ARCHETYPES: [EventArchetype; 5] = [
    EventArchetype {
        kind: WorldEventKind::NaturalDisaster,
        headline: "Natural disaster strikes",
        description: "A major earthquake has caused significant damage",
        category: NewsCategory::Disaster,
        severity: 0.7,
        effects: &[
            Effect::absolute(Stat::Stability, -10.0),
            Effect::absolute(Stat::Unrest, 5.0),
        ],
    },
    EventArchetype {
        kind: WorldEventKind::EconomicBoom,
        headline: "Economic boom",
        description: "Markets surge on record growth figures",
        category: NewsCategory::Economic,
        severity: 0.4,
        effects: &[
            Effect::percent(Stat::Gdp, 5.0),
            Effect::absolute(Stat::Approval, 5.0),
        ],
    },
    EventArchetype {
        kind: WorldEventKind::PoliticalScandal,
        headline: "Political scandal",
        description: "Senior officials are implicated in a corruption inquiry",
        category: NewsCategory::Domestic,
        severity: 0.5,
        effects: &[
            Effect::absolute(Stat::Approval, -10.0),
            Effect::absolute(Stat::Unrest, 8.0),
        ],
    },
    EventArchetype {
        kind: WorldEventKind::DiplomaticBreakthrough,
        headline: "Diplomatic breakthrough",
        description: "Negotiators announce an unexpected agreement",
        category: NewsCategory::Diplomatic,
        severity: 0.4,
        effects: &[Effect::absolute(Stat::Escalation, -10.0)],
    },
    EventArchetype {
        kind: WorldEventKind::MilitaryIncident,
        headline: "Military incident",
        description: "Forces are placed on alert after a border clash",
        category: NewsCategory::Military,
        severity: 0.6,
        effects: &[
            Effect::absolute(Stat::Escalation, 15.0),
            Effect::absolute(Stat::Readiness, 10.0),
        ],
    },
];

impl WorldEventKind {
    pub const ALL: [WorldEventKind; 5] = [
        WorldEventKind::NaturalDisaster,
        WorldEventKind::EconomicBoom,
        WorldEventKind::PoliticalScandal,
        WorldEventKind::DiplomaticBreakthrough,
        WorldEventKind::MilitaryIncident,
    ];

    pub fn archetype(self) -> &'static EventArchetype {
        let idx = match self {
            WorldEventKind::NaturalDisaster => 0,
            WorldEventKind::EconomicBoom => 1,
            WorldEventKind::PoliticalScandal => 2,
            WorldEventKind::DiplomaticBreakthrough => 3,
            WorldEventKind::MilitaryIncident => 4,
        };
        &ARCHETYPES[idx]
    }

    /// The country after this event, with every stat clamped as usual
    pub fn apply(self, country: &Country) -> Country {
        let mut next = country.clone();
        for effect in self.archetype().effects {
            apply_effect(&mut next, effect, None);
        }
        next
    }
}

/// An event that fired this turn
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldEvent {
    pub kind: WorldEventKind,
    pub country: CountryId,
    pub headline: String,
}

/// Roll for this turn's event. On success one country is struck by one
/// archetype, both chosen uniformly, and the event is published.
pub fn roll<R: Rng + ?Sized>(
    registry: &mut CountryRegistry,
    config: &EventConfig,
    rng: &mut R,
) -> Option<WorldEvent> {
    if registry.is_empty() || rng.gen::<f64>() >= config.fire_probability {
        debug!("No world event this turn");
        return None;
    }

    let idx = rng.gen_range(0..registry.len());
    let kind = *WorldEventKind::ALL.choose(rng)?;
    let archetype = kind.archetype();

    let country_id = registry.countries()[idx].id.clone();
    let country = registry.get_mut(&country_id)?;
    *country = kind.apply(country);
    let name = country.name.clone();

    registry.publish(
        NewsEvent::new(archetype.category, archetype.headline)
            .actor(name.clone())
            .description(archetype.description)
            .severity(archetype.severity),
    );
    debug!(?kind, country = %country_id, "World event");

    Some(WorldEvent {
        kind,
        country: country_id,
        headline: format!("{}: {}", name, archetype.headline),
    })
}
