//! Simulation - the owned game context and its turn scheduler
//!
//! Holds the registry, calendar, configuration and the single random
//! source. Every mutation of the world goes through a method here.

use ahash::AHashMap;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::ai::{briefing, get_policy, select_decision, Briefing, PolicyKind};
use crate::consequences;
use crate::core::calendar::Calendar;
use crate::core::config::SimulationConfig;
use crate::core::error::{DominionError, Result};
use crate::core::types::{AllianceId, CountryId, Turn};
use crate::decisions::{self, Decision};
use crate::events;
use crate::news::{NewsCategory, NewsEvent};
use crate::simulation::drift::apply_drift;
use crate::simulation::report::{DecisionOutcome, TurnAction, TurnReport};
use crate::world::alliance::Alliance;
use crate::world::country::{Country, Expertise, Stat};
use crate::world::regions::RegionalPolitics;
use crate::world::registry::{AllianceSummary, CountryRegistry};
use crate::world::setup::standard_world;

/// Gdp lost by the target of coordinated bloc sanctions, in percent
const BLOC_SANCTION_GDP_PERCENT: f64 = 5.0;
/// Stability lost by the target of coordinated bloc sanctions
const BLOC_SANCTION_STABILITY: f64 = 5.0;

/// Turn scheduler state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    Idle,
    Running,
}

pub struct Simulation {
    registry: CountryRegistry,
    calendar: Calendar,
    config: SimulationConfig,
    rng: Box<dyn RngCore + Send>,
    /// Per-country policy overrides
    policies: AHashMap<CountryId, PolicyKind>,
    phase: TurnPhase,
}

impl Simulation {
    /// Standard world, entropy-seeded
    pub fn new(config: SimulationConfig) -> Result<Self> {
        Self::with_rng(config, ChaCha8Rng::from_entropy())
    }

    /// Standard world, reproducible from `seed`
    pub fn seeded(config: SimulationConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, ChaCha8Rng::seed_from_u64(seed))
    }

    /// Standard world, driven by any random source
    pub fn with_rng(config: SimulationConfig, mut rng: impl RngCore + Send + 'static) -> Result<Self> {
        config.validate()?;
        let registry = standard_world(&mut rng, &config)?;
        Ok(Self::assemble(config, registry, Box::new(rng)))
    }

    /// Custom world
    pub fn from_registry(
        config: SimulationConfig,
        registry: CountryRegistry,
        rng: impl RngCore + Send + 'static,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self::assemble(config, registry, Box::new(rng)))
    }

    fn assemble(config: SimulationConfig, mut registry: CountryRegistry, rng: Box<dyn RngCore + Send>) -> Self {
        let calendar = Calendar::new(config.start_year, config.turns_per_year);
        registry
            .news_mut()
            .set_date(calendar.current_turn(), calendar.current_year());

        Self {
            registry,
            calendar,
            config,
            rng,
            policies: AHashMap::new(),
            phase: TurnPhase::Idle,
        }
    }

    // === ACCESSORS ===

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    pub fn current_turn(&self) -> Turn {
        self.calendar.current_turn()
    }

    pub fn current_year(&self) -> u32 {
        self.calendar.current_year()
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn registry(&self) -> &CountryRegistry {
        &self.registry
    }

    /// Direct world access for scenario setup
    pub fn registry_mut(&mut self) -> &mut CountryRegistry {
        &mut self.registry
    }

    pub fn country(&self, id: &CountryId) -> Option<&Country> {
        self.registry.get(id)
    }

    pub fn countries(&self) -> &[Country] {
        self.registry.countries()
    }

    /// Up to `n` most recent news items, newest first
    pub fn latest_news(&self, n: usize) -> Vec<&NewsEvent> {
        self.registry.news().latest(n)
    }

    pub fn all_news(&self) -> Vec<&NewsEvent> {
        self.registry.news().all().collect()
    }

    pub fn player_country(&self) -> Option<&Country> {
        self.registry.player().and_then(|id| self.registry.get(id))
    }

    pub fn set_player_country(&mut self, id: &CountryId) -> Result<()> {
        self.registry.set_player(id)?;
        info!(player = %id, "Player country changed");
        Ok(())
    }

    // === DECISIONS ===

    pub fn available_decisions(&self, id: &CountryId) -> Vec<Decision> {
        decisions::available(&self.registry, id, self.config.sanctions_threshold)
    }

    pub fn find_decision(&self, actor: &CountryId, decision_id: &str) -> Option<Decision> {
        decisions::find(&self.registry, actor, decision_id, self.config.sanctions_threshold)
    }

    /// Resolve a decision for `actor`, then run its consequences
    pub fn execute_decision(&mut self, decision: &Decision, actor: &CountryId) -> Result<DecisionOutcome> {
        let applied = decisions::apply_decision(
            &mut self.registry,
            actor,
            decision,
            self.config.cost_policy,
            self.config.debt_ceiling,
        )?;
        let consequences = consequences::process(
            &mut self.registry,
            actor,
            decision,
            &self.config.consequences,
            &mut *self.rng,
        );
        Ok(DecisionOutcome {
            applied,
            consequences,
        })
    }

    /// Execute one of `actor`'s currently available decisions by id
    pub fn decide(&mut self, actor: &CountryId, decision_id: &str) -> Result<DecisionOutcome> {
        if !self.registry.contains(actor) {
            return Err(DominionError::UnknownCountry(actor.clone()));
        }
        let decision = self
            .find_decision(actor, decision_id)
            .ok_or_else(|| DominionError::UnknownDecision {
                actor: actor.clone(),
                decision: decision_id.to_string(),
            })?;
        self.execute_decision(&decision, actor)
    }

    // === AI POLICY ===

    pub fn policy_for(&self, id: &CountryId) -> PolicyKind {
        self.policies
            .get(id)
            .copied()
            .unwrap_or(self.config.ai.default_policy)
    }

    pub fn set_policy(&mut self, id: &CountryId, kind: PolicyKind) -> Result<()> {
        if !self.registry.contains(id) {
            return Err(DominionError::UnknownCountry(id.clone()));
        }
        self.policies.insert(id.clone(), kind);
        Ok(())
    }

    // === TURN ===

    /// Advance one turn: counters, AI decisions, random event, drift
    pub fn advance_turn(&mut self) -> TurnReport {
        self.phase = TurnPhase::Running;

        let year_rolled = self.calendar.advance();
        let turn = self.calendar.current_turn();
        let year = self.calendar.current_year();
        self.registry.news_mut().set_date(turn, year);
        let published_before = self.registry.news().published();

        let actions = self.run_ai();
        let event = events::roll(&mut self.registry, &self.config.events, &mut *self.rng);
        apply_drift(&mut self.registry, &self.config.drift, &mut *self.rng);

        let report = TurnReport {
            turn,
            year,
            quarter: self.calendar.current_quarter(),
            year_rolled,
            actions,
            event,
            news_published: self.registry.news().published() - published_before,
        };

        self.phase = TurnPhase::Idle;
        info!(
            turn,
            year,
            decisions = report.actions.len(),
            event = report.event.is_some(),
            "Turn complete"
        );
        report
    }

    /// Let every non-player country consider one decision, in registry order
    fn run_ai(&mut self) -> Vec<TurnAction> {
        let mut actions = Vec::new();

        for id in self.registry.ids() {
            let options = self.available_decisions(&id);
            let policy = get_policy(self.policy_for(&id));
            let Some(country) = self.registry.get(&id) else {
                continue;
            };
            if country.is_player_controlled {
                continue;
            }

            let choice = select_decision(
                policy.as_ref(),
                country,
                &options,
                self.config.ai.action_probability,
                &mut *self.rng,
            );
            let Some(idx) = choice else {
                debug!(country = %id, "AI abstains");
                continue;
            };

            let decision = &options[idx];
            match self.execute_decision(decision, &id) {
                Ok(outcome) => actions.push(TurnAction {
                    country: id.clone(),
                    decision_id: decision.id.clone(),
                    title: decision.title.clone(),
                    consequences: outcome.consequences,
                }),
                Err(e) => debug!(country = %id, decision = %decision.id, error = %e, "AI decision rejected"),
            }
        }

        actions
    }

    // === ALLIANCES ===

    pub fn alliance(&self, id: &AllianceId) -> Option<&Alliance> {
        self.registry.alliance(id)
    }

    pub fn alliance_summary(&self, id: &AllianceId) -> Option<AllianceSummary> {
        self.registry.alliance_summary(id)
    }

    pub fn collective_defense(&self, alliance: &AllianceId, attacked: &CountryId) -> Result<Vec<CountryId>> {
        self.registry.collective_defense(alliance, attacked)
    }

    pub fn add_alliance_member(&mut self, alliance: &AllianceId, country: &CountryId) -> Result<bool> {
        self.registry.add_member(alliance, country)
    }

    pub fn remove_alliance_member(&mut self, alliance: &AllianceId, country: &CountryId) -> Result<bool> {
        self.registry.remove_member(alliance, country)
    }

    /// Summed gdp of the alliance's single-currency members
    pub fn currency_union_gdp(&self, alliance: &AllianceId) -> Result<f64> {
        self.registry.currency_union_gdp(alliance)
    }

    pub fn regions_of(&self, country: &CountryId) -> Option<&RegionalPolitics> {
        self.registry.regions_of(country)
    }

    /// Coordinated sanctions by an economically integrated bloc
    pub fn impose_bloc_sanctions(&mut self, alliance: &AllianceId, target: &CountryId) -> Result<()> {
        let bloc = self
            .registry
            .alliance(alliance)
            .ok_or_else(|| DominionError::UnknownAlliance(alliance.clone()))?;
        if !bloc.economic_integration {
            return Err(DominionError::NotAnEconomicBloc(alliance.clone()));
        }
        let bloc_name = bloc.name.clone();

        let country = self
            .registry
            .get_mut(target)
            .ok_or_else(|| DominionError::UnknownCountry(target.clone()))?;
        let gdp = country.economy.gdp;
        country.set_stat(Stat::Gdp, gdp - gdp * BLOC_SANCTION_GDP_PERCENT / 100.0);
        country.adjust_stat(Stat::Stability, -BLOC_SANCTION_STABILITY);
        let target_name = country.name.clone();

        self.registry.publish(
            NewsEvent::new(
                NewsCategory::Economic,
                format!("imposes coordinated sanctions on {}", target_name),
            )
            .actor(bloc_name)
            .severity(0.5),
        );
        info!(alliance = %alliance, target = %target, "Bloc sanctions imposed");
        Ok(())
    }

    // === ADVISORS ===

    pub fn briefing(&self, id: &CountryId, expertise: Expertise) -> Result<Briefing> {
        self.registry
            .get(id)
            .map(|country| briefing(country, expertise))
            .ok_or_else(|| DominionError::UnknownCountry(id.clone()))
    }
}
