//! CountryRegistry - the authoritative world state container
//!
//! Owns every country (in stable registration order), the alliance index,
//! the news journal and the player-country selection. All other systems
//! operate on it by reference.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::error::{DominionError, Result};
use crate::core::types::{AllianceId, CountryId};
use crate::news::{NewsEvent, NewsJournal};
use crate::world::alliance::{Alliance, AllianceIndex};
use crate::world::country::Country;
use crate::world::regions::RegionalPolitics;

#[derive(Clone, Debug)]
pub struct CountryRegistry {
    /// All countries in registration order
    countries: Vec<Country>,
    /// Id -> position in `countries`
    index: AHashMap<CountryId, usize>,
    alliances: AllianceIndex,
    /// Sub-national regions, at most one set per country
    regions: Vec<RegionalPolitics>,
    news: NewsJournal,
    player: Option<CountryId>,
}

/// Aggregate figures for one alliance's known members
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AllianceSummary {
    pub id: AllianceId,
    pub name: String,
    pub members: usize,
    pub total_strength: f64,
    pub total_gdp: f64,
    pub average_readiness: f64,
    pub average_stability: f64,
    pub nuclear_members: usize,
}

impl CountryRegistry {
    pub fn new(news_capacity: usize) -> Self {
        Self {
            countries: Vec::new(),
            index: AHashMap::new(),
            alliances: AllianceIndex::new(),
            regions: Vec::new(),
            news: NewsJournal::new(news_capacity),
            player: None,
        }
    }

    /// Register a country. Ids must be unique.
    pub fn insert(&mut self, country: Country) -> Result<()> {
        if self.index.contains_key(&country.id) {
            return Err(DominionError::DuplicateCountry(country.id));
        }
        if country.is_player_controlled && self.player.is_none() {
            self.player = Some(country.id.clone());
        }
        self.index.insert(country.id.clone(), self.countries.len());
        self.countries.push(country);
        Ok(())
    }

    pub fn get(&self, id: &CountryId) -> Option<&Country> {
        self.index.get(id).map(|&idx| &self.countries[idx])
    }

    pub fn get_mut(&mut self, id: &CountryId) -> Option<&mut Country> {
        match self.index.get(id) {
            Some(&idx) => Some(&mut self.countries[idx]),
            None => None,
        }
    }

    pub fn contains(&self, id: &CountryId) -> bool {
        self.index.contains_key(id)
    }

    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    pub fn iter(&self) -> impl Iterator<Item = &Country> {
        self.countries.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Country> {
        self.countries.iter_mut()
    }

    /// Ids in registration order
    pub fn ids(&self) -> Vec<CountryId> {
        self.countries.iter().map(|c| c.id.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    /// Display name for an id, falling back to the raw id
    pub fn name_of(&self, id: &CountryId) -> String {
        self.get(id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| id.to_string())
    }

    // === PLAYER ===

    pub fn player(&self) -> Option<&CountryId> {
        self.player.as_ref()
    }

    /// Hand player control to `id`; every other country becomes AI-driven
    pub fn set_player(&mut self, id: &CountryId) -> Result<()> {
        if !self.contains(id) {
            return Err(DominionError::UnknownCountry(id.clone()));
        }
        for country in &mut self.countries {
            country.is_player_controlled = &country.id == id;
        }
        self.player = Some(id.clone());
        Ok(())
    }

    /// Return every country to AI control
    pub fn clear_player(&mut self) {
        for country in &mut self.countries {
            country.is_player_controlled = false;
        }
        self.player = None;
    }

    // === NEWS ===

    pub fn news(&self) -> &NewsJournal {
        &self.news
    }

    pub fn news_mut(&mut self) -> &mut NewsJournal {
        &mut self.news
    }

    pub fn publish(&mut self, event: NewsEvent) -> u64 {
        self.news.publish(event)
    }

    // === ALLIANCES ===

    pub fn alliances(&self) -> &AllianceIndex {
        &self.alliances
    }

    pub fn alliance(&self, id: &AllianceId) -> Option<&Alliance> {
        self.alliances.get(id)
    }

    /// Register an alliance. Known members without a primary alliance
    /// adopt this one; existing affiliations are kept.
    pub fn register_alliance(&mut self, alliance: Alliance) {
        for member in alliance.members() {
            if let Some(&idx) = self.index.get(member) {
                let country = &mut self.countries[idx];
                if country.alliance.is_none() {
                    country.alliance = Some(alliance.id.clone());
                }
            }
        }
        self.alliances.insert(alliance);
    }

    /// Add a member. The joining country's primary alliance becomes this one.
    /// Returns false when it was already a member.
    pub fn add_member(&mut self, alliance: &AllianceId, country: &CountryId) -> Result<bool> {
        let entry = self
            .alliances
            .get_mut(alliance)
            .ok_or_else(|| DominionError::UnknownAlliance(alliance.clone()))?;
        let added = entry.insert_member(country.clone());

        if let Some(c) = self.get_mut(country) {
            c.alliance = Some(alliance.clone());
        }
        Ok(added)
    }

    /// Remove a member. Clears the country's primary alliance only when it
    /// pointed at this alliance. Returns false when it was not a member.
    pub fn remove_member(&mut self, alliance: &AllianceId, country: &CountryId) -> Result<bool> {
        let entry = self
            .alliances
            .get_mut(alliance)
            .ok_or_else(|| DominionError::UnknownAlliance(alliance.clone()))?;
        let removed = entry.remove_member(country);

        if let Some(c) = self.get_mut(country) {
            if c.alliance.as_ref() == Some(alliance) {
                c.alliance = None;
            }
        }
        Ok(removed)
    }

    /// Members obliged to defend `attacked`
    pub fn collective_defense(&self, alliance: &AllianceId, attacked: &CountryId) -> Result<Vec<CountryId>> {
        self.alliances
            .get(alliance)
            .map(|a| a.invoke_collective_defense(attacked))
            .ok_or_else(|| DominionError::UnknownAlliance(alliance.clone()))
    }

    /// Known member countries of an alliance, in join order
    pub fn members_of(&self, alliance: &AllianceId) -> Vec<&Country> {
        self.alliances
            .get(alliance)
            .map(|a| a.members().iter().filter_map(|m| self.get(m)).collect())
            .unwrap_or_default()
    }

    pub fn alliance_summary(&self, id: &AllianceId) -> Option<AllianceSummary> {
        let alliance = self.alliances.get(id)?;
        let members = self.members_of(id);
        let count = members.len();
        let average = |f: fn(&Country) -> f64| {
            if count == 0 {
                0.0
            } else {
                members.iter().map(|c| f(c)).sum::<f64>() / count as f64
            }
        };

        Some(AllianceSummary {
            id: alliance.id.clone(),
            name: alliance.name.clone(),
            members: count,
            total_strength: members.iter().map(|c| c.military.strength).sum(),
            total_gdp: members.iter().map(|c| c.economy.gdp).sum(),
            average_readiness: average(|c| c.military.readiness),
            average_stability: average(|c| c.economy.stability),
            nuclear_members: members.iter().filter(|c| c.military.nuclear_capable).count(),
        })
    }

    /// Summed gdp of the members sharing the alliance's currency
    pub fn currency_union_gdp(&self, id: &AllianceId) -> Result<f64> {
        let alliance = self
            .alliances
            .get(id)
            .ok_or_else(|| DominionError::UnknownAlliance(id.clone()))?;
        Ok(alliance
            .currency_union()
            .iter()
            .filter_map(|m| self.get(m))
            .map(|c| c.economy.gdp)
            .sum())
    }

    // === REGIONS ===

    pub fn regions(&self) -> &[RegionalPolitics] {
        &self.regions
    }

    pub fn regions_of(&self, country: &CountryId) -> Option<&RegionalPolitics> {
        self.regions.iter().find(|r| &r.country == country)
    }

    /// Attach regions to a known country, replacing any previous set
    pub fn register_regions(&mut self, regions: RegionalPolitics) -> Result<()> {
        if !self.contains(&regions.country) {
            return Err(DominionError::UnknownCountry(regions.country.clone()));
        }
        self.regions.retain(|r| r.country != regions.country);
        self.regions.push(regions);
        Ok(())
    }

    /// Move every region set one turn forward from its parent's condition.
    /// Returns (country, region name) for each autonomy gain.
    pub fn advance_regions(&mut self) -> Vec<(CountryId, String)> {
        let mut gained = Vec::new();
        for set in &mut self.regions {
            let Some(&idx) = self.index.get(&set.country) else {
                continue;
            };
            for name in set.advance(&self.countries[idx]) {
                gained.push((set.country.clone(), name));
            }
        }
        gained
    }

    /// True when every country's bounded stats lie in [0, 100]
    pub fn all_stats_valid(&self) -> bool {
        self.countries.iter().all(|c| c.bounded_stats_valid())
    }
}

impl Default for CountryRegistry {
    fn default() -> Self {
        Self::new(crate::news::journal::DEFAULT_CAPACITY)
    }
}
