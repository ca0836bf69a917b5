//! Sub-national regions and their independence movements
//!
//! A country may carry a set of regions, each with its own population,
//! output, political leaning and appetite for independence. Support grows
//! while the parent country is fragile or restless; a region whose support
//! passes the majority line wins autonomy step by step.

use serde::{Deserialize, Serialize};

use crate::core::types::CountryId;
use crate::world::country::Country;

/// Support above which a region's movement wins autonomy
pub const MAJORITY_SUPPORT: f64 = 50.0;
/// Autonomy gained per successful push
const AUTONOMY_STEP: f64 = 5.0;
/// Parent stability below which support builds quickly
const FRAGILE_STABILITY: f64 = 40.0;
/// Parent unrest above which support builds slowly
const RESTLESS_UNREST: f64 = 50.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoliticalLeaning {
    FarLeft,
    Left,
    CenterLeft,
    Center,
    CenterRight,
    Right,
    FarRight,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub id: String,
    pub name: String,
    pub population: u64,
    /// 0-100
    pub autonomy: f64,
    /// 0-100
    pub independence_support: f64,
    /// Same unit as country gdp
    pub economic_output: f64,
    pub leaning: PoliticalLeaning,
}

impl Region {
    fn new(
        id: &str,
        name: &str,
        population: u64,
        autonomy: f64,
        independence_support: f64,
        economic_output: f64,
        leaning: PoliticalLeaning,
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            population,
            autonomy,
            independence_support,
            economic_output,
            leaning,
        }
    }
}

/// The regions of one country
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegionalPolitics {
    pub country: CountryId,
    regions: Vec<Region>,
}

impl RegionalPolitics {
    pub fn new(country: impl Into<CountryId>, regions: Vec<Region>) -> Self {
        Self {
            country: country.into(),
            regions,
        }
    }

    /// England, Scotland, Wales and Northern Ireland
    pub fn united_kingdom() -> Self {
        use PoliticalLeaning::*;
        Self::new(
            "uk",
            vec![
                Region::new("england", "England", 56_000_000, 20.0, 5.0, 2200.0, CenterRight),
                Region::new("scotland", "Scotland", 5_500_000, 60.0, 45.0, 180.0, CenterLeft),
                Region::new("wales", "Wales", 3_100_000, 50.0, 25.0, 80.0, Left),
                Region::new("northern_ireland", "Northern Ireland", 1_900_000, 70.0, 40.0, 55.0, Center),
            ],
        )
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn region(&self, id: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.id == id)
    }

    pub fn total_population(&self) -> u64 {
        self.regions.iter().map(|r| r.population).sum()
    }

    pub fn total_output(&self) -> f64 {
        self.regions.iter().map(|r| r.economic_output).sum()
    }

    /// Mean independence support, 0 with no regions
    pub fn average_independence_support(&self) -> f64 {
        if self.regions.is_empty() {
            return 0.0;
        }
        self.regions.iter().map(|r| r.independence_support).sum::<f64>() / self.regions.len() as f64
    }

    /// Grow independence support from the parent country's condition
    pub fn update(&mut self, parent: &Country) {
        let mut gain = 0.0;
        if parent.economy.stability < FRAGILE_STABILITY {
            gain += 2.0;
        }
        if parent.opinion.unrest > RESTLESS_UNREST {
            gain += 1.0;
        }
        if gain == 0.0 {
            return;
        }
        for region in &mut self.regions {
            region.independence_support = (region.independence_support + gain).min(100.0);
        }
    }

    /// Push one region's movement. Returns true when autonomy rose.
    pub fn process_independence_movement(&mut self, id: &str) -> bool {
        let Some(region) = self.regions.iter_mut().find(|r| r.id == id) else {
            return false;
        };
        if region.independence_support <= MAJORITY_SUPPORT || region.autonomy >= 100.0 {
            return false;
        }
        region.autonomy = (region.autonomy + AUTONOMY_STEP).min(100.0);
        true
    }

    /// Update support, then push every majority movement. Returns the
    /// names of regions that gained autonomy.
    pub fn advance(&mut self, parent: &Country) -> Vec<String> {
        self.update(parent);
        let mut gained = Vec::new();
        for i in 0..self.regions.len() {
            let id = self.regions[i].id.clone();
            if self.process_independence_movement(&id) {
                gained.push(self.regions[i].name.clone());
            }
        }
        gained
    }
}
