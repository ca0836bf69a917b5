//! Alliances and the alliance index

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::types::{AllianceId, CountryId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AllianceType {
    Military,
    Economic,
    Political,
    Trade,
}

/// A named bloc of countries
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Alliance {
    pub id: AllianceId,
    pub name: String,
    pub kind: AllianceType,
    /// Members in join order, no duplicates
    members: Vec<CountryId>,
    pub collective_defense: bool,
    pub economic_integration: bool,
    /// Members sharing a single currency
    #[serde(default)]
    currency_union: Vec<CountryId>,
}

impl Alliance {
    pub fn new(id: impl Into<AllianceId>, name: impl Into<String>, kind: AllianceType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            members: Vec::new(),
            collective_defense: false,
            economic_integration: false,
            currency_union: Vec::new(),
        }
    }

    pub fn with_collective_defense(mut self) -> Self {
        self.collective_defense = true;
        self
    }

    pub fn with_economic_integration(mut self) -> Self {
        self.economic_integration = true;
        self
    }

    pub fn with_members<I, C>(mut self, members: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<CountryId>,
    {
        for member in members {
            self.insert_member(member.into());
        }
        self
    }

    /// Mark members as sharing a currency. Non-members are ignored.
    pub fn with_currency_union<I, C>(mut self, countries: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<CountryId>,
    {
        for country in countries {
            let country = country.into();
            if self.is_member(&country) && !self.currency_union.contains(&country) {
                self.currency_union.push(country);
            }
        }
        self
    }

    pub fn currency_union(&self) -> &[CountryId] {
        &self.currency_union
    }

    pub fn members(&self) -> &[CountryId] {
        &self.members
    }

    pub fn is_member(&self, country: &CountryId) -> bool {
        self.members.contains(country)
    }

    /// Returns false when the country was already a member
    pub(crate) fn insert_member(&mut self, country: CountryId) -> bool {
        if self.is_member(&country) {
            return false;
        }
        self.members.push(country);
        true
    }

    /// Returns false when the country was not a member
    pub(crate) fn remove_member(&mut self, country: &CountryId) -> bool {
        let before = self.members.len();
        self.members.retain(|m| m != country);
        self.currency_union.retain(|m| m != country);
        self.members.len() != before
    }

    /// Members obliged to respond when `attacked` is attacked.
    ///
    /// Empty when the alliance has no collective-defense clause or the
    /// attacked country is not a member.
    pub fn invoke_collective_defense(&self, attacked: &CountryId) -> Vec<CountryId> {
        if !self.collective_defense || !self.is_member(attacked) {
            return Vec::new();
        }
        self.members
            .iter()
            .filter(|m| *m != attacked)
            .cloned()
            .collect()
    }
}

/// All registered alliances, keyed by id
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AllianceIndex {
    alliances: BTreeMap<AllianceId, Alliance>,
}

impl AllianceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &AllianceId) -> Option<&Alliance> {
        self.alliances.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: &AllianceId) -> Option<&mut Alliance> {
        self.alliances.get_mut(id)
    }

    pub(crate) fn insert(&mut self, alliance: Alliance) {
        self.alliances.insert(alliance.id.clone(), alliance);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Alliance> {
        self.alliances.values()
    }

    pub fn len(&self) -> usize {
        self.alliances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alliances.is_empty()
    }

    /// Every alliance the country belongs to
    pub fn alliances_of<'a>(&'a self, country: &'a CountryId) -> impl Iterator<Item = &'a Alliance> + 'a {
        self.alliances.values().filter(move |a| a.is_member(country))
    }

    /// True when both countries share at least one alliance
    pub fn are_allied(&self, a: &CountryId, b: &CountryId) -> bool {
        a != b && self.alliances.values().any(|al| al.is_member(a) && al.is_member(b))
    }
}
