//! World state: countries, alliances and the registry that owns them

pub mod alliance;
pub mod country;
pub mod regions;
pub mod registry;
pub mod setup;

pub use alliance::{Alliance, AllianceIndex, AllianceType};
pub use country::{
    Advisor, Country, Doctrine, Economy, Expertise, Government, GovernmentType, Military,
    PublicOpinion, RelationStance, Stat, VoiceProfile, NEUTRAL_RELATION,
};
pub use regions::{PoliticalLeaning, Region, RegionalPolitics};
pub use registry::{AllianceSummary, CountryRegistry};
pub use setup::standard_world;
