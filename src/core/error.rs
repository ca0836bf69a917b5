use thiserror::Error;

use crate::core::types::{AllianceId, CountryId};

#[derive(Error, Debug)]
pub enum DominionError {
    #[error("Country not found: {0}")]
    UnknownCountry(CountryId),

    #[error("Alliance not found: {0}")]
    UnknownAlliance(AllianceId),

    #[error("Decision {decision} is not available to {actor}")]
    UnknownDecision { actor: CountryId, decision: String },

    #[error("Country already registered: {0}")]
    DuplicateCountry(CountryId),

    #[error("{actor} cannot afford {decision}: debt ratio would reach {ratio:.2}")]
    Unaffordable {
        actor: CountryId,
        decision: String,
        ratio: f64,
    },

    #[error("Alliance {0} has no economic integration")]
    NotAnEconomicBloc(AllianceId),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DominionError>;
