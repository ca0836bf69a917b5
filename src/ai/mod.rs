//! AI for non-player countries
//!
//! A named policy picks at most one decision per country per turn; the
//! pick then goes through the same resolver as a player decision.
//! Advisors only brief, they never act.

pub mod advisor;
pub mod policy;
pub mod random;
pub mod scripted;
pub mod utility;

pub use advisor::{briefing, Briefing};
pub use policy::{get_policy, select_decision, CountryPolicy, PolicyKind};
