//! Decisions: the catalog of options, their effects and the resolver
//!
//! A decision is computed fresh on each catalog query and applied through
//! the resolver, which is the only path by which decisions mutate the world.

pub mod catalog;
pub mod effect;
pub mod resolver;

pub use catalog::{available, find, Decision, DecisionCategory, DecisionKind};
pub use effect::{apply_effect, severity_of, Effect, EffectMode, EffectScope};
pub use resolver::{apply_decision, AppliedEffect, AppliedResult};
