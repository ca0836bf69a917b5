//! Global Dominion - turn-based geopolitical simulation core

pub mod ai;
pub mod consequences;
pub mod core;
pub mod decisions;
pub mod events;
pub mod news;
pub mod simulation;
pub mod world;
