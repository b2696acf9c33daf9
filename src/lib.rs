//! Skirmish -- deterministic turn resolution for two-vessel arena combat.
//!
//! The core is `resolve::TurnResolver`: given a battle state and both
//! sides' orders it integrates one turn on a fixed timestep and returns the
//! next state plus an event log. `engine` and `arena` drive it from the
//! stdio protocol and from scripted strategies respectively.

pub mod arena;
pub mod battle;
pub mod config;
pub mod engine;
pub mod geometry;
pub mod logging;
pub mod protocol;
pub mod resolve;
