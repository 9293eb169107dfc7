//! Headless host for the combat engine.
//!
//! This crate supplies concrete collaborators for `combat-core` and a
//! frame-driven [`Simulation`] that plays an encounter loaded through
//! `combat-content` without any UI:
//! - [`providers`] hosts the animation timer, auto-pilot input, narrator,
//!   effect resolver and scene director
//! - [`simulation`] drives frames and produces a [`SimReport`]
//! - [`config`] reads run settings from the environment
pub mod config;
pub mod error;
pub mod providers;
pub mod report;
pub mod rng;
pub mod simulation;

pub use config::SimConfig;
pub use error::{Result, RuntimeError};
pub use providers::{
    AnimationTiming, AutoPilot, EffectResolver, Journal, OutcomeScene, TimedAnimationPlayer,
    TracingNarrator,
};
pub use report::{CombatantReport, SimReport};
pub use rng::EntropyRng;
pub use simulation::{Simulation, SimulationBuilder};
