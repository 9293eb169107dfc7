//! Turn-based combat resolution engine.
//!
//! `combat-core` sequences a round of combat: deck draw, per-combatant
//! action selection (human or AI), speed-based initiative, animated
//! execution and round-end bookkeeping. It is pure and frame-driven: the
//! host calls [`engine::CombatOrchestrator::update`] once per frame and
//! pushes [`engine::CombatEvent`]s back in. Storage, content, animation,
//! input, narration and randomness are injected through the traits in
//! [`state`], [`env`] and [`host`].
pub mod action;
pub mod ai;
pub mod config;
pub mod deck;
pub mod engine;
pub mod env;
pub mod error;
pub mod host;
pub mod state;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use action::{
    ActionDefinition, ActionRecord, ActionSummary, Effect, EffectKind, TargetType,
    WeaponDefinition, generate_temporary_action,
};
pub use ai::AiPolicy;
pub use config::CombatConfig;
pub use deck::DeckState;
pub use engine::{
    CombatContext, CombatEvent, CombatOrchestrator, CombatOrchestratorBuilder, CombatOutcome,
    CombatSnapshot, CombatStateMachine, PhaseKind, TurnAdvance, resolve_turn_order,
};
pub use env::{CatalogOracle, PcgRng, RngOracle, StaticCatalog, shuffle};
pub use error::{CombatError, ErrorSeverity, GameError};
pub use host::{
    ActionResolver, AnimationCompletion, AnimationPlayer, AnimationTicket, ChoicePrompt,
    Collaborators, HumanChoice, InputProvider, Narration, Narrator, SceneDirector,
};
pub use state::{
    ActionId, AiIntellect, CombatantId, CombatantRecord, CombatantStore, ComponentKind,
    Controller, Equipment, Health, MemoryStore, Repertoire, Stats, WeaponId,
};
