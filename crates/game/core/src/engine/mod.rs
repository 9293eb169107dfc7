//! Combat orchestration: the phase state machine and the state it drives.
//!
//! The [`CombatOrchestrator`] owns a [`CombatStateMachine`] and a
//! [`CombatContext`] side by side, so the active phase can borrow the
//! context mutably while the machine dispatches to it. Each frame the host
//! calls `update` with the elapsed time; events (animation completions,
//! human choices) are pushed through `handle_event`. Nothing in here blocks
//! or spawns.

mod context;
mod events;
mod machine;
mod orchestrator;
mod phases;
mod snapshot;
mod turn_order;
mod turns;
mod wait;

pub use context::CombatContext;
pub use events::CombatEvent;
pub use machine::CombatStateMachine;
pub use orchestrator::{CombatOrchestrator, CombatOrchestratorBuilder};
pub use snapshot::{CombatOutcome, CombatSnapshot, PhaseKind};
pub use turn_order::{execution_order, resolve_turn_order};
pub use turns::TurnAdvance;
