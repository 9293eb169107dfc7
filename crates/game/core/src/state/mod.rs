//! Combatant identity and per-combatant records.
//!
//! Records live in an external keyed store reached through
//! [`CombatantStore`]; the engine reads and writes them only through that
//! trait.
pub mod components;
pub mod ids;
pub mod store;

pub use components::{
    AiIntellect, ComponentKind, Controller, Equipment, Health, Repertoire, Stats,
};
pub use ids::{ActionId, CombatantId, WeaponId};
pub use store::{CombatantRecord, CombatantStore, MemoryStore};
