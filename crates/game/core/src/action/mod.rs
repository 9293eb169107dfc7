//! Action domain: catalog definitions, committed records and weapon attacks.
//!
//! # Module Structure
//!
//! - `definition`: Action and weapon definitions (targeting, priority, effects)
//! - `record`: `ActionRecord`, one committed choice for the round
//! - `temporary`: Per-round weapon attack generation

pub mod definition;
pub mod record;
pub mod temporary;

pub use definition::{ActionDefinition, Effect, EffectKind, TargetType, WeaponDefinition};
pub use record::{ActionRecord, ActionSummary};
pub use temporary::generate_temporary_action;
