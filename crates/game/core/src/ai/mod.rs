//! AI decision policy for computer-controlled combatants.
//!
//! Selection is a pure function of the hand, the combatant's intellect tier
//! and the catalog; the only impurity is the injected RNG. Targeting is kept
//! separate so the engine can reuse it for human defaults.

mod policy;
mod targeting;

pub use policy::AiPolicy;
pub use targeting::{first_living_enemy, select_targets};
