//! Concrete collaborators for headless hosts.
//!
//! Each provider hands the engine a boxed half and keeps a cloneable
//! handle for the driver: the animation timer is advanced by the frame
//! loop, the auto-pilot's choices are fed back as events, and the journal
//! and scene are read once the encounter ends.

mod animation;
mod input;
mod narrator;
mod resolver;
mod scene;

pub use animation::{AnimationTiming, TimedAnimationPlayer};
pub use input::AutoPilot;
pub use narrator::{Journal, TracingNarrator};
pub use resolver::EffectResolver;
pub use scene::OutcomeScene;
