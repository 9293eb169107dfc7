//! Collaborator contracts between the engine and its host.
//!
//! The engine never reaches for an ambient service. Everything it talks to
//! (animation playback, human input, narrative output, damage resolution,
//! scene transitions) is injected as a boxed trait object bundled in
//! [`Collaborators`]. Collaborators only push events back through
//! [`AnimationCompletion`] or [`crate::engine::CombatEvent`]; they never
//! mutate deck or orchestrator state directly.

mod animation;
mod input;
mod narration;
mod resolver;

pub use animation::{AnimationCompletion, AnimationPlayer, AnimationTicket};
pub use input::{ChoicePrompt, HumanChoice, InputProvider};
pub use narration::{Narration, Narrator};
pub use resolver::{ActionResolver, NoopResolver, NoopScene, SceneDirector};

/// Every collaborator the orchestrator needs, already boxed.
pub struct Collaborators {
    pub animation: Box<dyn AnimationPlayer>,
    pub input: Box<dyn InputProvider>,
    pub narrator: Box<dyn Narrator>,
    pub resolver: Box<dyn ActionResolver>,
    pub scene: Box<dyn SceneDirector>,
}

impl Collaborators {
    /// Bundles the required collaborators. Damage resolution and scene
    /// transitions default to no-ops.
    pub fn new(
        animation: impl AnimationPlayer + 'static,
        input: impl InputProvider + 'static,
        narrator: impl Narrator + 'static,
    ) -> Self {
        Self {
            animation: Box::new(animation),
            input: Box::new(input),
            narrator: Box::new(narrator),
            resolver: Box::new(NoopResolver),
            scene: Box::new(NoopScene),
        }
    }

    pub fn with_resolver(mut self, resolver: impl ActionResolver + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    pub fn with_scene(mut self, scene: impl SceneDirector + 'static) -> Self {
        self.scene = Box::new(scene);
        self
    }

    /// Forwards a narrative line and mirrors it to the trace log.
    pub fn narrate(&mut self, line: Narration) {
        tracing::trace!(target: "narrative", "{line}");
        self.narrator.narrate(&line);
    }
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}
