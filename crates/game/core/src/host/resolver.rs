use crate::action::ActionRecord;
use crate::engine::CombatOutcome;
use crate::state::CombatantStore;

/// External damage and effect resolution.
///
/// Invoked once per executed action, when its animation is requested, so
/// the skip-on-death check of later records already sees the new health.
pub trait ActionResolver {
    fn resolve(&mut self, record: &ActionRecord, store: &mut dyn CombatantStore);
}

/// End-of-encounter bookkeeping (scene or world transition).
pub trait SceneDirector {
    /// Called exactly once, when a terminal phase is entered.
    fn end_encounter(&mut self, outcome: CombatOutcome);
}

/// Resolver that applies nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopResolver;

impl ActionResolver for NoopResolver {
    fn resolve(&mut self, _record: &ActionRecord, _store: &mut dyn CombatantStore) {}
}

/// Scene director that does nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopScene;

impl SceneDirector for NoopScene {
    fn end_encounter(&mut self, _outcome: CombatOutcome) {}
}
