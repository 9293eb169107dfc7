use std::cell::Cell;
use std::rc::Rc;

use combat_core::{CombatOutcome, SceneDirector};

/// Remembers how the encounter ended.
#[derive(Clone, Debug, Default)]
pub struct OutcomeScene {
    outcome: Rc<Cell<Option<CombatOutcome>>>,
}

impl OutcomeScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn outcome(&self) -> Option<CombatOutcome> {
        self.outcome.get()
    }
}

impl SceneDirector for OutcomeScene {
    fn end_encounter(&mut self, outcome: CombatOutcome) {
        tracing::info!(%outcome, "encounter over; leaving combat scene");
        self.outcome.set(Some(outcome));
    }
}
