use std::cell::RefCell;
use std::rc::Rc;

use combat_core::{Narration, Narrator};

/// Shared transcript of every narrative line.
#[derive(Clone, Debug, Default)]
pub struct Journal {
    lines: Rc<RefCell<Vec<Narration>>>,
}

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<Narration> {
        self.lines.borrow().clone()
    }

    pub fn rendered(&self) -> Vec<String> {
        self.lines.borrow().iter().map(ToString::to_string).collect()
    }

    pub fn count(&self, predicate: impl Fn(&Narration) -> bool) -> usize {
        self.lines.borrow().iter().filter(|line| predicate(line)).count()
    }

    fn push(&self, line: &Narration) {
        self.lines.borrow_mut().push(line.clone());
    }
}

/// Writes narration to the `narrative` tracing target, optionally keeping
/// a [`Journal`].
#[derive(Clone, Debug, Default)]
pub struct TracingNarrator {
    journal: Option<Journal>,
}

impl TracingNarrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_journal(journal: Journal) -> Self {
        Self {
            journal: Some(journal),
        }
    }
}

impl Narrator for TracingNarrator {
    fn narrate(&mut self, line: &Narration) {
        match line {
            Narration::PhaseEntered { .. } => tracing::debug!(target: "narrative", "{line}"),
            Narration::AnimationTimedOut { .. } | Narration::ChoiceRejected { .. } => {
                tracing::warn!(target: "narrative", "{line}")
            }
            _ => tracing::info!(target: "narrative", "{line}"),
        }
        if let Some(journal) = &self.journal {
            journal.push(line);
        }
    }
}
