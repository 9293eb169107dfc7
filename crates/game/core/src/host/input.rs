use std::sync::Arc;

use crate::action::ActionDefinition;
use crate::state::{ActionId, CombatantId};

/// Choices offered to a human-controlled combatant for one sub-turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChoicePrompt {
    pub combatant: CombatantId,
    /// The drawn hand followed by this round's weapon attack, if any.
    pub choices: Vec<Arc<ActionDefinition>>,
    pub round: u32,
}

impl ChoicePrompt {
    pub fn contains(&self, action: &ActionId) -> bool {
        self.choices.iter().any(|choice| &choice.id == action)
    }

    pub fn get(&self, action: &ActionId) -> Option<&Arc<ActionDefinition>> {
        self.choices.iter().find(|choice| &choice.id == action)
    }

    pub fn action_ids(&self) -> impl Iterator<Item = &ActionId> {
        self.choices.iter().map(|choice| &choice.id)
    }
}

/// A confirmed human selection.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HumanChoice {
    pub action: ActionId,
    /// Empty targets on a single-enemy action default to the first living enemy.
    #[cfg_attr(feature = "serde", serde(default))]
    pub targets: Vec<CombatantId>,
}

impl HumanChoice {
    pub fn new(action: impl Into<ActionId>) -> Self {
        Self {
            action: action.into(),
            targets: Vec::new(),
        }
    }

    pub fn targeting(mut self, target: CombatantId) -> Self {
        self.targets.push(target);
        self
    }
}

/// Presents choices to a human and takes them down again.
///
/// Confirmations do not flow through this trait; the host pushes
/// [`crate::engine::CombatEvent::ChoiceConfirmed`] once the human decides.
pub trait InputProvider {
    fn present_choices(&mut self, prompt: &ChoicePrompt);

    /// Called when the sub-turn ends, confirmed or not.
    fn withdraw(&mut self, combatant: CombatantId);
}
