use std::fmt;
use std::sync::Arc;

use super::ActionDefinition;
use crate::state::{ActionId, CombatantId};

/// One committed choice for the current round.
///
/// Created when a combatant commits, speed-rolled in `TurnSpeedRoll`, and
/// consumed by `ActionExecution`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionRecord {
    pub caster: CombatantId,
    pub action: Arc<ActionDefinition>,
    /// Unset until the speed roll.
    pub speed: Option<i32>,
    pub targets: Vec<CombatantId>,
    /// Generated from a weapon for this round only.
    pub is_temporary: bool,
}

impl ActionRecord {
    pub fn new(caster: CombatantId, action: Arc<ActionDefinition>) -> Self {
        let is_temporary = action.id.is_temporary();
        Self {
            caster,
            action,
            speed: None,
            targets: Vec::new(),
            is_temporary,
        }
    }

    pub fn with_targets(mut self, targets: Vec<CombatantId>) -> Self {
        self.targets = targets;
        self
    }

    pub fn with_speed(mut self, speed: i32) -> Self {
        self.speed = Some(speed);
        self
    }

    pub fn action_id(&self) -> &ActionId {
        &self.action.id
    }

    pub fn priority(&self) -> i32 {
        self.action.priority
    }

    pub fn summary(&self) -> ActionSummary {
        ActionSummary {
            caster: self.caster,
            action: self.action.id.clone(),
            speed: self.speed,
            targets: self.targets.clone(),
        }
    }
}

/// Owned, display-friendly view of an [`ActionRecord`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionSummary {
    pub caster: CombatantId,
    pub action: ActionId,
    pub speed: Option<i32>,
    pub targets: Vec<CombatantId>,
}

impl fmt::Display for ActionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.caster, self.action)?;
        if let Some(speed) = self.speed {
            write!(f, " (speed {speed})")?;
        }
        Ok(())
    }
}
