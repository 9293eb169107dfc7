use strum::{Display, EnumIter};

use crate::action::ActionSummary;
use crate::state::{ActionId, CombatantId};

/// Which phase is active. Mirrors the internal phase enum without its
/// per-phase bookkeeping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PhaseKind {
    CombatStart,
    ActionSelection,
    TurnSpeedRoll,
    ActionExecution,
    RoundEnd,
    CombatDefeat,
    CombatEnd,
}

impl PhaseKind {
    /// Terminal phases ignore further updates.
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::CombatDefeat | Self::CombatEnd)
    }
}

/// How an encounter ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatOutcome {
    Victory,
    Defeat,
}

/// Read-only view for UIs and hosts. Owns all its data.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatSnapshot {
    pub phase: PhaseKind,
    pub round: u32,
    /// Combatant whose selection sub-turn is running, if any.
    pub current_combatant: Option<CombatantId>,
    /// Hand of the current combatant.
    pub hand: Vec<ActionId>,
    /// Choices offered to a waiting human, including the weapon attack.
    pub pending_choices: Vec<ActionId>,
    pub committed: Vec<ActionSummary>,
    pub resolved: Vec<ActionSummary>,
    pub waiting_for_animation: bool,
    pub outcome: Option<CombatOutcome>,
}
