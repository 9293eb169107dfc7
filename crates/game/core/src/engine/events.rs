use crate::host::{AnimationTicket, HumanChoice};

/// Events a host pushes into the orchestrator.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatEvent {
    /// The animation issued under this ticket finished.
    AnimationComplete(AnimationTicket),
    /// The human confirmed a selection.
    ChoiceConfirmed(HumanChoice),
}
