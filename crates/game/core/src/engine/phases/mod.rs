//! The seven combat phases.
//!
//! [`Phase`] is a closed enum; the machine dispatches every lifecycle hook
//! through one exhaustive match. Phases that suspend across frames carry
//! their own bookkeeping inside their variant.

mod action_execution;
mod action_selection;
mod combat_start;
mod round_end;
mod speed_roll;
mod terminal;

use std::time::Duration;

pub(crate) use action_execution::ActionExecutionPhase;
pub(crate) use action_selection::ActionSelectionPhase;

use super::{CombatContext, CombatEvent, PhaseKind};
use crate::error::{CombatError, GameError};
use crate::state::ActionId;

/// What a lifecycle hook asks the machine to do next.
#[derive(Debug)]
pub(crate) enum Transition {
    Stay,
    To(Phase),
}

#[derive(Debug)]
pub(crate) enum Phase {
    CombatStart,
    ActionSelection(ActionSelectionPhase),
    TurnSpeedRoll,
    ActionExecution(ActionExecutionPhase),
    RoundEnd,
    CombatDefeat,
    CombatEnd,
}

impl Phase {
    pub(crate) fn action_selection() -> Self {
        Self::ActionSelection(ActionSelectionPhase::new())
    }

    pub(crate) fn action_execution() -> Self {
        Self::ActionExecution(ActionExecutionPhase::new())
    }

    pub(crate) fn kind(&self) -> PhaseKind {
        match self {
            Self::CombatStart => PhaseKind::CombatStart,
            Self::ActionSelection(_) => PhaseKind::ActionSelection,
            Self::TurnSpeedRoll => PhaseKind::TurnSpeedRoll,
            Self::ActionExecution(_) => PhaseKind::ActionExecution,
            Self::RoundEnd => PhaseKind::RoundEnd,
            Self::CombatDefeat => PhaseKind::CombatDefeat,
            Self::CombatEnd => PhaseKind::CombatEnd,
        }
    }

    pub(crate) fn on_enter(&mut self, ctx: &mut CombatContext) -> Transition {
        match self {
            Self::CombatStart => combat_start::enter(ctx),
            Self::ActionSelection(phase) => phase.on_enter(ctx),
            Self::TurnSpeedRoll => speed_roll::enter(ctx),
            Self::ActionExecution(phase) => phase.on_enter(ctx),
            Self::RoundEnd => round_end::enter(ctx),
            Self::CombatDefeat => terminal::enter_defeat(ctx),
            Self::CombatEnd => terminal::enter_victory(ctx),
        }
    }

    pub(crate) fn on_exit(&mut self, ctx: &mut CombatContext) {
        match self {
            Self::ActionSelection(phase) => phase.on_exit(ctx),
            Self::ActionExecution(phase) => phase.on_exit(ctx),
            Self::CombatStart
            | Self::TurnSpeedRoll
            | Self::RoundEnd
            | Self::CombatDefeat
            | Self::CombatEnd => {}
        }
    }

    pub(crate) fn update(&mut self, ctx: &mut CombatContext, dt: Duration) -> Transition {
        match self {
            Self::ActionSelection(phase) => phase.update(ctx, dt),
            Self::ActionExecution(phase) => phase.update(ctx, dt),
            Self::CombatStart
            | Self::TurnSpeedRoll
            | Self::RoundEnd
            | Self::CombatDefeat
            | Self::CombatEnd => Transition::Stay,
        }
    }

    pub(crate) fn handle_event(&mut self, ctx: &mut CombatContext, event: CombatEvent) -> Transition {
        match self {
            Self::ActionSelection(phase) => phase.handle_event(ctx, event),
            Self::ActionExecution(phase) => phase.handle_event(ctx, event),
            Self::CombatStart
            | Self::TurnSpeedRoll
            | Self::RoundEnd
            | Self::CombatDefeat
            | Self::CombatEnd => {
                ignore_event(self.kind(), event);
                Transition::Stay
            }
        }
    }

    pub(crate) fn is_waiting_for_animation(&self) -> bool {
        match self {
            Self::ActionSelection(phase) => phase.is_waiting_for_animation(),
            Self::ActionExecution(phase) => phase.is_waiting_for_animation(),
            _ => false,
        }
    }

    /// Ids a waiting human may currently choose from.
    pub(crate) fn pending_choices(&self) -> Vec<ActionId> {
        match self {
            Self::ActionSelection(phase) => phase.pending_choices(),
            _ => Vec::new(),
        }
    }
}

/// Logs an event the active phase has no use for.
pub(crate) fn ignore_event(phase: PhaseKind, event: CombatEvent) {
    match event {
        CombatEvent::AnimationComplete(ticket) => {
            tracing::debug!(%phase, %ticket, "ignoring animation completion");
        }
        CombatEvent::ChoiceConfirmed(choice) => {
            tracing::debug!(%phase, action = %choice.action, "choice arrived outside a human sub-turn");
            CombatError::NoPendingChoice.report();
        }
    }
}
