//! Phase state machine.
//!
//! Holds exactly one active phase. Every transition runs the outgoing
//! phase's `on_exit` before the incoming phase's `on_enter`, which is what
//! closes a phase's completion inbox before anyone else can be notified.

use std::time::Duration;

use super::phases::{Phase, Transition};
use super::{CombatContext, CombatEvent, PhaseKind};
use crate::host::Narration;

#[derive(Debug)]
pub struct CombatStateMachine {
    current: Phase,
    started: bool,
    /// Transition deferred because the per-call budget ran out.
    pending: Option<Phase>,
}

impl CombatStateMachine {
    pub fn new() -> Self {
        Self {
            current: Phase::CombatStart,
            started: false,
            pending: None,
        }
    }

    pub fn phase_kind(&self) -> PhaseKind {
        self.current.kind()
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_terminal(&self) -> bool {
        self.current.kind().is_terminal()
    }

    /// True if a transition is queued for the next update.
    pub fn has_pending_transition(&self) -> bool {
        self.pending.is_some()
    }

    pub(crate) fn phase(&self) -> &Phase {
        &self.current
    }

    /// Enters the initial phase. Later calls do nothing.
    pub(crate) fn start(&mut self, ctx: &mut CombatContext) {
        if self.started {
            return;
        }
        self.started = true;
        tracing::debug!(phase = %self.current.kind(), "entering initial phase");
        ctx.narrate(Narration::PhaseEntered {
            phase: self.current.kind(),
        });
        let transition = self.current.on_enter(ctx);
        self.drive(ctx, transition);
    }

    /// Advances the active phase by one frame.
    ///
    /// A transition deferred by the previous call is applied first and
    /// consumes this frame.
    pub(crate) fn update(&mut self, ctx: &mut CombatContext, dt: Duration) {
        if !self.started {
            self.start(ctx);
            return;
        }
        if let Some(next) = self.pending.take() {
            self.drive(ctx, Transition::To(next));
            return;
        }
        let transition = self.current.update(ctx, dt);
        self.drive(ctx, transition);
    }

    pub(crate) fn handle_event(&mut self, ctx: &mut CombatContext, event: CombatEvent) {
        if !self.started || self.pending.is_some() {
            tracing::debug!(?event, "no phase is accepting events");
            return;
        }
        let transition = self.current.handle_event(ctx, event);
        self.drive(ctx, transition);
    }

    /// Follows chained transitions up to the configured budget.
    fn drive(&mut self, ctx: &mut CombatContext, mut transition: Transition) {
        let mut budget = ctx.config.max_transitions_per_update.max(1);
        while let Transition::To(next) = transition {
            if budget == 0 {
                tracing::debug!(next = %next.kind(), "transition budget exhausted; deferring");
                self.pending = Some(next);
                return;
            }
            budget -= 1;
            transition = self.enter(ctx, next);
        }
    }

    fn enter(&mut self, ctx: &mut CombatContext, next: Phase) -> Transition {
        self.current.on_exit(ctx);
        let previous = std::mem::replace(&mut self.current, next);
        let phase = self.current.kind();
        tracing::debug!(from = %previous.kind(), to = %phase, "phase transition");
        ctx.narrate(Narration::PhaseEntered { phase });
        self.current.on_enter(ctx)
    }
}

impl Default for CombatStateMachine {
    fn default() -> Self {
        Self::new()
    }
}
