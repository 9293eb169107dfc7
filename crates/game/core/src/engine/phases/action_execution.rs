//! Drains the resolved order one action at a time.
//!
//! Each dispatched action is resolved by the external resolver, then
//! animated. The phase suspends until the animation reports back (or the
//! failsafe fires), waits out the pacing delay and dispatches the next
//! record. Records whose caster has fallen are dropped without animating.

use std::collections::VecDeque;
use std::time::Duration;

use super::{Phase, Transition, ignore_event};
use crate::action::ActionRecord;
use crate::engine::wait::{AnimationWait, CompletionInbox, Countdown, WaitStatus};
use crate::engine::{CombatContext, CombatEvent, PhaseKind};
use crate::error::{CombatError, GameError};
use crate::host::{AnimationTicket, Narration};

#[derive(Debug, Default)]
enum ExecutionStep {
    #[default]
    Idle,
    AwaitingAnimation(AnimationWait),
    Pacing(Countdown),
    Done,
}

#[derive(Debug, Default)]
pub(crate) struct ActionExecutionPhase {
    queue: VecDeque<ActionRecord>,
    inbox: Option<CompletionInbox>,
    step: ExecutionStep,
}

impl ActionExecutionPhase {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn on_enter(&mut self, ctx: &mut CombatContext) -> Transition {
        self.inbox = Some(CompletionInbox::open());
        self.queue = ctx.resolved.iter().cloned().collect();
        tracing::debug!(queued = self.queue.len(), "execution queue seeded");
        self.dispatch_next(ctx)
    }

    pub(crate) fn on_exit(&mut self, _ctx: &mut CombatContext) {
        self.inbox = None;
    }

    pub(crate) fn update(&mut self, ctx: &mut CombatContext, dt: Duration) -> Transition {
        match &mut self.step {
            ExecutionStep::AwaitingAnimation(wait) => match wait.poll(self.inbox.as_mut(), dt) {
                WaitStatus::Pending => Transition::Stay,
                WaitStatus::Completed => self.start_pacing(ctx),
                WaitStatus::TimedOut => {
                    let ticket = wait.ticket();
                    CombatError::AnimationTimeout {
                        ticket,
                        waited_ms: wait.waited().as_millis() as u64,
                    }
                    .report();
                    ctx.narrate(Narration::AnimationTimedOut { ticket });
                    self.start_pacing(ctx)
                }
            },
            ExecutionStep::Pacing(countdown) => {
                if countdown.tick(dt) {
                    self.dispatch_next(ctx)
                } else {
                    Transition::Stay
                }
            }
            ExecutionStep::Idle | ExecutionStep::Done => Transition::Stay,
        }
    }

    pub(crate) fn handle_event(&mut self, ctx: &mut CombatContext, event: CombatEvent) -> Transition {
        match event {
            CombatEvent::AnimationComplete(ticket) if self.awaits_ticket(ticket) => {
                self.start_pacing(ctx)
            }
            event => {
                ignore_event(PhaseKind::ActionExecution, event);
                Transition::Stay
            }
        }
    }

    pub(crate) fn is_waiting_for_animation(&self) -> bool {
        matches!(self.step, ExecutionStep::AwaitingAnimation(_))
    }

    fn awaits_ticket(&self, ticket: AnimationTicket) -> bool {
        matches!(&self.step, ExecutionStep::AwaitingAnimation(wait) if wait.matches(ticket))
    }

    fn start_pacing(&mut self, ctx: &mut CombatContext) -> Transition {
        self.step = ExecutionStep::Pacing(Countdown::new(ctx.config.post_action_delay()));
        Transition::Stay
    }

    /// Dequeues until one record is dispatched or the queue runs dry.
    fn dispatch_next(&mut self, ctx: &mut CombatContext) -> Transition {
        while let Some(record) = self.queue.pop_front() {
            let combatant = ctx.label(record.caster);
            let action = record.action.name.clone();

            if ctx.is_defeated(record.caster) {
                tracing::debug!(caster = %record.caster, action = %record.action_id(), "caster has fallen; skipping");
                ctx.narrate(Narration::ActionSkipped { combatant, action });
                continue;
            }

            ctx.narrate(Narration::ActionExecuting { combatant, action });
            ctx.collaborators
                .resolver
                .resolve(&record, ctx.store.as_mut());

            let ticket = ctx.next_ticket();
            let Some(inbox) = self.inbox.as_ref() else {
                continue;
            };
            ctx.collaborators
                .animation
                .play_action(&record, inbox.handle(ticket));

            self.step = ExecutionStep::AwaitingAnimation(AnimationWait::new(
                ticket,
                ctx.config.failsafe_timeout(),
            ));
            return Transition::Stay;
        }

        self.step = ExecutionStep::Done;
        Transition::To(Phase::RoundEnd)
    }
}
