//! One combatant's selection sub-turn.
//!
//! Every combatant gets a fresh `ActionSelectionPhase`. Entering draws the
//! hand and generates the weapon attack; AI combatants decide on the spot,
//! humans suspend until a confirmed choice arrives and its card animation
//! finishes. Finishing the sub-turn advances the cursor, which either
//! starts the next combatant's sub-turn or wraps into the speed roll.

use std::sync::Arc;
use std::time::Duration;

use super::{Phase, Transition, ignore_event};
use crate::action::{ActionDefinition, ActionRecord, TargetType};
use crate::ai::{AiPolicy, first_living_enemy, select_targets};
use crate::engine::wait::{AnimationWait, CompletionInbox, Countdown, WaitStatus};
use crate::engine::{CombatContext, CombatEvent, PhaseKind, TurnAdvance};
use crate::error::{CombatError, GameError};
use crate::host::{AnimationTicket, ChoicePrompt, HumanChoice, Narration};
use crate::state::{ActionId, CombatantId, ComponentKind, Controller};

#[derive(Debug, Default)]
enum SelectionStep {
    #[default]
    Idle,
    AwaitingChoice {
        prompt: ChoicePrompt,
        forfeit: Option<Countdown>,
    },
    AwaitingCardPlay(AnimationWait),
    Done,
}

#[derive(Debug, Default)]
pub(crate) struct ActionSelectionPhase {
    combatant: Option<CombatantId>,
    inbox: Option<CompletionInbox>,
    step: SelectionStep,
}

impl ActionSelectionPhase {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn on_enter(&mut self, ctx: &mut CombatContext) -> Transition {
        self.inbox = Some(CompletionInbox::open());
        if ctx.is_new_round() {
            ctx.narrate(Narration::RoundStarted { round: ctx.round });
        }

        let Some(combatant) = ctx.current_combatant() else {
            return self.finish(ctx);
        };
        self.combatant = Some(combatant);

        match self.begin(ctx, combatant) {
            Ok(transition) => transition,
            Err(error) => {
                error.report();
                let name = ctx.label(combatant);
                ctx.narrate(Narration::TurnSkipped {
                    combatant: name,
                    reason: error.to_string(),
                });
                self.finish(ctx)
            }
        }
    }

    pub(crate) fn on_exit(&mut self, ctx: &mut CombatContext) {
        if let (SelectionStep::AwaitingChoice { .. }, Some(combatant)) = (&self.step, self.combatant) {
            ctx.collaborators.input.withdraw(combatant);
        }
        self.inbox = None;
    }

    pub(crate) fn update(&mut self, ctx: &mut CombatContext, dt: Duration) -> Transition {
        match &mut self.step {
            SelectionStep::AwaitingChoice {
                forfeit: Some(countdown),
                ..
            } => {
                if !countdown.tick(dt) {
                    return Transition::Stay;
                }
                let Some(combatant) = self.combatant else {
                    return self.finish(ctx);
                };
                tracing::warn!(%combatant, waited_ms = countdown.elapsed().as_millis() as u64, "human choice timed out");
                ctx.collaborators.input.withdraw(combatant);
                let name = ctx.label(combatant);
                ctx.narrate(Narration::TurnForfeited { combatant: name });
                self.finish(ctx)
            }
            SelectionStep::AwaitingCardPlay(wait) => match wait.poll(self.inbox.as_mut(), dt) {
                WaitStatus::Pending => Transition::Stay,
                WaitStatus::Completed => self.finish(ctx),
                WaitStatus::TimedOut => {
                    let ticket = wait.ticket();
                    CombatError::AnimationTimeout {
                        ticket,
                        waited_ms: wait.waited().as_millis() as u64,
                    }
                    .report();
                    ctx.narrate(Narration::AnimationTimedOut { ticket });
                    self.finish(ctx)
                }
            },
            SelectionStep::Idle | SelectionStep::AwaitingChoice { .. } | SelectionStep::Done => {
                Transition::Stay
            }
        }
    }

    pub(crate) fn handle_event(&mut self, ctx: &mut CombatContext, event: CombatEvent) -> Transition {
        match event {
            CombatEvent::ChoiceConfirmed(choice) if self.is_awaiting_choice() => {
                self.confirm(ctx, choice)
            }
            CombatEvent::AnimationComplete(ticket) if self.awaits_ticket(ticket) => self.finish(ctx),
            event => {
                ignore_event(PhaseKind::ActionSelection, event);
                Transition::Stay
            }
        }
    }

    fn is_awaiting_choice(&self) -> bool {
        matches!(self.step, SelectionStep::AwaitingChoice { .. })
    }

    fn awaits_ticket(&self, ticket: AnimationTicket) -> bool {
        matches!(&self.step, SelectionStep::AwaitingCardPlay(wait) if wait.matches(ticket))
    }

    pub(crate) fn is_waiting_for_animation(&self) -> bool {
        matches!(self.step, SelectionStep::AwaitingCardPlay(_))
    }

    pub(crate) fn pending_choices(&self) -> Vec<ActionId> {
        match &self.step {
            SelectionStep::AwaitingChoice { prompt, .. } => prompt.action_ids().cloned().collect(),
            _ => Vec::new(),
        }
    }

    /// Draws, generates the weapon attack and branches on the controller.
    fn begin(&mut self, ctx: &mut CombatContext, combatant: CombatantId) -> Result<Transition, CombatError> {
        let hand_size = ctx.config.hand_size;
        let (drawn, hand) = ctx.draw_hand(combatant, hand_size)?;
        let name = ctx.label(combatant);
        ctx.narrate(Narration::CardsDrawn {
            combatant: name.clone(),
            drawn,
            hand: hand.len(),
        });

        let mut choices: Vec<Arc<ActionDefinition>> = Vec::with_capacity(hand.len() + 1);
        for id in &hand {
            match ctx.action_definition(id) {
                Some(definition) => choices.push(definition),
                None => CombatError::UnknownAction(id.clone()).report(),
            }
        }
        if let Some(temporary) = ctx.temporary_action_for(combatant) {
            choices.push(temporary);
        }

        if choices.is_empty() {
            tracing::info!(%combatant, "nothing to play; skipping selection");
            ctx.narrate(Narration::HandEmpty { combatant: name });
            return Ok(self.finish(ctx));
        }

        match ctx.store.controller(combatant) {
            Some(Controller::Player) => Ok(self.present(ctx, combatant, choices)),
            Some(Controller::Ai) => self.decide(ctx, combatant, choices),
            None => Err(CombatError::missing(combatant, ComponentKind::Controller)),
        }
    }

    fn present(
        &mut self,
        ctx: &mut CombatContext,
        combatant: CombatantId,
        choices: Vec<Arc<ActionDefinition>>,
    ) -> Transition {
        let prompt = ChoicePrompt {
            combatant,
            choices,
            round: ctx.round,
        };
        let name = ctx.label(combatant);
        ctx.narrate(Narration::AwaitingChoice {
            combatant: name,
            choices: prompt.choices.iter().map(|choice| choice.name.clone()).collect(),
        });
        ctx.collaborators.input.present_choices(&prompt);

        self.step = SelectionStep::AwaitingChoice {
            prompt,
            forfeit: ctx.config.human_choice_timeout().map(Countdown::new),
        };
        Transition::Stay
    }

    fn decide(
        &mut self,
        ctx: &mut CombatContext,
        combatant: CombatantId,
        choices: Vec<Arc<ActionDefinition>>,
    ) -> Result<Transition, CombatError> {
        let intellect = ctx
            .store
            .intellect(combatant)
            .ok_or(CombatError::missing(combatant, ComponentKind::AiIntellect))?;

        let ids: Vec<ActionId> = choices.iter().map(|choice| choice.id.clone()).collect();
        let lookup = |id: &ActionId| choices.iter().find(|choice| &choice.id == id).cloned();
        let chosen = AiPolicy::from_config(&ctx.config)
            .choose(&ids, intellect, lookup, ctx.rng.as_mut())
            .and_then(|id| lookup(&id));

        if let Some(definition) = chosen {
            let targets = select_targets(&definition, &ctx.roster, ctx.store.as_ref());
            self.commit(ctx, ActionRecord::new(combatant, definition).with_targets(targets));
        }
        Ok(self.finish(ctx))
    }

    fn confirm(&mut self, ctx: &mut CombatContext, choice: HumanChoice) -> Transition {
        let SelectionStep::AwaitingChoice { prompt, .. } = &self.step else {
            return Transition::Stay;
        };
        let combatant = prompt.combatant;

        let Some(definition) = prompt.get(&choice.action).cloned() else {
            CombatError::InvalidChoice {
                combatant,
                action: choice.action.clone(),
            }
            .report();
            let name = ctx.label(combatant);
            ctx.narrate(Narration::ChoiceRejected {
                combatant: name,
                action: choice.action.to_string(),
            });
            return Transition::Stay;
        };

        let mut targets = choice.targets;
        if targets.is_empty() && definition.target == TargetType::SingleEnemy {
            targets.extend(first_living_enemy(&ctx.roster, ctx.store.as_ref()));
        }

        ctx.collaborators.input.withdraw(combatant);
        self.commit(
            ctx,
            ActionRecord::new(combatant, Arc::clone(&definition)).with_targets(targets),
        );

        let ticket = ctx.next_ticket();
        let Some(inbox) = self.inbox.as_ref() else {
            return self.finish(ctx);
        };
        let completion = inbox.handle(ticket);
        ctx.collaborators
            .animation
            .play_card(combatant, &definition, completion);

        self.step = SelectionStep::AwaitingCardPlay(AnimationWait::new(
            ticket,
            ctx.config.failsafe_timeout(),
        ));
        Transition::Stay
    }

    fn commit(&mut self, ctx: &mut CombatContext, record: ActionRecord) {
        let name = ctx.label(record.caster);
        ctx.narrate(Narration::ActionChosen {
            combatant: name,
            action: record.action.name.clone(),
        });
        ctx.add_action(record);
    }

    /// Ends the sub-turn and moves the cursor.
    fn finish(&mut self, ctx: &mut CombatContext) -> Transition {
        self.step = SelectionStep::Done;
        match ctx.advance_turn() {
            TurnAdvance::Next(_) => Transition::To(Phase::action_selection()),
            TurnAdvance::Wrapped => Transition::To(Phase::TurnSpeedRoll),
        }
    }
}
