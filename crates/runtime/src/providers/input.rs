use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use combat_core::{ChoicePrompt, CombatantId, HumanChoice, InputProvider};

#[derive(Debug)]
struct Pending {
    combatant: CombatantId,
    choice: HumanChoice,
    remaining: Duration,
}

#[derive(Debug, Default)]
struct Outbox {
    pending: VecDeque<Pending>,
    think_time: Duration,
    prompts: usize,
}

/// Plays the human side automatically.
///
/// Every prompt is answered with the first damaging choice (or the first
/// choice when none deals damage) once `think_time` has passed. Targets
/// are left empty so the engine picks the first living enemy. The driver
/// collects ready answers with [`ready`](Self::ready) and confirms them.
#[derive(Clone, Debug, Default)]
pub struct AutoPilot {
    outbox: Rc<RefCell<Outbox>>,
}

impl AutoPilot {
    pub fn new(think_time: Duration) -> Self {
        let pilot = Self::default();
        pilot.outbox.borrow_mut().think_time = think_time;
        pilot
    }

    /// Ages queued answers and returns those that are ready.
    pub fn ready(&self, dt: Duration) -> Vec<HumanChoice> {
        let mut outbox = self.outbox.borrow_mut();
        let mut ready = Vec::new();
        outbox.pending.retain_mut(|pending| {
            pending.remaining = pending.remaining.saturating_sub(dt);
            if pending.remaining.is_zero() {
                ready.push(pending.choice.clone());
                false
            } else {
                true
            }
        });
        ready
    }

    /// Number of prompts answered so far.
    pub fn prompts(&self) -> usize {
        self.outbox.borrow().prompts
    }

    fn pick(prompt: &ChoicePrompt) -> Option<HumanChoice> {
        prompt
            .choices
            .iter()
            .find(|choice| choice.deals_damage())
            .or_else(|| prompt.choices.first())
            .map(|choice| HumanChoice::new(choice.id.clone()))
    }
}

impl InputProvider for AutoPilot {
    fn present_choices(&mut self, prompt: &ChoicePrompt) {
        let mut outbox = self.outbox.borrow_mut();
        outbox.prompts += 1;
        let Some(choice) = Self::pick(prompt) else {
            return;
        };
        tracing::debug!(combatant = %prompt.combatant, action = %choice.action, "auto-pilot queued a choice");
        let remaining = outbox.think_time;
        outbox.pending.push_back(Pending {
            combatant: prompt.combatant,
            choice,
            remaining,
        });
    }

    fn withdraw(&mut self, combatant: CombatantId) {
        self.outbox
            .borrow_mut()
            .pending
            .retain(|pending| pending.combatant != combatant);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use combat_core::{ActionDefinition, ActionId, Effect, TargetType};

    fn prompt() -> ChoicePrompt {
        ChoicePrompt {
            combatant: CombatantId(0),
            choices: vec![
                Arc::new(ActionDefinition::new("heal", TargetType::SelfOnly).with_effect(Effect::heal(3))),
                Arc::new(
                    ActionDefinition::new("slash", TargetType::SingleEnemy).with_effect(Effect::damage(4)),
                ),
            ],
            round: 1,
        }
    }

    #[test]
    fn answers_with_the_first_damaging_choice_after_thinking() {
        let mut pilot = AutoPilot::new(Duration::from_millis(100));
        pilot.present_choices(&prompt());

        assert!(pilot.ready(Duration::from_millis(60)).is_empty());
        let ready = pilot.ready(Duration::from_millis(40));
        assert_eq!(ready.len(), 1);
        assert_eq!(ready[0].action, ActionId::new("slash"));
        assert!(ready[0].targets.is_empty());
    }

    #[test]
    fn withdrawn_prompts_are_not_answered() {
        let mut pilot = AutoPilot::new(Duration::from_millis(100));
        pilot.present_choices(&prompt());
        pilot.withdraw(CombatantId(0));

        assert!(pilot.ready(Duration::from_secs(1)).is_empty());
        assert_eq!(pilot.prompts(), 1);
    }
}
