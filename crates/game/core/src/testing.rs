//! Recording collaborators for deterministic tests.
//!
//! Each double shares its log through `Rc<RefCell<..>>`: hand one clone to
//! [`Collaborators`](crate::host::Collaborators) and keep another to inspect
//! what the engine asked for.

use std::cell::RefCell;
use std::rc::Rc;

use crate::action::{ActionDefinition, ActionRecord};
use crate::engine::CombatOutcome;
use crate::host::{
    ActionResolver, AnimationCompletion, AnimationPlayer, AnimationTicket, ChoicePrompt,
    InputProvider, Narration, Narrator, SceneDirector,
};
use crate::state::{ActionId, CombatantId, CombatantStore};

pub use crate::env::ScriptedRng;

/// One request received by [`RecordingAnimationPlayer`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnimationRequest {
    Action {
        ticket: AnimationTicket,
        caster: CombatantId,
        action: ActionId,
        targets: Vec<CombatantId>,
    },
    Card {
        ticket: AnimationTicket,
        caster: CombatantId,
        action: ActionId,
    },
}

impl AnimationRequest {
    pub fn ticket(&self) -> AnimationTicket {
        match self {
            Self::Action { ticket, .. } | Self::Card { ticket, .. } => *ticket,
        }
    }
}

#[derive(Debug, Default)]
struct AnimationLog {
    requests: Vec<AnimationRequest>,
    pending: Vec<AnimationCompletion>,
    auto_complete: bool,
}

/// Records every request; completions are held until the test releases them.
#[derive(Clone, Debug, Default)]
pub struct RecordingAnimationPlayer {
    log: Rc<RefCell<AnimationLog>>,
}

impl RecordingAnimationPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Completes every request as soon as it is made.
    pub fn auto_completing() -> Self {
        let player = Self::default();
        player.log.borrow_mut().auto_complete = true;
        player
    }

    pub fn requests(&self) -> Vec<AnimationRequest> {
        self.log.borrow().requests.clone()
    }

    /// `(caster, action)` of every execution request, in order.
    pub fn executed(&self) -> Vec<(CombatantId, ActionId)> {
        self.log
            .borrow()
            .requests
            .iter()
            .filter_map(|request| match request {
                AnimationRequest::Action { caster, action, .. } => Some((*caster, action.clone())),
                AnimationRequest::Card { .. } => None,
            })
            .collect()
    }

    pub fn pending_tickets(&self) -> Vec<AnimationTicket> {
        self.log
            .borrow()
            .pending
            .iter()
            .map(AnimationCompletion::ticket)
            .collect()
    }

    /// Completes every held request. Returns how many were still listened to.
    pub fn complete_all(&self) -> usize {
        let pending = std::mem::take(&mut self.log.borrow_mut().pending);
        pending
            .into_iter()
            .filter(|completion| completion.clone().complete())
            .count()
    }

    /// Forgets every held request without completing it.
    pub fn drop_pending(&self) {
        self.log.borrow_mut().pending.clear();
    }

    fn record(&self, request: AnimationRequest, completion: AnimationCompletion) {
        let mut log = self.log.borrow_mut();
        log.requests.push(request);
        if log.auto_complete {
            completion.complete();
        } else {
            log.pending.push(completion);
        }
    }
}

impl AnimationPlayer for RecordingAnimationPlayer {
    fn play_action(&mut self, record: &ActionRecord, completion: AnimationCompletion) {
        let request = AnimationRequest::Action {
            ticket: completion.ticket(),
            caster: record.caster,
            action: record.action_id().clone(),
            targets: record.targets.clone(),
        };
        self.record(request, completion);
    }

    fn play_card(
        &mut self,
        caster: CombatantId,
        action: &ActionDefinition,
        completion: AnimationCompletion,
    ) {
        let request = AnimationRequest::Card {
            ticket: completion.ticket(),
            caster,
            action: action.id.clone(),
        };
        self.record(request, completion);
    }
}

/// Collects every narrative line.
#[derive(Clone, Debug, Default)]
pub struct RecordingNarrator {
    lines: Rc<RefCell<Vec<Narration>>>,
}

impl RecordingNarrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<Narration> {
        self.lines.borrow().clone()
    }

    pub fn any(&self, predicate: impl Fn(&Narration) -> bool) -> bool {
        self.lines.borrow().iter().any(predicate)
    }

    pub fn count(&self, predicate: impl Fn(&Narration) -> bool) -> usize {
        self.lines.borrow().iter().filter(|line| predicate(line)).count()
    }
}

impl Narrator for RecordingNarrator {
    fn narrate(&mut self, line: &Narration) {
        self.lines.borrow_mut().push(line.clone());
    }
}

#[derive(Debug, Default)]
struct InputLog {
    prompts: Vec<ChoicePrompt>,
    withdrawn: Vec<CombatantId>,
}

/// Queues every prompt presented to a human.
#[derive(Clone, Debug, Default)]
pub struct QueuedInput {
    log: Rc<RefCell<InputLog>>,
}

impl QueuedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prompts(&self) -> Vec<ChoicePrompt> {
        self.log.borrow().prompts.clone()
    }

    pub fn last_prompt(&self) -> Option<ChoicePrompt> {
        self.log.borrow().prompts.last().cloned()
    }

    pub fn withdrawn(&self) -> Vec<CombatantId> {
        self.log.borrow().withdrawn.clone()
    }
}

impl InputProvider for QueuedInput {
    fn present_choices(&mut self, prompt: &ChoicePrompt) {
        self.log.borrow_mut().prompts.push(prompt.clone());
    }

    fn withdraw(&mut self, combatant: CombatantId) {
        self.log.borrow_mut().withdrawn.push(combatant);
    }
}

/// Records every outcome handed to the scene director.
#[derive(Clone, Debug, Default)]
pub struct RecordingScene {
    outcomes: Rc<RefCell<Vec<CombatOutcome>>>,
}

impl RecordingScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn outcomes(&self) -> Vec<CombatOutcome> {
        self.outcomes.borrow().clone()
    }
}

impl SceneDirector for RecordingScene {
    fn end_encounter(&mut self, outcome: CombatOutcome) {
        self.outcomes.borrow_mut().push(outcome);
    }
}

/// Resolver backed by a closure.
pub struct ResolveWith<F> {
    resolve: F,
}

impl<F> ResolveWith<F>
where
    F: FnMut(&ActionRecord, &mut dyn CombatantStore),
{
    pub fn new(resolve: F) -> Self {
        Self { resolve }
    }
}

impl<F> ActionResolver for ResolveWith<F>
where
    F: FnMut(&ActionRecord, &mut dyn CombatantStore),
{
    fn resolve(&mut self, record: &ActionRecord, store: &mut dyn CombatantStore) {
        (self.resolve)(record, store);
    }
}
