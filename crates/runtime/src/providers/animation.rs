use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use combat_core::{ActionDefinition, ActionRecord, AnimationCompletion, AnimationPlayer, CombatantId};

/// How long each kind of animation plays.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationTiming {
    pub action: Duration,
    pub card: Duration,
}

impl Default for AnimationTiming {
    fn default() -> Self {
        Self {
            action: Duration::from_millis(800),
            card: Duration::from_millis(300),
        }
    }
}

#[derive(Debug)]
struct Playing {
    completion: AnimationCompletion,
    remaining: Duration,
}

#[derive(Debug, Default)]
struct Timeline {
    playing: Vec<Playing>,
    timing: AnimationTiming,
    drop_completions: bool,
    started: usize,
    completed: usize,
}

/// Plays every animation for a fixed duration, then reports completion.
///
/// The driver calls [`advance`](Self::advance) once per frame. With
/// `drop_completions` set, finished animations are discarded without
/// reporting, leaving the engine to its failsafe.
#[derive(Clone, Debug, Default)]
pub struct TimedAnimationPlayer {
    timeline: Rc<RefCell<Timeline>>,
}

impl TimedAnimationPlayer {
    pub fn new(timing: AnimationTiming) -> Self {
        let player = Self::default();
        player.timeline.borrow_mut().timing = timing;
        player
    }

    pub fn dropping_completions(self, drop: bool) -> Self {
        self.timeline.borrow_mut().drop_completions = drop;
        self
    }

    /// Runs the clock forward. Returns how many completions were delivered.
    pub fn advance(&self, dt: Duration) -> usize {
        let mut timeline = self.timeline.borrow_mut();
        let drop_completions = timeline.drop_completions;

        let mut finished = Vec::new();
        timeline.playing.retain_mut(|playing| {
            playing.remaining = playing.remaining.saturating_sub(dt);
            if playing.remaining.is_zero() {
                finished.push(playing.completion.clone());
                false
            } else {
                true
            }
        });

        if drop_completions {
            if !finished.is_empty() {
                tracing::debug!(dropped = finished.len(), "animation completions dropped");
            }
            return 0;
        }

        let delivered = finished
            .into_iter()
            .map(AnimationCompletion::complete)
            .filter(|&listened| listened)
            .count();
        timeline.completed += delivered;
        delivered
    }

    pub fn in_flight(&self) -> usize {
        self.timeline.borrow().playing.len()
    }

    pub fn started(&self) -> usize {
        self.timeline.borrow().started
    }

    pub fn completed(&self) -> usize {
        self.timeline.borrow().completed
    }

    fn play(&self, completion: AnimationCompletion, length: Duration) {
        let mut timeline = self.timeline.borrow_mut();
        timeline.started += 1;
        tracing::trace!(ticket = %completion.ticket(), ?length, "animation started");
        timeline.playing.push(Playing {
            completion,
            remaining: length,
        });
    }
}

impl AnimationPlayer for TimedAnimationPlayer {
    fn play_action(&mut self, _record: &ActionRecord, completion: AnimationCompletion) {
        let length = self.timeline.borrow().timing.action;
        self.play(completion, length);
    }

    fn play_card(
        &mut self,
        _caster: CombatantId,
        _action: &ActionDefinition,
        completion: AnimationCompletion,
    ) {
        let length = self.timeline.borrow().timing.card;
        self.play(completion, length);
    }
}
