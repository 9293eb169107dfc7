//! Frame-driven headless driver.
//!
//! A [`Simulation`] owns one orchestrator and the host halves of its
//! collaborators. Every [`step`](Simulation::step) advances the animation
//! clock, feeds the auto-pilot's ready answers back as events and then
//! updates the engine, in that order.

use std::sync::Arc;
use std::time::Duration;

use combat_content::Encounter;
use combat_core::{
    CatalogOracle, Collaborators, CombatConfig, CombatOrchestrator, CombatantId, MemoryStore,
    Narration,
};

use crate::error::{Result, RuntimeError};
use crate::providers::{
    AnimationTiming, AutoPilot, EffectResolver, Journal, OutcomeScene, TimedAnimationPlayer,
    TracingNarrator,
};
use crate::report::{CombatantReport, SimReport};
use crate::rng::EntropyRng;

pub struct Simulation {
    combat: CombatOrchestrator,
    animation: TimedAnimationPlayer,
    pilot: AutoPilot,
    journal: Journal,
    scene: OutcomeScene,
    encounter: String,
    roster: Vec<CombatantId>,
    seed: Option<u64>,
    frame: Duration,
    frames: u64,
    elapsed: Duration,
}

impl Simulation {
    pub fn builder() -> SimulationBuilder {
        SimulationBuilder::default()
    }

    /// Runs one frame.
    pub fn step(&mut self) {
        let dt = self.frame;
        self.animation.advance(dt);
        for choice in self.pilot.ready(dt) {
            self.combat.confirm_choice(choice);
        }
        self.combat.update(dt);

        self.frames += 1;
        self.elapsed += dt;
    }

    /// Steps until the encounter ends.
    ///
    /// # Errors
    ///
    /// `FrameBudgetExhausted` if it is still running after `max_frames`.
    pub fn run(&mut self, max_frames: u64) -> Result<SimReport> {
        while !self.is_finished() {
            if self.frames >= max_frames {
                return Err(RuntimeError::FrameBudgetExhausted { frames: self.frames });
            }
            self.step();
        }
        Ok(self.report())
    }

    /// Like [`run`](Self::run), pacing each frame against the wall clock.
    pub async fn run_realtime(&mut self, max_frames: u64) -> Result<SimReport> {
        let mut ticker = tokio::time::interval(self.frame);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        while !self.is_finished() {
            if self.frames >= max_frames {
                return Err(RuntimeError::FrameBudgetExhausted { frames: self.frames });
            }
            ticker.tick().await;
            self.step();
        }
        Ok(self.report())
    }

    pub fn is_finished(&self) -> bool {
        self.combat.is_finished()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn combat(&self) -> &CombatOrchestrator {
        &self.combat
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    pub fn report(&self) -> SimReport {
        let store = self.combat.store();
        let combatants = self
            .roster
            .iter()
            .map(|&id| {
                let health = store.health(id);
                CombatantReport {
                    id,
                    name: store.label(id),
                    controller: store.controller(id),
                    health: health.map(|health| health.current),
                    max_health: health.map(|health| health.max),
                    defeated: health.is_some_and(|health| health.is_defeated()),
                }
            })
            .collect();

        SimReport {
            encounter: self.encounter.clone(),
            seed: self.seed,
            outcome: self.scene.outcome().or(self.combat.outcome()),
            rounds: self.combat.round(),
            frames: self.frames,
            simulated_ms: self.elapsed.as_millis() as u64,
            animations_started: self.animation.started(),
            animations_completed: self.animation.completed(),
            animations_timed_out: self
                .journal
                .count(|line| matches!(line, Narration::AnimationTimedOut { .. })),
            combatants,
            narration: self.journal.rendered(),
        }
    }
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("encounter", &self.encounter)
            .field("phase", &self.combat.phase_kind())
            .field("frames", &self.frames)
            .finish_non_exhaustive()
    }
}

/// Assembles a [`Simulation`] from loaded content.
pub struct SimulationBuilder {
    encounter: String,
    roster: Vec<CombatantId>,
    store: Option<MemoryStore>,
    catalog: Option<Arc<dyn CatalogOracle>>,
    config: CombatConfig,
    seed: Option<u64>,
    timing: AnimationTiming,
    think_time: Duration,
    drop_animations: bool,
    frame: Duration,
}

impl Default for SimulationBuilder {
    fn default() -> Self {
        Self {
            encounter: String::new(),
            roster: Vec::new(),
            store: None,
            catalog: None,
            config: CombatConfig::default(),
            seed: None,
            timing: AnimationTiming::default(),
            think_time: Duration::from_millis(250),
            drop_animations: false,
            frame: Duration::from_millis(16),
        }
    }
}

impl SimulationBuilder {
    pub fn encounter(mut self, encounter: &Encounter) -> Self {
        self.encounter = encounter.name.clone();
        self.roster = encounter.roster();
        self.store = Some(encounter.to_store());
        self
    }

    pub fn catalog(mut self, catalog: Arc<dyn CatalogOracle>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn config(mut self, config: CombatConfig) -> Self {
        self.config = config;
        self
    }

    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn timing(mut self, timing: AnimationTiming) -> Self {
        self.timing = timing;
        self
    }

    /// How long the auto-pilot waits before answering a prompt.
    pub fn think_time(mut self, think_time: Duration) -> Self {
        self.think_time = think_time;
        self
    }

    pub fn drop_animations(mut self, drop: bool) -> Self {
        self.drop_animations = drop;
        self
    }

    pub fn frame(mut self, frame: Duration) -> Self {
        self.frame = frame;
        self
    }

    pub fn build(self) -> Result<Simulation> {
        if self.frame.is_zero() {
            return Err(RuntimeError::InvalidFrame(self.frame));
        }

        let animation =
            TimedAnimationPlayer::new(self.timing).dropping_completions(self.drop_animations);
        let pilot = AutoPilot::new(self.think_time);
        let journal = Journal::new();
        let scene = OutcomeScene::new();

        let collaborators = Collaborators::new(
            animation.clone(),
            pilot.clone(),
            TracingNarrator::with_journal(journal.clone()),
        )
        .with_resolver(EffectResolver::new(self.roster.clone()))
        .with_scene(scene.clone());

        let mut builder = CombatOrchestrator::builder()
            .combatants(self.roster.iter().copied())
            .collaborators(collaborators)
            .rng(EntropyRng::new(self.seed))
            .config(self.config);
        if let Some(store) = self.store {
            builder = builder.store(store);
        }
        if let Some(catalog) = self.catalog {
            builder = builder.catalog(catalog);
        }
        let combat = builder.build()?;

        tracing::info!(
            encounter = %self.encounter,
            combatants = self.roster.len(),
            seed = ?self.seed,
            drop_animations = self.drop_animations,
            "simulation ready"
        );

        Ok(Simulation {
            combat,
            animation,
            pilot,
            journal,
            scene,
            encounter: self.encounter,
            roster: self.roster,
            seed: self.seed,
            frame: self.frame,
            frames: 0,
            elapsed: Duration::ZERO,
        })
    }
}
