use std::sync::Arc;
use std::time::Duration;

use super::{CombatContext, CombatEvent, CombatOutcome, CombatSnapshot, CombatStateMachine, PhaseKind};
use crate::config::CombatConfig;
use crate::env::{CatalogOracle, PcgRng, RngOracle};
use crate::error::CombatError;
use crate::host::{AnimationTicket, Collaborators, HumanChoice};
use crate::state::{CombatantId, CombatantStore};

/// Root of an encounter: the state machine plus the state it drives.
///
/// Hosts call [`update`](Self::update) once per frame and push events with
/// [`handle_event`](Self::handle_event). Both calls run to completion on
/// the calling thread.
#[derive(Debug)]
pub struct CombatOrchestrator {
    machine: CombatStateMachine,
    ctx: CombatContext,
}

impl CombatOrchestrator {
    pub fn builder() -> CombatOrchestratorBuilder {
        CombatOrchestratorBuilder::default()
    }

    /// Enters `CombatStart`. Calling `update` first does the same.
    pub fn start(&mut self) {
        self.machine.start(&mut self.ctx);
    }

    pub fn update(&mut self, dt: Duration) {
        self.machine.update(&mut self.ctx, dt);
    }

    pub fn handle_event(&mut self, event: CombatEvent) {
        self.machine.handle_event(&mut self.ctx, event);
    }

    pub fn complete_animation(&mut self, ticket: AnimationTicket) {
        self.handle_event(CombatEvent::AnimationComplete(ticket));
    }

    pub fn confirm_choice(&mut self, choice: HumanChoice) {
        self.handle_event(CombatEvent::ChoiceConfirmed(choice));
    }

    pub fn phase_kind(&self) -> PhaseKind {
        self.machine.phase_kind()
    }

    pub fn is_finished(&self) -> bool {
        self.machine.is_terminal()
    }

    pub fn outcome(&self) -> Option<CombatOutcome> {
        self.ctx.outcome()
    }

    pub fn round(&self) -> u32 {
        self.ctx.round()
    }

    pub fn is_waiting_for_animation(&self) -> bool {
        self.machine.phase().is_waiting_for_animation()
    }

    pub fn context(&self) -> &CombatContext {
        &self.ctx
    }

    pub fn store(&self) -> &dyn CombatantStore {
        self.ctx.store()
    }

    pub fn snapshot(&self) -> CombatSnapshot {
        let phase = self.machine.phase_kind();
        let current_combatant = match phase {
            PhaseKind::ActionSelection => self.ctx.current_combatant(),
            _ => None,
        };
        let hand = current_combatant
            .and_then(|id| self.ctx.store().deck(id))
            .map(|deck| deck.hand().to_vec())
            .unwrap_or_default();

        CombatSnapshot {
            phase,
            round: self.ctx.round(),
            current_combatant,
            hand,
            pending_choices: self.machine.phase().pending_choices(),
            committed: self.ctx.committed().iter().map(|record| record.summary()).collect(),
            resolved: self.ctx.resolved().iter().map(|record| record.summary()).collect(),
            waiting_for_animation: self.is_waiting_for_animation(),
            outcome: self.ctx.outcome(),
        }
    }
}

/// Assembles a [`CombatOrchestrator`] from injected dependencies.
#[derive(Default)]
pub struct CombatOrchestratorBuilder {
    roster: Vec<CombatantId>,
    store: Option<Box<dyn CombatantStore>>,
    catalog: Option<Arc<dyn CatalogOracle>>,
    collaborators: Option<Collaborators>,
    rng: Option<Box<dyn RngOracle>>,
    config: CombatConfig,
}

impl CombatOrchestratorBuilder {
    /// Turn-selection order. Fixed for the whole encounter.
    pub fn combatants(mut self, roster: impl IntoIterator<Item = CombatantId>) -> Self {
        self.roster = roster.into_iter().collect();
        self
    }

    pub fn store(mut self, store: impl CombatantStore + 'static) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    pub fn catalog(mut self, catalog: Arc<dyn CatalogOracle>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn collaborators(mut self, collaborators: Collaborators) -> Self {
        self.collaborators = Some(collaborators);
        self
    }

    /// Random source. Defaults to [`PcgRng::default`].
    pub fn rng(mut self, rng: impl RngOracle + 'static) -> Self {
        self.rng = Some(Box::new(rng));
        self
    }

    pub fn config(mut self, config: CombatConfig) -> Self {
        self.config = config;
        self
    }

    /// # Errors
    ///
    /// `MissingDependency` if the store, catalog or collaborators were not
    /// supplied; `UnknownCombatant` if a roster id is not in the store.
    pub fn build(self) -> Result<CombatOrchestrator, CombatError> {
        let store = self
            .store
            .ok_or(CombatError::MissingDependency("combatant store"))?;
        let catalog = self
            .catalog
            .ok_or(CombatError::MissingDependency("catalog"))?;
        let collaborators = self
            .collaborators
            .ok_or(CombatError::MissingDependency("collaborators"))?;
        let rng = self
            .rng
            .unwrap_or_else(|| Box::new(PcgRng::default()));

        if let Some(&unknown) = self.roster.iter().find(|&&id| !store.contains(id)) {
            return Err(CombatError::UnknownCombatant(unknown));
        }

        tracing::debug!(combatants = self.roster.len(), "orchestrator assembled");
        Ok(CombatOrchestrator {
            machine: CombatStateMachine::new(),
            ctx: CombatContext::new(self.roster, store, catalog, collaborators, rng, self.config),
        })
    }
}
