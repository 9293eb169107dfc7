//! Shared orchestrator state every phase reads and writes.

use std::collections::HashMap;
use std::sync::Arc;

use crate::action::{ActionDefinition, ActionRecord, generate_temporary_action};
use crate::config::CombatConfig;
use crate::env::{CatalogOracle, RngOracle};
use crate::error::{CombatError, GameError};
use crate::host::{AnimationTicket, Collaborators, Narration};
use crate::state::{
    ActionId, CombatantId, CombatantStore, ComponentKind, Controller, Repertoire,
};

use super::CombatOutcome;

/// Orchestrator state plus every injected dependency.
///
/// Only the active phase mutates this; hosts get read-only access through
/// the orchestrator.
pub struct CombatContext {
    /// Turn-selection order, fixed at combat start.
    pub(crate) roster: Vec<CombatantId>,
    pub(crate) cursor: usize,
    pub(crate) round: u32,
    /// This round's commitments, in commitment order.
    pub(crate) committed: Vec<ActionRecord>,
    /// This round's execution order.
    pub(crate) resolved: Vec<ActionRecord>,
    /// Weapon attacks generated for the current round only.
    pub(crate) temporaries: HashMap<ActionId, Arc<ActionDefinition>>,
    pub(crate) store: Box<dyn CombatantStore>,
    pub(crate) catalog: Arc<dyn CatalogOracle>,
    pub(crate) collaborators: Collaborators,
    pub(crate) rng: Box<dyn RngOracle>,
    pub(crate) config: CombatConfig,
    pub(crate) outcome: Option<CombatOutcome>,
    next_ticket: u64,
}

impl CombatContext {
    pub(crate) fn new(
        roster: Vec<CombatantId>,
        store: Box<dyn CombatantStore>,
        catalog: Arc<dyn CatalogOracle>,
        collaborators: Collaborators,
        rng: Box<dyn RngOracle>,
        config: CombatConfig,
    ) -> Self {
        Self {
            roster,
            cursor: 0,
            round: 0,
            committed: Vec::new(),
            resolved: Vec::new(),
            temporaries: HashMap::new(),
            store,
            catalog,
            collaborators,
            rng,
            config,
            outcome: None,
            next_ticket: 0,
        }
    }

    pub fn roster(&self) -> &[CombatantId] {
        &self.roster
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn committed(&self) -> &[ActionRecord] {
        &self.committed
    }

    pub fn resolved(&self) -> &[ActionRecord] {
        &self.resolved
    }

    pub fn store(&self) -> &dyn CombatantStore {
        self.store.as_ref()
    }

    pub fn config(&self) -> &CombatConfig {
        &self.config
    }

    pub fn outcome(&self) -> Option<CombatOutcome> {
        self.outcome
    }

    // ===== commitments =====

    pub fn add_action(&mut self, record: ActionRecord) {
        tracing::debug!(
            caster = %record.caster,
            action = %record.action_id(),
            targets = ?record.targets,
            "committed action"
        );
        self.committed.push(record);
    }

    pub fn clear_actions(&mut self) {
        self.committed.clear();
        self.resolved.clear();
    }

    /// Drains the committed list, leaving it empty.
    pub(crate) fn take_committed(&mut self) -> Vec<ActionRecord> {
        std::mem::take(&mut self.committed)
    }

    // ===== temporary actions =====

    /// Registers a round-scoped definition and returns the shared handle.
    pub fn register_temporary(&mut self, definition: ActionDefinition) -> Arc<ActionDefinition> {
        let definition = Arc::new(definition);
        self.temporaries
            .insert(definition.id.clone(), Arc::clone(&definition));
        definition
    }

    pub fn clear_temporaries(&mut self) {
        self.temporaries.clear();
    }

    pub fn temporary_count(&self) -> usize {
        self.temporaries.len()
    }

    /// Resolves an id against this round's temporaries, then the catalog.
    pub fn action_definition(&self, id: &ActionId) -> Option<Arc<ActionDefinition>> {
        self.temporaries
            .get(id)
            .cloned()
            .or_else(|| self.catalog.action(id))
    }

    /// Generates this round's weapon attack for `combatant`, if it has one.
    ///
    /// Unresolvable weapon data is logged and dropped. An unarmed combatant
    /// whose default weapon is not in the catalog simply has no attack.
    pub(crate) fn temporary_action_for(&mut self, combatant: CombatantId) -> Option<Arc<ActionDefinition>> {
        let equipment = self.store.equipment(combatant);
        let armed = equipment.is_some_and(|equipment| equipment.weapon.is_some());

        let generated = generate_temporary_action(
            equipment,
            &self.config.default_weapon,
            self.catalog.as_ref(),
        );

        match generated {
            Ok(Some(definition)) => Some(self.register_temporary(definition)),
            Ok(None) => None,
            Err(CombatError::UnknownWeapon(weapon)) if !armed => {
                tracing::debug!(%combatant, %weapon, "default weapon not in catalog");
                None
            }
            Err(error) => {
                error.report();
                None
            }
        }
    }

    // ===== deck =====

    /// Rebuilds `combatant`'s deck from its repertoire and weapon grants.
    ///
    /// Ids that do not resolve in the catalog are logged and left out.
    /// Returns the number of distinct cards in the new deck.
    pub(crate) fn build_deck(&mut self, combatant: CombatantId) -> Result<usize, CombatError> {
        if !self.store.has_component(combatant, ComponentKind::Deck) {
            return Err(CombatError::missing(combatant, ComponentKind::Deck));
        }

        let repertoire = self
            .store
            .repertoire(combatant)
            .cloned()
            .unwrap_or_else(Repertoire::default);
        let equipped = self
            .store
            .equipment(combatant)
            .and_then(|equipment| equipment.weapon.clone());
        let armed = equipped.is_some();
        let weapon_id = equipped.unwrap_or_else(|| self.config.default_weapon.clone());

        let granted = match self.catalog.weapon(&weapon_id) {
            Some(weapon) => weapon.granted_actions.clone(),
            None => {
                if armed {
                    CombatError::UnknownWeapon(weapon_id).report();
                }
                Vec::new()
            }
        };

        let catalog = Arc::clone(&self.catalog);
        let actions: Vec<ActionId> = repertoire
            .persistent
            .into_iter()
            .chain(repertoire.innate)
            .chain(granted)
            .filter(|id| {
                let known = catalog.action(id).is_some();
                if !known {
                    CombatError::UnknownAction(id.clone()).report();
                }
                known
            })
            .collect();

        let deck = self
            .store
            .deck_mut(combatant)
            .ok_or(CombatError::missing(combatant, ComponentKind::Deck))?;
        Ok(deck.rebuild(actions, self.rng.as_mut()))
    }

    /// Draws `n` cards into `combatant`'s hand and returns the resulting hand.
    pub(crate) fn draw_hand(
        &mut self,
        combatant: CombatantId,
        n: usize,
    ) -> Result<(usize, Vec<ActionId>), CombatError> {
        let deck = self
            .store
            .deck_mut(combatant)
            .ok_or(CombatError::missing(combatant, ComponentKind::Deck))?;
        let drawn = deck.draw_cards(n, self.rng.as_mut());
        Ok((drawn, deck.hand().to_vec()))
    }

    /// Discards every combatant's hand. Returns the number of cards moved.
    pub(crate) fn discard_all_hands(&mut self) -> usize {
        let mut moved = 0;
        for &id in &self.roster {
            match self.store.deck_mut(id) {
                Some(deck) => moved += deck.discard_hand(),
                None => tracing::trace!(combatant = %id, "no deck to discard"),
            }
        }
        moved
    }

    // ===== health =====

    /// True if the combatant has a health record at or below zero. A
    /// combatant without health is never considered defeated.
    pub fn is_defeated(&self, combatant: CombatantId) -> bool {
        self.store
            .health(combatant)
            .is_some_and(|health| health.is_defeated())
    }

    fn is_player(&self, combatant: CombatantId) -> bool {
        self.store.controller(combatant) == Some(Controller::Player)
    }

    /// True if at least one player-controlled combatant exists and every
    /// one of them is defeated.
    pub fn players_defeated(&self) -> bool {
        let mut players = self.roster.iter().filter(|&&id| self.is_player(id)).peekable();
        players.peek().is_some() && players.all(|&id| self.is_defeated(id))
    }

    /// True if every non-player combatant is defeated (vacuously true when
    /// there are none).
    pub fn enemies_defeated(&self) -> bool {
        self.roster
            .iter()
            .filter(|&&id| !self.is_player(id))
            .all(|&id| self.is_defeated(id))
    }

    // ===== collaborators =====

    pub(crate) fn next_ticket(&mut self) -> AnimationTicket {
        let ticket = AnimationTicket(self.next_ticket);
        self.next_ticket += 1;
        ticket
    }

    pub(crate) fn narrate(&mut self, line: Narration) {
        self.collaborators.narrate(line);
    }

    pub(crate) fn label(&self, combatant: CombatantId) -> String {
        self.store.label(combatant)
    }

    /// Records the outcome and runs end-of-encounter bookkeeping once.
    pub(crate) fn finish(&mut self, outcome: CombatOutcome) {
        if self.outcome.is_some() {
            return;
        }
        self.outcome = Some(outcome);
        tracing::info!(%outcome, round = self.round, "encounter finished");
        self.narrate(Narration::Finished {
            outcome,
            round: self.round,
        });
        self.collaborators.scene.end_encounter(outcome);
    }
}

impl std::fmt::Debug for CombatContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CombatContext")
            .field("roster", &self.roster)
            .field("cursor", &self.cursor)
            .field("round", &self.round)
            .field("committed", &self.committed.len())
            .field("resolved", &self.resolved.len())
            .field("temporaries", &self.temporaries.len())
            .field("outcome", &self.outcome)
            .finish_non_exhaustive()
    }
}
