//! Keyed store of typed per-combatant records.
//!
//! The engine only ever asks "get record for id" and "does this combatant
//! have the record"; it never walks the store's internals. [`MemoryStore`]
//! is the in-process implementation used by the runtime and the tests.

use std::collections::HashMap;

use super::{
    ActionId, AiIntellect, CombatantId, ComponentKind, Controller, Equipment, Health, Repertoire,
    Stats, WeaponId,
};
use crate::deck::DeckState;

/// Entity/component store consumed by the engine.
pub trait CombatantStore {
    fn contains(&self, id: CombatantId) -> bool;

    /// Display name, used for narration only.
    fn name(&self, id: CombatantId) -> Option<&str>;

    fn controller(&self, id: CombatantId) -> Option<Controller>;

    fn intellect(&self, id: CombatantId) -> Option<AiIntellect>;

    fn health(&self, id: CombatantId) -> Option<Health>;

    fn health_mut(&mut self, id: CombatantId) -> Option<&mut Health>;

    fn stats(&self, id: CombatantId) -> Option<Stats>;

    fn equipment(&self, id: CombatantId) -> Option<&Equipment>;

    fn repertoire(&self, id: CombatantId) -> Option<&Repertoire>;

    fn deck(&self, id: CombatantId) -> Option<&DeckState>;

    fn deck_mut(&mut self, id: CombatantId) -> Option<&mut DeckState>;

    /// Returns true if the combatant carries a record of `kind`.
    fn has_component(&self, id: CombatantId, kind: ComponentKind) -> bool {
        match kind {
            ComponentKind::Deck => self.deck(id).is_some(),
            ComponentKind::Controller => self.controller(id).is_some(),
            ComponentKind::AiIntellect => self.intellect(id).is_some(),
            ComponentKind::Health => self.health(id).is_some(),
            ComponentKind::Stats => self.stats(id).is_some(),
            ComponentKind::Equipment => self.equipment(id).is_some(),
            ComponentKind::Repertoire => self.repertoire(id).is_some(),
        }
    }

    /// Display label: the name if present, otherwise the id.
    fn label(&self, id: CombatantId) -> String {
        self.name(id)
            .map(str::to_owned)
            .unwrap_or_else(|| id.to_string())
    }
}

/// Every record one combatant may carry. All of them are optional.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CombatantRecord {
    pub name: String,
    pub controller: Option<Controller>,
    pub intellect: Option<AiIntellect>,
    pub health: Option<Health>,
    pub stats: Option<Stats>,
    pub equipment: Option<Equipment>,
    pub repertoire: Option<Repertoire>,
    pub deck: Option<DeckState>,
}

impl CombatantRecord {
    /// A named combatant with an empty deck and no other records.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            deck: Some(DeckState::new()),
            ..Self::default()
        }
    }

    /// Human-controlled combatant.
    pub fn player(name: impl Into<String>) -> Self {
        Self::new(name).with_controller(Controller::Player)
    }

    /// AI-controlled combatant of the given tier.
    pub fn ai(name: impl Into<String>, intellect: AiIntellect) -> Self {
        let mut record = Self::new(name).with_controller(Controller::Ai);
        record.intellect = Some(intellect);
        record
    }

    pub fn with_controller(mut self, controller: Controller) -> Self {
        self.controller = Some(controller);
        self
    }

    pub fn with_health(mut self, health: Health) -> Self {
        self.health = Some(health);
        self
    }

    pub fn with_stats(mut self, stats: Stats) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn with_weapon(mut self, weapon: impl Into<WeaponId>) -> Self {
        self.equipment = Some(Equipment::with_weapon(weapon));
        self
    }

    pub fn with_persistent(mut self, actions: impl IntoIterator<Item = impl Into<ActionId>>) -> Self {
        self.repertoire
            .get_or_insert_with(Repertoire::default)
            .persistent
            .extend(actions.into_iter().map(Into::into));
        self
    }

    pub fn with_innate(mut self, actions: impl IntoIterator<Item = impl Into<ActionId>>) -> Self {
        self.repertoire
            .get_or_insert_with(Repertoire::default)
            .innate
            .extend(actions.into_iter().map(Into::into));
        self
    }

    pub fn with_deck(mut self, deck: DeckState) -> Self {
        self.deck = Some(deck);
        self
    }

    pub fn without_deck(mut self) -> Self {
        self.deck = None;
        self
    }
}

/// In-memory [`CombatantStore`].
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    records: HashMap<CombatantId, CombatantRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, id: CombatantId, record: CombatantRecord) -> Self {
        self.insert(id, record);
        self
    }

    pub fn insert(&mut self, id: CombatantId, record: CombatantRecord) -> Option<CombatantRecord> {
        self.records.insert(id, record)
    }

    pub fn get(&self, id: CombatantId) -> Option<&CombatantRecord> {
        self.records.get(&id)
    }

    pub fn get_mut(&mut self, id: CombatantId) -> Option<&mut CombatantRecord> {
        self.records.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl CombatantStore for MemoryStore {
    fn contains(&self, id: CombatantId) -> bool {
        self.records.contains_key(&id)
    }

    fn name(&self, id: CombatantId) -> Option<&str> {
        self.records.get(&id).map(|record| record.name.as_str())
    }

    fn controller(&self, id: CombatantId) -> Option<Controller> {
        self.records.get(&id).and_then(|record| record.controller)
    }

    fn intellect(&self, id: CombatantId) -> Option<AiIntellect> {
        self.records.get(&id).and_then(|record| record.intellect)
    }

    fn health(&self, id: CombatantId) -> Option<Health> {
        self.records.get(&id).and_then(|record| record.health)
    }

    fn health_mut(&mut self, id: CombatantId) -> Option<&mut Health> {
        self.records
            .get_mut(&id)
            .and_then(|record| record.health.as_mut())
    }

    fn stats(&self, id: CombatantId) -> Option<Stats> {
        self.records.get(&id).and_then(|record| record.stats)
    }

    fn equipment(&self, id: CombatantId) -> Option<&Equipment> {
        self.records
            .get(&id)
            .and_then(|record| record.equipment.as_ref())
    }

    fn repertoire(&self, id: CombatantId) -> Option<&Repertoire> {
        self.records
            .get(&id)
            .and_then(|record| record.repertoire.as_ref())
    }

    fn deck(&self, id: CombatantId) -> Option<&DeckState> {
        self.records.get(&id).and_then(|record| record.deck.as_ref())
    }

    fn deck_mut(&mut self, id: CombatantId) -> Option<&mut DeckState> {
        self.records
            .get_mut(&id)
            .and_then(|record| record.deck.as_mut())
    }
}
