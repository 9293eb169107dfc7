//! Action and weapon catalog oracle.

use std::collections::HashMap;
use std::sync::Arc;

use crate::action::{ActionDefinition, WeaponDefinition};
use crate::state::{ActionId, WeaponId};

/// Oracle providing action and weapon definitions.
///
/// Definitions are static content loaded from data files. Lookups return
/// shared handles so records can keep their definition alive cheaply.
pub trait CatalogOracle: Send + Sync {
    /// Returns the action definition for `id`, if registered.
    fn action(&self, id: &ActionId) -> Option<Arc<ActionDefinition>>;

    /// Returns the weapon definition for `id`, if registered.
    fn weapon(&self, id: &WeaponId) -> Option<Arc<WeaponDefinition>>;
}

/// In-memory catalog backed by hash maps.
#[derive(Clone, Debug, Default)]
pub struct StaticCatalog {
    actions: HashMap<ActionId, Arc<ActionDefinition>>,
    weapons: HashMap<WeaponId, Arc<WeaponDefinition>>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_definitions(
        actions: impl IntoIterator<Item = ActionDefinition>,
        weapons: impl IntoIterator<Item = WeaponDefinition>,
    ) -> Self {
        let mut catalog = Self::new();
        for action in actions {
            catalog.insert_action(action);
        }
        for weapon in weapons {
            catalog.insert_weapon(weapon);
        }
        catalog
    }

    pub fn with_action(mut self, action: ActionDefinition) -> Self {
        self.insert_action(action);
        self
    }

    pub fn with_weapon(mut self, weapon: WeaponDefinition) -> Self {
        self.insert_weapon(weapon);
        self
    }

    /// Registers an action, replacing any previous definition with the same id.
    pub fn insert_action(&mut self, action: ActionDefinition) -> Option<Arc<ActionDefinition>> {
        self.actions.insert(action.id.clone(), Arc::new(action))
    }

    /// Registers a weapon, replacing any previous definition with the same id.
    pub fn insert_weapon(&mut self, weapon: WeaponDefinition) -> Option<Arc<WeaponDefinition>> {
        self.weapons.insert(weapon.id.clone(), Arc::new(weapon))
    }

    pub fn action_ids(&self) -> impl Iterator<Item = &ActionId> {
        self.actions.keys()
    }

    pub fn weapon_ids(&self) -> impl Iterator<Item = &WeaponId> {
        self.weapons.keys()
    }

    pub fn action_count(&self) -> usize {
        self.actions.len()
    }

    pub fn weapon_count(&self) -> usize {
        self.weapons.len()
    }
}

impl CatalogOracle for StaticCatalog {
    fn action(&self, id: &ActionId) -> Option<Arc<ActionDefinition>> {
        self.actions.get(id).cloned()
    }

    fn weapon(&self, id: &WeaponId) -> Option<Arc<WeaponDefinition>> {
        self.weapons.get(id).cloned()
    }
}
