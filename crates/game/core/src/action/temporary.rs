//! Per-round weapon attacks.
//!
//! Each round a combatant's weapon (or the default weapon) may grant its
//! primary attack as a temporary card. The card is a retagged copy of the
//! catalog definition, identified as `temp_<weapon>`, and never enters a pile.

use super::ActionDefinition;
use crate::env::CatalogOracle;
use crate::error::CombatError;
use crate::state::{ActionId, Equipment, WeaponId};

/// Builds the temporary primary attack for a wielder.
///
/// Returns `Ok(None)` when the weapon simply has no primary attack. A weapon
/// or attack id that does not resolve in the catalog is a missing-data error.
pub fn generate_temporary_action(
    equipment: Option<&Equipment>,
    default_weapon: &WeaponId,
    catalog: &dyn CatalogOracle,
) -> Result<Option<ActionDefinition>, CombatError> {
    let weapon_id = equipment
        .and_then(|equipment| equipment.weapon.as_ref())
        .unwrap_or(default_weapon);

    let weapon = catalog
        .weapon(weapon_id)
        .ok_or_else(|| CombatError::UnknownWeapon(weapon_id.clone()))?;

    let Some(attack_id) = weapon.primary_attack.as_ref() else {
        return Ok(None);
    };

    let attack = catalog
        .action(attack_id)
        .ok_or_else(|| CombatError::UnknownAction(attack_id.clone()))?;

    Ok(Some(attack.retagged(ActionId::temporary_for(weapon_id))))
}
