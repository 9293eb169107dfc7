//! Typed per-combatant records held by the entity store.
//!
//! Every record is optional for a given combatant; the engine checks for
//! presence and degrades gracefully when one is missing.

use strum::{Display, EnumIter, EnumString};

use super::{ActionId, WeaponId};

/// Who decides a combatant's actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Controller {
    /// Human-controlled; choices arrive through the input collaborator.
    Player,
    /// Decided synchronously by the AI decision policy.
    Ai,
}

/// AI decision tier, fixed for the encounter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum AiIntellect {
    Dumb,
    Normal,
    Optimal,
}

/// Current and maximum hit points.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Health {
    pub current: i32,
    pub max: i32,
}

impl Health {
    /// Creates a full health pool.
    pub const fn new(max: i32) -> Self {
        Self { current: max, max }
    }

    pub const fn with_current(mut self, current: i32) -> Self {
        self.current = current;
        self
    }

    /// A combatant at or below zero health is out of the fight.
    #[inline]
    pub const fn is_defeated(&self) -> bool {
        self.current <= 0
    }

    /// Subtracts `amount` (negative amounts are ignored). Returns the damage dealt.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let amount = amount.max(0);
        self.current = self.current.saturating_sub(amount);
        amount
    }

    /// Restores up to `amount`, capped at `max`. Returns the amount restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.current;
        self.current = self.current.saturating_add(amount.max(0)).min(self.max);
        self.current.saturating_sub(before)
    }
}

/// Ability scores.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Stats {
    pub strength: i32,
    pub agility: i32,
    pub intellect: i32,
}

impl Stats {
    pub const BASELINE: i32 = 10;

    /// d20-style modifier: `floor((score - 10) / 2)`.
    #[inline]
    pub const fn modifier(score: i32) -> i32 {
        (score - Self::BASELINE).div_euclid(2)
    }

    pub const fn agility_modifier(&self) -> i32 {
        Self::modifier(self.agility)
    }
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            strength: Self::BASELINE,
            agility: Self::BASELINE,
            intellect: Self::BASELINE,
        }
    }
}

/// What the combatant carries into the fight.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Equipment {
    /// Equipped weapon; the configured default weapon is used when empty.
    pub weapon: Option<WeaponId>,
}

impl Equipment {
    pub fn with_weapon(weapon: impl Into<WeaponId>) -> Self {
        Self {
            weapon: Some(weapon.into()),
        }
    }
}

/// Permanent action ids the combatant brings into every encounter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Repertoire {
    /// The persistent master list (learned cards).
    pub persistent: Vec<ActionId>,
    /// Actions innate to the combatant's kind.
    pub innate: Vec<ActionId>,
}

/// Names the record kinds the engine looks up, for diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ComponentKind {
    Deck,
    Controller,
    AiIntellect,
    Health,
    Stats,
    Equipment,
    Repertoire,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn modifier_rounds_toward_negative_infinity() {
        assert_eq!(Stats::modifier(10), 0);
        assert_eq!(Stats::modifier(11), 0);
        assert_eq!(Stats::modifier(14), 2);
        assert_eq!(Stats::modifier(9), -1);
        assert_eq!(Stats::modifier(7), -2);
    }

    #[test]
    fn heal_is_capped_at_max() {
        let mut health = Health::new(20).with_current(15);
        assert_eq!(health.heal(10), 5);
        assert_eq!(health.current, 20);
    }

    #[test]
    fn damage_can_take_health_below_zero() {
        let mut health = Health::new(5);
        health.take_damage(8);
        assert_eq!(health.current, -3);
        assert!(health.is_defeated());
    }

    #[test]
    fn huge_amounts_saturate_instead_of_overflowing() {
        let mut health = Health::new(5).with_current(-10);
        health.take_damage(i32::MAX);
        assert_eq!(health.current, i32::MIN);
        assert!(health.is_defeated());

        let mut health = Health::new(20).with_current(15);
        assert_eq!(health.heal(i32::MAX), 5);
    }

    #[test]
    fn intellect_parses_case_insensitively() {
        assert_eq!(AiIntellect::from_str("optimal").unwrap(), AiIntellect::Optimal);
        assert_eq!(AiIntellect::from_str("DUMB").unwrap(), AiIntellect::Dumb);
    }
}
