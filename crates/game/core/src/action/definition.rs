//! Catalog definitions: actions, their effects and targeting, and weapons.
//!
//! Definitions are read-only content. They are loaded from data files by the
//! content crate and served to the engine through [`crate::env::CatalogOracle`].

use strum::{Display, EnumString, IntoStaticStr};

use crate::state::{ActionId, WeaponId};

/// How an action picks its targets.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum TargetType {
    /// One opposing combatant.
    SingleEnemy,
    /// Every opposing combatant.
    AllEnemies,
    /// One friendly combatant.
    SingleAlly,
    /// The caster only.
    #[strum(to_string = "SelfOnly", serialize = "Self")]
    #[cfg_attr(feature = "serde", serde(alias = "Self"))]
    SelfOnly,
    /// No target at all.
    #[default]
    None,
}

/// Kind of an effect. Parsing is ASCII case-insensitive; unknown kinds are
/// kept verbatim as [`EffectKind::Custom`] for the external resolver.
#[derive(Clone, Debug, PartialEq, Eq, Hash, EnumString, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
#[strum(ascii_case_insensitive)]
pub enum EffectKind {
    DealDamage,
    Heal,
    GainBlock,
    ApplyStatus,
    #[strum(default)]
    Custom(String),
}

impl EffectKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Custom(name) => name,
            other => {
                let name: &'static str = other.into();
                name
            }
        }
    }

    #[inline]
    pub fn is_deal_damage(&self) -> bool {
        matches!(self, Self::DealDamage)
    }
}

impl std::fmt::Display for EffectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for EffectKind {
    fn from(value: String) -> Self {
        value.parse().unwrap_or(Self::Custom(value))
    }
}

impl From<EffectKind> for String {
    fn from(kind: EffectKind) -> Self {
        kind.as_str().to_owned()
    }
}

/// One typed effect of an action. The magnitude is interpreted by the
/// external resolver.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Effect {
    pub kind: EffectKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub amount: i32,
}

impl Effect {
    pub fn new(kind: EffectKind, amount: i32) -> Self {
        Self { kind, amount }
    }

    pub fn damage(amount: i32) -> Self {
        Self::new(EffectKind::DealDamage, amount)
    }

    pub fn heal(amount: i32) -> Self {
        Self::new(EffectKind::Heal, amount)
    }
}

/// Complete specification of one action card.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionDefinition {
    pub id: ActionId,

    /// Display name for narration and UI.
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,

    #[cfg_attr(feature = "serde", serde(default))]
    pub target: TargetType,

    /// Declared priority; higher resolves first regardless of speed.
    #[cfg_attr(feature = "serde", serde(default))]
    pub priority: i32,

    /// Effects applied, in order, by the resolver.
    #[cfg_attr(feature = "serde", serde(default))]
    pub effects: Vec<Effect>,
}

impl ActionDefinition {
    pub fn new(id: impl Into<ActionId>, target: TargetType) -> Self {
        let id = id.into();
        Self {
            name: id.as_str().to_owned(),
            id,
            target,
            priority: 0,
            effects: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Returns true if any effect deals damage.
    pub fn deals_damage(&self) -> bool {
        self.effects.iter().any(|effect| effect.kind.is_deal_damage())
    }

    /// Clones this definition under a different identifier.
    pub fn retagged(&self, id: ActionId) -> Self {
        Self {
            id,
            ..self.clone()
        }
    }
}

/// A weapon: grants a primary attack each round plus permanent deck cards.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeaponDefinition {
    pub id: WeaponId,

    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,

    /// Action generated as a temporary card every round, if any.
    #[cfg_attr(feature = "serde", serde(default))]
    pub primary_attack: Option<ActionId>,

    /// Permanent actions shuffled into the wielder's deck at combat start.
    #[cfg_attr(feature = "serde", serde(default))]
    pub granted_actions: Vec<ActionId>,
}

impl WeaponDefinition {
    pub fn new(id: impl Into<WeaponId>) -> Self {
        let id = id.into();
        Self {
            name: id.as_str().to_owned(),
            id,
            primary_attack: None,
            granted_actions: Vec::new(),
        }
    }

    pub fn with_primary_attack(mut self, action: impl Into<ActionId>) -> Self {
        self.primary_attack = Some(action.into());
        self
    }

    pub fn with_granted(mut self, action: impl Into<ActionId>) -> Self {
        self.granted_actions.push(action.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effect_kind_parses_case_insensitively() {
        assert_eq!("dealdamage".parse::<EffectKind>().unwrap(), EffectKind::DealDamage);
        assert_eq!("DEALDAMAGE".parse::<EffectKind>().unwrap(), EffectKind::DealDamage);
        assert_eq!(
            "Burn".parse::<EffectKind>().unwrap(),
            EffectKind::Custom("Burn".to_owned())
        );
    }

    #[test]
    fn effect_kind_from_string_never_fails() {
        assert_eq!(EffectKind::from("heal".to_owned()), EffectKind::Heal);
        assert_eq!(
            EffectKind::from("Poison".to_owned()),
            EffectKind::Custom("Poison".to_owned())
        );
        assert_eq!(String::from(EffectKind::GainBlock), "GainBlock");
    }

    #[test]
    fn deals_damage_checks_every_effect() {
        let fireball = ActionDefinition::new("fireball", TargetType::SingleEnemy)
            .with_effect(Effect::new(EffectKind::ApplyStatus, 1))
            .with_effect(Effect::damage(8));
        let heal = ActionDefinition::new("heal", TargetType::SelfOnly).with_effect(Effect::heal(5));

        assert!(fireball.deals_damage());
        assert!(!heal.deals_damage());
    }

    #[test]
    fn retagged_keeps_everything_but_the_id() {
        let slash = ActionDefinition::new("slash", TargetType::SingleEnemy)
            .with_priority(2)
            .with_effect(Effect::damage(4));
        let temp = slash.retagged(ActionId::new("temp_sword"));
        assert_eq!(temp.id.as_str(), "temp_sword");
        assert_eq!(temp.priority, 2);
        assert_eq!(temp.effects, slash.effects);
    }
}
