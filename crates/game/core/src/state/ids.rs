use std::fmt;

/// Unique identifier for a combatant taking part in an encounter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CombatantId(pub u32);

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifier of an action definition in the catalog.
///
/// Temporary (weapon-generated) actions carry the `temp_` prefix and exist
/// only for the round in which they were generated.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ActionId(String);

impl ActionId {
    pub const TEMPORARY_PREFIX: &'static str = "temp_";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Builds the per-round identifier of the primary attack granted by `weapon`.
    pub fn temporary_for(weapon: &WeaponId) -> Self {
        Self(format!("{}{}", Self::TEMPORARY_PREFIX, weapon.as_str()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn is_temporary(&self) -> bool {
        self.0.starts_with(Self::TEMPORARY_PREFIX)
    }
}

impl From<&str> for ActionId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ActionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a weapon definition in the catalog.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct WeaponId(String);

impl WeaponId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WeaponId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for WeaponId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for WeaponId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
