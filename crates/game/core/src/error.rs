//! Common error infrastructure for combat-core.
//!
//! Every failure the engine can detect is a [`CombatError`]. Phases catch
//! errors at their own boundary, log them through [`GameError::report`] and
//! apply the matching skip behaviour, so no error ever escapes
//! [`crate::engine::CombatOrchestrator::update`].
//!
//! # Severity
//!
//! - **Recoverable**: an expected external event never arrived and was synthesized
//! - **Validation**: a reference or a choice did not resolve; the item is dropped
//! - **Internal**: a combatant lacks a record the engine relies on; its turn is skipped
//! - **Fatal**: the orchestrator was assembled without a required dependency
//!
//! Empty hands, unarmed combatants and missing AI targets are valid states,
//! not errors, and have no variant here.

use crate::host::AnimationTicket;
use crate::state::{ActionId, CombatantId, ComponentKind, WeaponId};

/// Severity level of an error, used for categorization and log levels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Recovered automatically; the engine carried on.
    Recoverable,

    /// Invalid input or reference, dropped without retry.
    Validation,

    /// Unexpected state inconsistency (missing component record).
    Internal,

    /// The engine cannot be constructed or continue.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all combat-core errors.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }

    /// Logs this error at the level its severity maps to.
    ///
    /// Recoverable errors are warnings; everything else is an error, which
    /// is the highest level tracing offers.
    fn report(&self) {
        let severity = self.severity();
        if severity.is_recoverable() {
            tracing::warn!(
                code = self.error_code(),
                severity = severity.as_str(),
                "{self}"
            );
        } else {
            tracing::error!(
                code = self.error_code(),
                severity = severity.as_str(),
                "{self}"
            );
        }
    }
}

/// Errors detected while running an encounter.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CombatError {
    #[error("combatant {combatant} has no {component} record")]
    MissingComponent {
        combatant: CombatantId,
        component: ComponentKind,
    },

    #[error("action `{0}` is not in the catalog")]
    UnknownAction(ActionId),

    #[error("weapon `{0}` is not in the catalog")]
    UnknownWeapon(WeaponId),

    #[error("combatant {combatant} chose `{action}`, which was not among the presented choices")]
    InvalidChoice {
        combatant: CombatantId,
        action: ActionId,
    },

    #[error("no human choice is pending")]
    NoPendingChoice,

    #[error("animation {ticket} did not complete within {waited_ms} ms")]
    AnimationTimeout {
        ticket: AnimationTicket,
        waited_ms: u64,
    },

    #[error("combatant {0} is not in the store")]
    UnknownCombatant(CombatantId),

    #[error("orchestrator requires a {0}")]
    MissingDependency(&'static str),
}

impl CombatError {
    pub fn missing(combatant: CombatantId, component: ComponentKind) -> Self {
        Self::MissingComponent {
            combatant,
            component,
        }
    }
}

impl GameError for CombatError {
    fn severity(&self) -> ErrorSeverity {
        use CombatError::*;

        match self {
            AnimationTimeout { .. } => ErrorSeverity::Recoverable,
            UnknownAction(_)
            | UnknownWeapon(_)
            | InvalidChoice { .. }
            | NoPendingChoice
            | UnknownCombatant(_) => ErrorSeverity::Validation,
            MissingComponent { .. } => ErrorSeverity::Internal,
            MissingDependency(_) => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        use CombatError::*;

        match self {
            MissingComponent { .. } => "COMBAT_MISSING_COMPONENT",
            UnknownAction(_) => "COMBAT_UNKNOWN_ACTION",
            UnknownWeapon(_) => "COMBAT_UNKNOWN_WEAPON",
            InvalidChoice { .. } => "COMBAT_INVALID_CHOICE",
            NoPendingChoice => "COMBAT_NO_PENDING_CHOICE",
            AnimationTimeout { .. } => "COMBAT_ANIMATION_TIMEOUT",
            UnknownCombatant(_) => "COMBAT_UNKNOWN_COMBATANT",
            MissingDependency(_) => "COMBAT_MISSING_DEPENDENCY",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_follows_failure_category() {
        let missing = CombatError::missing(CombatantId(2), ComponentKind::Stats);
        assert_eq!(missing.severity(), ErrorSeverity::Internal);
        assert_eq!(
            CombatError::UnknownAction("ghost".into()).severity(),
            ErrorSeverity::Validation
        );
        assert!(
            CombatError::AnimationTimeout {
                ticket: AnimationTicket(3),
                waited_ms: 10_000
            }
            .severity()
            .is_recoverable()
        );
    }

    #[test]
    fn messages_name_the_offender() {
        let missing = CombatError::missing(CombatantId(2), ComponentKind::AiIntellect);
        assert_eq!(missing.to_string(), "combatant #2 has no ai_intellect record");
        assert_eq!(missing.error_code(), "COMBAT_MISSING_COMPONENT");
    }
}
