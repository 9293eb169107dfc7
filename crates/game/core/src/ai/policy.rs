use std::sync::Arc;

use crate::action::ActionDefinition;
use crate::config::CombatConfig;
use crate::env::RngOracle;
use crate::state::{ActionId, AiIntellect};

/// Tiered card selection.
///
/// - **Dumb**: uniform random pick from the hand.
/// - **Normal**: with `random_percent` chance a uniform random pick;
///   otherwise the first damage-dealing card, else the first card.
/// - **Optimal**: Normal's non-random branch. This tier is a placeholder
///   for future resource- and weakness-aware selection and deliberately
///   adds nothing yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AiPolicy {
    random_percent: u32,
}

impl AiPolicy {
    pub const fn new(random_percent: u32) -> Self {
        Self { random_percent }
    }

    pub fn from_config(config: &CombatConfig) -> Self {
        Self::new(config.normal_ai_random_percent)
    }

    pub const fn random_percent(&self) -> u32 {
        self.random_percent
    }

    /// Picks one action id from `hand`, or `None` for an empty hand.
    ///
    /// `lookup` resolves ids to definitions; ids it cannot resolve are never
    /// treated as damage-dealing but can still be picked at random.
    pub fn choose<R, F>(
        &self,
        hand: &[ActionId],
        intellect: AiIntellect,
        lookup: F,
        rng: &mut R,
    ) -> Option<ActionId>
    where
        R: RngOracle + ?Sized,
        F: Fn(&ActionId) -> Option<Arc<ActionDefinition>>,
    {
        if hand.is_empty() {
            return None;
        }

        let choice = match intellect {
            AiIntellect::Dumb => Self::random_pick(hand, rng),
            AiIntellect::Normal => {
                let roll = rng.roll_d100();
                if roll <= self.random_percent {
                    tracing::debug!(roll, "Normal AI falls back to a random pick");
                    Self::random_pick(hand, rng)
                } else {
                    Self::aggressive_pick(hand, &lookup)
                }
            }
            AiIntellect::Optimal => Self::aggressive_pick(hand, &lookup),
        };

        tracing::debug!(?intellect, hand = hand.len(), ?choice, "AI selected action");
        choice
    }

    fn random_pick<R>(hand: &[ActionId], rng: &mut R) -> Option<ActionId>
    where
        R: RngOracle + ?Sized,
    {
        hand.get(rng.index(hand.len())).cloned()
    }

    /// First card that deals damage, falling back to the first card.
    fn aggressive_pick<F>(hand: &[ActionId], lookup: &F) -> Option<ActionId>
    where
        F: Fn(&ActionId) -> Option<Arc<ActionDefinition>>,
    {
        hand.iter()
            .find(|id| lookup(id).is_some_and(|definition| definition.deals_damage()))
            .or_else(|| hand.first())
            .cloned()
    }
}

impl Default for AiPolicy {
    fn default() -> Self {
        Self::new(CombatConfig::DEFAULT_NORMAL_AI_RANDOM_PERCENT)
    }
}
