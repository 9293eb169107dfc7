use std::time::Duration;

use crate::state::WeaponId;

/// Engine tunables. Every field has a default, so a partial `config.toml`
/// only needs to name what it overrides.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Cards drawn at the start of each selection sub-turn.
    pub hand_size: usize,
    /// Failsafe for every animation wait.
    pub failsafe_timeout_ms: u64,
    /// Pacing delay after each executed action.
    pub post_action_delay_ms: u64,
    /// Die rolled for speed.
    pub speed_die_sides: u32,
    /// Chance (percent) that a Normal AI picks at random.
    pub normal_ai_random_percent: u32,
    /// Weapon used when a combatant has none equipped.
    pub default_weapon: WeaponId,
    /// Idle human forfeits the sub-turn after this long. `None` idles forever.
    pub human_choice_timeout_ms: Option<u64>,
    /// Bound on chained immediate transitions in a single `update`.
    pub max_transitions_per_update: usize,
}

impl CombatConfig {
    pub const DEFAULT_HAND_SIZE: usize = 4;
    pub const DEFAULT_FAILSAFE_TIMEOUT_MS: u64 = 10_000;
    pub const DEFAULT_POST_ACTION_DELAY_MS: u64 = 500;
    pub const DEFAULT_SPEED_DIE_SIDES: u32 = 20;
    pub const DEFAULT_NORMAL_AI_RANDOM_PERCENT: u32 = 25;
    pub const DEFAULT_WEAPON: &'static str = "unarmed";
    pub const DEFAULT_MAX_TRANSITIONS_PER_UPDATE: usize = 32;

    pub fn new() -> Self {
        Self {
            hand_size: Self::DEFAULT_HAND_SIZE,
            failsafe_timeout_ms: Self::DEFAULT_FAILSAFE_TIMEOUT_MS,
            post_action_delay_ms: Self::DEFAULT_POST_ACTION_DELAY_MS,
            speed_die_sides: Self::DEFAULT_SPEED_DIE_SIDES,
            normal_ai_random_percent: Self::DEFAULT_NORMAL_AI_RANDOM_PERCENT,
            default_weapon: WeaponId::new(Self::DEFAULT_WEAPON),
            human_choice_timeout_ms: None,
            max_transitions_per_update: Self::DEFAULT_MAX_TRANSITIONS_PER_UPDATE,
        }
    }

    pub fn failsafe_timeout(&self) -> Duration {
        Duration::from_millis(self.failsafe_timeout_ms)
    }

    pub fn post_action_delay(&self) -> Duration {
        Duration::from_millis(self.post_action_delay_ms)
    }

    pub fn human_choice_timeout(&self) -> Option<Duration> {
        self.human_choice_timeout_ms.map(Duration::from_millis)
    }

    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        self.hand_size = hand_size;
        self
    }

    pub fn with_failsafe_timeout_ms(mut self, ms: u64) -> Self {
        self.failsafe_timeout_ms = ms;
        self
    }

    pub fn with_post_action_delay_ms(mut self, ms: u64) -> Self {
        self.post_action_delay_ms = ms;
        self
    }

    pub fn with_default_weapon(mut self, weapon: impl Into<WeaponId>) -> Self {
        self.default_weapon = weapon.into();
        self
    }

    pub fn with_human_choice_timeout_ms(mut self, ms: u64) -> Self {
        self.human_choice_timeout_ms = Some(ms);
        self
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
