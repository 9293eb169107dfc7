//! Simulation settings read from the process environment.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Settings for one headless simulation run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimConfig {
    /// Content directory; `None` uses the content bundled with `combat-content`.
    pub data_dir: Option<PathBuf>,
    pub encounter: String,
    /// Seed for the engine RNG; `None` seeds from OS entropy.
    pub seed: Option<u64>,
    pub frame: Duration,
    pub max_frames: u64,
    /// Animations never report back, so every wait ends on the failsafe.
    pub drop_animations: bool,
    /// Pace frames against the wall clock instead of running flat out.
    pub realtime: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            encounter: Self::DEFAULT_ENCOUNTER.to_owned(),
            seed: None,
            frame: Duration::from_millis(Self::DEFAULT_FRAME_MS),
            max_frames: Self::DEFAULT_MAX_FRAMES,
            drop_animations: false,
            realtime: false,
        }
    }
}

impl SimConfig {
    pub const DEFAULT_ENCOUNTER: &'static str = "goblin_ambush";
    pub const DEFAULT_FRAME_MS: u64 = 16;
    pub const DEFAULT_MAX_FRAMES: u64 = 100_000;

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `COMBAT_DATA_DIR` - Content directory (default: bundled content)
    /// - `COMBAT_ENCOUNTER` - Encounter file stem (default: goblin_ambush)
    /// - `COMBAT_SEED` - RNG seed (default: OS entropy)
    /// - `COMBAT_FRAME_MS` - Simulated frame length (default: 16)
    /// - `COMBAT_MAX_FRAMES` - Abort after this many frames (default: 100000)
    /// - `COMBAT_DROP_ANIMATIONS` - Never complete animations (default: false)
    /// - `COMBAT_REALTIME` - Pace frames against the wall clock (default: false)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.data_dir = env::var("COMBAT_DATA_DIR").ok().map(PathBuf::from);
        if let Ok(encounter) = env::var("COMBAT_ENCOUNTER") {
            config.encounter = encounter;
        }
        config.seed = read_env::<u64>("COMBAT_SEED");
        if let Some(ms) = read_env::<u64>("COMBAT_FRAME_MS") {
            config.frame = Duration::from_millis(ms.max(1));
        }
        if let Some(frames) = read_env::<u64>("COMBAT_MAX_FRAMES") {
            config.max_frames = frames.max(1);
        }
        config.drop_animations = read_flag("COMBAT_DROP_ANIMATIONS");
        config.realtime = read_flag("COMBAT_REALTIME");

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

/// `true`/`false` when parseable; a bare or unparseable value counts as set.
fn read_flag(key: &str) -> bool {
    match read_env::<bool>(key) {
        Some(enabled) => enabled,
        None => env::var(key).is_ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_run_bundled_content_at_sixty_fps() {
        let config = SimConfig::default();
        assert_eq!(config.data_dir, None);
        assert_eq!(config.encounter, "goblin_ambush");
        assert_eq!(config.frame, Duration::from_millis(16));
        assert!(!config.drop_animations);
    }
}
