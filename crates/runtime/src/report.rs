//! Machine-readable summary of a finished (or abandoned) run.

use combat_core::{CombatOutcome, CombatantId, Controller};
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CombatantReport {
    pub id: CombatantId,
    pub name: String,
    pub controller: Option<Controller>,
    pub health: Option<i32>,
    pub max_health: Option<i32>,
    pub defeated: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SimReport {
    pub encounter: String,
    pub seed: Option<u64>,
    pub outcome: Option<CombatOutcome>,
    pub rounds: u32,
    pub frames: u64,
    pub simulated_ms: u64,
    pub animations_started: usize,
    pub animations_completed: usize,
    pub animations_timed_out: usize,
    pub combatants: Vec<CombatantReport>,
    pub narration: Vec<String>,
}

impl SimReport {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
