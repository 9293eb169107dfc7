//! Errors surfaced by the simulation host.

use std::time::Duration;

use combat_core::CombatError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("encounter could not be assembled")]
    Assembly(#[from] CombatError),

    #[error("encounter did not finish within {frames} frames")]
    FrameBudgetExhausted { frames: u64 },

    #[error("frame length must be positive, got {0:?}")]
    InvalidFrame(Duration),
}
