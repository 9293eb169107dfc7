//! Read-only oracles the engine consumes.
//!
//! The catalog serves action and weapon definitions; the RNG oracle is the
//! single injected source of randomness for shuffles, rolls and AI picks.
mod catalog;
mod rng;

pub use catalog::{CatalogOracle, StaticCatalog};
#[cfg(any(test, feature = "testing"))]
pub use rng::ScriptedRng;
pub use rng::{PcgRng, RngOracle, shuffle};
