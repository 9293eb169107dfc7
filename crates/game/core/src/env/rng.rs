//! RNG oracle for reproducible random number generation.
//!
//! Every die roll, deck shuffle and random AI pick draws from a single
//! injected [`RngOracle`]. Seeding that generator makes a whole encounter
//! reproducible; no code in the engine reaches for an ambient generator.

/// Source of uniform random integers.
///
/// Implementations must be deterministic for a given seed so that encounters
/// can be replayed in tests.
pub trait RngOracle {
    /// Generate the next uniformly distributed `u32`.
    fn next_u32(&mut self) -> u32;

    /// Roll a die with N sides (1-N inclusive). A zero-sided die rolls 0.
    fn roll_die(&mut self, sides: u32) -> u32 {
        if sides == 0 {
            return 0;
        }
        (self.next_u32() % sides) + 1
    }

    /// Roll a d100 (1-100 inclusive).
    ///
    /// Common for percentage-based mechanics.
    fn roll_d100(&mut self) -> u32 {
        self.roll_die(100)
    }

    /// Pick an index in `0..len`. Returns 0 for an empty range.
    fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.next_u32() as usize % len
    }
}

impl<R: RngOracle + ?Sized> RngOracle for &mut R {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }
}

impl<R: RngOracle + ?Sized> RngOracle for Box<R> {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }
}

/// Uniform in-place permutation (Fisher-Yates).
pub fn shuffle<T, R>(rng: &mut R, items: &mut [T])
where
    R: RngOracle + ?Sized,
{
    for i in (1..items.len()).rev() {
        let j = rng.index(i + 1);
        items.swap(i, j);
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR: 64 bits of state, 32 bits of output per step.
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    pub const fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// `state' = (state * multiplier + increment) mod 2^64`
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation (xorshift high, random rotate).
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl Default for PcgRng {
    fn default() -> Self {
        Self::new(0x853c_49e6_748f_ea9b)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&mut self) -> u32 {
        self.state = Self::pcg_step(self.state);
        Self::pcg_output(self.state)
    }
}

/// Replays a fixed sequence of raw values, cycling when exhausted.
///
/// Lets tests force specific branches: `roll_die(n)` yields `value % n + 1`
/// and `index(len)` yields `value % len`.
#[cfg(any(test, feature = "testing"))]
#[derive(Clone, Debug, Default)]
pub struct ScriptedRng {
    values: Vec<u32>,
    cursor: usize,
}

#[cfg(any(test, feature = "testing"))]
impl ScriptedRng {
    pub fn new(values: impl Into<Vec<u32>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    /// Number of values consumed so far.
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

#[cfg(any(test, feature = "testing"))]
impl RngOracle for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        if self.values.is_empty() {
            return 0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}
