//! RNG module - uniform random piece selection
//!
//! Each draw picks one of the seven kinds with equal probability, independent
//! of history, so repeats are possible. A seeded LCG keeps sessions
//! reproducible for tests and benchmarks.
//!
//! [`ScriptedPieces`] replays a fixed sequence instead, for scenarios that need
//! a known piece order.

use crate::types::PieceKind;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Scales by the high bits; the low bits of an LCG cycle with short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }
}

/// Supplier of upcoming piece kinds
pub trait PieceSource {
    fn pick_next_type(&mut self) -> PieceKind;
}

/// Uniform choice among the seven kinds
#[derive(Debug, Clone)]
pub struct UniformPicker {
    rng: SimpleRng,
    seed: u32,
}

impl UniformPicker {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            seed,
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl Default for UniformPicker {
    fn default() -> Self {
        Self::new(1)
    }
}

impl PieceSource for UniformPicker {
    fn pick_next_type(&mut self) -> PieceKind {
        let idx = self.rng.next_range(PieceKind::ALL.len() as u32) as usize;
        PieceKind::ALL[idx]
    }
}

/// Replays a fixed list of kinds, wrapping around at the end
#[derive(Debug, Clone)]
pub struct ScriptedPieces {
    sequence: Vec<PieceKind>,
    cursor: usize,
}

impl ScriptedPieces {
    /// An empty list falls back to a single `O`.
    pub fn new(sequence: impl Into<Vec<PieceKind>>) -> Self {
        let mut sequence = sequence.into();
        if sequence.is_empty() {
            sequence.push(PieceKind::O);
        }
        Self {
            sequence,
            cursor: 0,
        }
    }
}

impl PieceSource for ScriptedPieces {
    fn pick_next_type(&mut self) -> PieceKind {
        let kind = self.sequence[self.cursor % self.sequence.len()];
        self.cursor = self.cursor.wrapping_add(1);
        kind
    }
}

impl<S: PieceSource + ?Sized> PieceSource for Box<S> {
    fn pick_next_type(&mut self) -> PieceKind {
        (**self).pick_next_type()
    }
}
