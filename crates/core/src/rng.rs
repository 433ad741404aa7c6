//! RNG module - uniform random piece selection
//!
//! Every spawn picks one of the seven kinds independently and uniformly.
//! A small LCG keeps games reproducible from a seed.

use crate::types::{PieceKind, NUM_TYPES};

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
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits; the low bits of an LCG cycle with a short period.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Draw a piece kind uniformly at random
    pub fn next_piece(&mut self) -> PieceKind {
        let id = 1 + self.next_range(NUM_TYPES as u32) as i8;
        PieceKind::from_id(id).unwrap_or(PieceKind::T)
    }

    /// Current generator state
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}
