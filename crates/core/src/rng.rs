//! RNG module - seeded piece selection
//!
//! Pieces are drawn uniformly and independently from the seven kinds (no
//! bag). The source of randomness is injected through [`PieceRng`] so games
//! are reproducible from a seed and tests can script exact sequences.

use crate::types::PieceKind;

/// Source of random piece choices.
pub trait PieceRng {
    /// Uniform value in `[0, max)`.
    fn next_range(&mut self, max: u32) -> u32;
}

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
}

impl PieceRng for SimpleRng {
    fn next_range(&mut self, max: u32) -> u32 {
        // The low bits of an LCG cycle with a short period.
        (self.next_u32() >> 16) % max.max(1)
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Draw one piece kind uniformly at random.
pub fn random_kind(rng: &mut impl PieceRng) -> PieceKind {
    let idx = rng.next_range(PieceKind::ALL.len() as u32) as usize;
    PieceKind::ALL[idx % PieceKind::ALL.len()]
}
