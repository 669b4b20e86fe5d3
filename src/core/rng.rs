//! RNG module - seedable randomness and piece generation
//!
//! The factory draws a shape and a color uniformly at random from the fixed
//! catalogs, independently of one another. The RNG is injected at
//! construction so a driver (or a test) can replay an exact piece sequence
//! from a seed.

use crate::types::{Color, ShapeKind};

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
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Get the current RNG state
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Uniform shape/color piece generator
#[derive(Debug, Clone)]
pub struct PieceFactory {
    rng: SimpleRng,
}

impl PieceFactory {
    /// Create a new factory with the given seed
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }

    /// Draw the next (shape, color) pair
    pub fn draw(&mut self) -> (ShapeKind, Color) {
        let kind = ShapeKind::ALL[self.rng.next_range(ShapeKind::ALL.len() as u32) as usize];
        let color = Color::ALL[self.rng.next_range(Color::ALL.len() as u32) as usize];
        (kind, color)
    }

    /// Get the current RNG state (for restarting with the same sequence)
    pub fn state(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for PieceFactory {
    fn default() -> Self {
        Self::new(1)
    }
}
