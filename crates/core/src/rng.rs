//! RNG module - seeded shape selection
//!
//! Shapes are drawn uniformly. When a draw repeats the previous shape it is
//! redrawn exactly once; the second draw is kept even if it repeats again.
//! The underlying generator is a small LCG so that a seed fully determines
//! the shape sequence.

use crate::types::ShapeKind;

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
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones.
        (((self.next_u32() >> 16) as u64 * max as u64) >> 16) as u32
    }
}

/// Shape source with the redraw-once rule.
#[derive(Debug, Clone)]
pub struct ShapePicker {
    rng: SimpleRng,
    seed: u32,
    previous: Option<ShapeKind>,
}

impl ShapePicker {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            seed,
            previous: None,
        }
    }

    fn draw_any(&mut self) -> ShapeKind {
        let idx = self.rng.next_range(ShapeKind::ALL.len() as u32) as usize;
        ShapeKind::ALL[idx]
    }

    /// Draw the next shape.
    pub fn draw(&mut self) -> ShapeKind {
        let mut kind = self.draw_any();
        if self.previous == Some(kind) {
            kind = self.draw_any();
        }
        self.previous = Some(kind);
        kind
    }

    /// Shape returned by the last draw.
    pub fn previous(&self) -> Option<ShapeKind> {
        self.previous
    }

    /// Seed this picker was created with.
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl Default for ShapePicker {
    fn default() -> Self {
        Self::new(1)
    }
}
