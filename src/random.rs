//! Randomness source for gameplay
//!
//! Every random decision in the game (drop type, size, position, fall speed,
//! spawn timing, message choice) goes through [`Randomness`], so tests can
//! swap in a scripted sequence.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Source of uniform reals in `[0, 1)` plus the range helpers built on it
pub trait Randomness {
    /// Next uniform real in `[0, 1)`
    fn next_unit(&mut self) -> f64;

    /// Uniform real in `[a, b)`
    fn uniform_real(&mut self, a: f64, b: f64) -> f64 {
        a + self.next_unit() * (b - a)
    }

    /// Uniform integer in `[a, b]` (inclusive)
    fn uniform_int(&mut self, a: i64, b: i64) -> i64 {
        // A hand-written source may return exactly 1.0
        (self.uniform_real(a as f64, (b + 1) as f64).floor() as i64).min(b)
    }

    /// Uniformly pick one element, `None` for an empty slice
    fn pick_one<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T>
    where
        Self: Sized,
    {
        if items.is_empty() {
            return None;
        }
        let idx = self.uniform_int(0, items.len() as i64 - 1);
        items.get(idx.max(0) as usize)
    }

    /// Bernoulli trial with probability `p`
    fn chance(&mut self, p: f64) -> bool {
        self.next_unit() < p
    }
}

/// Production RNG: PCG32 seeded once per page load
#[derive(Debug, Clone)]
pub struct GameRng {
    rng: Pcg32,
}

impl GameRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl Randomness for GameRng {
    fn next_unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Replays a fixed list of unit values, cycling when exhausted
///
/// Used by tests and the headless runner to force specific outcomes.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedRandom {
    /// An empty list behaves like a constant 0.0
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    /// Always returns the same value
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }
}

impl Randomness for ScriptedRandom {
    fn next_unit(&mut self) -> f64 {
        let v = self
            .values
            .get(self.cursor % self.values.len().max(1))
            .copied()
            .unwrap_or(0.0);
        self.cursor += 1;
        v
    }
}

impl<R: Randomness + ?Sized> Randomness for Box<R> {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}
