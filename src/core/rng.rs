//! Injectable randomness
//!
//! Every random draw in a turn resolution goes through one `RandomSource`.
//! Any `rand` generator works (the campaign uses a seeded `ChaCha8Rng`);
//! tests can script exact draws with `ScriptedRandom`.

use rand::{Rng, RngCore};

/// A stream of uniform draws in [0, 1)
pub trait RandomSource {
    /// Next uniform value in [0, 1)
    fn next_unit(&mut self) -> f64;

    /// Roll one six-sided die (1..=6)
    fn roll_d6(&mut self) -> u8 {
        let face = (self.next_unit() * 6.0).floor() as u8 + 1;
        face.min(6)
    }

    /// `floor(u * bound)` as an integer in 0..bound
    fn below(&mut self, bound: u32) -> u32 {
        if bound == 0 {
            return 0;
        }
        ((self.next_unit() * bound as f64).floor() as u32).min(bound - 1)
    }

    /// Uniform index into a collection of `len` items
    fn pick_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(((self.next_unit() * len as f64).floor() as usize).min(len - 1))
    }

    /// Bernoulli trial
    fn chance(&mut self, probability: f64) -> bool {
        self.next_unit() < probability
    }
}

impl<R: RngCore + ?Sized> RandomSource for R {
    fn next_unit(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Replays a fixed list of draws, cycling when exhausted
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: Vec<f64>,
    cursor: usize,
    draws: u64,
}

impl ScriptedRandom {
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            values,
            cursor: 0,
            draws: 0,
        }
    }

    /// A source that always returns `value`
    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }

    /// Number of draws taken so far
    pub fn draws(&self) -> u64 {
        self.draws
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f64 {
        self.draws += 1;
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value.clamp(0.0, 1.0 - f64::EPSILON)
    }
}
