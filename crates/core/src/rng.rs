//! RNG module - shape sequencing
//!
//! The sequencer hands out shapes in batches: every batch is a uniformly
//! shuffled permutation of all seven shapes, so no shape repeats until the
//! batch is exhausted. Randomness is injected through [`RandomSource`], which
//! keeps games reproducible in tests.
//!
//! Also provides a simple LCG for deterministic testing.

use arrayvec::ArrayVec;
use rand::rngs::StdRng;
use rand::{Rng, RngCore};

use crate::types::ShapeId;

/// Source of uniform random numbers for the sequencer
pub trait RandomSource {
    /// Generate next random u32
    fn next_u32(&mut self) -> u32;

    /// Generate random value in range [0, bound)
    fn next_below(&mut self, bound: u32) -> u32 {
        self.next_u32() % bound
    }

    /// Shuffle a slice using Fisher-Yates
    fn shuffle<T>(&mut self, slice: &mut [T])
    where
        Self: Sized,
    {
        for i in (1..slice.len()).rev() {
            let j = self.next_below((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
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
}

impl RandomSource for SimpleRng {
    fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Scales by the high bits; the low bits of this LCG have short periods.
    fn next_below(&mut self, bound: u32) -> u32 {
        ((self.next_u32() as u64 * bound as u64) >> 32) as u32
    }
}

impl RandomSource for StdRng {
    fn next_u32(&mut self) -> u32 {
        RngCore::next_u32(self)
    }

    fn next_below(&mut self, bound: u32) -> u32 {
        self.gen_range(0..bound)
    }
}

/// Batch-of-seven shape sequencer
#[derive(Debug, Clone)]
pub struct Sequencer<R = SimpleRng> {
    /// Upcoming shapes; drawn from the back
    backlog: ArrayVec<ShapeId, 7>,
    rng: R,
}

impl Sequencer<SimpleRng> {
    /// Create a sequencer backed by [`SimpleRng`] with the given seed
    pub fn seeded(seed: u32) -> Self {
        Self::new(SimpleRng::new(seed))
    }
}

impl<R: RandomSource> Sequencer<R> {
    /// Create a sequencer with an empty backlog
    pub fn new(rng: R) -> Self {
        Self {
            backlog: ArrayVec::new(),
            rng,
        }
    }

    /// Append a freshly shuffled batch of all seven shapes
    ///
    /// Only called on an empty backlog, so the batch always fits.
    pub fn refill(&mut self) {
        let mut batch = ShapeId::ALL;
        self.rng.shuffle(&mut batch);
        for id in batch {
            if self.backlog.try_push(id).is_err() {
                break;
            }
        }
    }

    /// Draw the next shape, refilling first if the backlog is empty
    pub fn next(&mut self) -> ShapeId {
        loop {
            if let Some(id) = self.backlog.pop() {
                return id;
            }
            self.refill();
        }
    }

    /// Number of shapes left in the current batch
    pub fn len(&self) -> usize {
        self.backlog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.backlog.is_empty()
    }
}
