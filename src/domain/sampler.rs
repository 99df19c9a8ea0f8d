//! Uniform integer samplers injected into producer loops.
//!
//! The producer never touches a global random source directly; it is
//! handed a [`NumberSampler`] at construction. Production wiring uses
//! [`ThreadRngSampler`]; tests substitute [`FixedSequenceSampler`] for
//! deterministic output.

use std::sync::atomic::{AtomicUsize, Ordering};

use rand::Rng;

/// Capability for drawing uniform integers in `[0, bound())`.
pub trait NumberSampler: std::fmt::Debug + Send + Sync {
    /// Draws the next number.
    fn sample(&self) -> u32;

    /// Exclusive upper bound of the sampled range.
    fn bound(&self) -> u32;
}

/// Thread-local-RNG-backed sampler.
#[derive(Debug)]
pub struct ThreadRngSampler {
    bound: u32,
}

impl ThreadRngSampler {
    /// Creates a sampler over `[0, bound)`. A zero bound is clamped to
    /// one so the range is never empty.
    #[must_use]
    pub fn new(bound: u32) -> Self {
        Self {
            bound: bound.max(1),
        }
    }
}

impl NumberSampler for ThreadRngSampler {
    fn sample(&self) -> u32 {
        rand::rng().random_range(0..self.bound)
    }

    fn bound(&self) -> u32 {
        self.bound
    }
}

/// Deterministic sampler cycling through a fixed sequence.
#[derive(Debug)]
pub struct FixedSequenceSampler {
    values: Vec<u32>,
    next: AtomicUsize,
}

impl FixedSequenceSampler {
    /// Creates a sampler that yields `values` in order, wrapping
    /// around at the end. An empty sequence degenerates to `[0]`.
    #[must_use]
    pub fn new(values: Vec<u32>) -> Self {
        let values = if values.is_empty() { vec![0] } else { values };
        Self {
            values,
            next: AtomicUsize::new(0),
        }
    }
}

impl NumberSampler for FixedSequenceSampler {
    fn sample(&self) -> u32 {
        let idx = self.next.fetch_add(1, Ordering::Relaxed) % self.values.len();
        self.values.get(idx).copied().unwrap_or_default()
    }

    fn bound(&self) -> u32 {
        self.values
            .iter()
            .copied()
            .max()
            .map_or(1, |max| max.saturating_add(1))
    }
}
