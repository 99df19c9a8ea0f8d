//! Domain layer: the wire payload and the number sampler.
//!
//! This module contains the feed's data model: the single-field
//! [`Payload`] exchanged over the channel and the [`NumberSampler`]
//! capability injected into every producer loop.

pub mod payload;
pub mod sampler;

pub use payload::Payload;
pub use sampler::{FixedSequenceSampler, NumberSampler, ThreadRngSampler};
