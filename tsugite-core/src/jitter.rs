//! Load-time weight perturbation for tie breaking.
//!
//! Every input edge receives one independent uniform draw from
//! `[-amplitude, amplitude]` before it is accumulated into the graph. The
//! perturbed weight is the only weight the solver ever sees for that edge, so
//! exact equality checks on schedule entries stay consistent.

use rand::{Rng, SeedableRng, rngs::SmallRng};

/// Default half-width of the jitter interval.
pub const DEFAULT_NOISE_AMPLITUDE: f64 = 1e-9;

/// Largest accepted half-width. The sampler needs the interval width, with
/// some headroom, to stay finite.
pub const MAX_NOISE_AMPLITUDE: f64 = f64::MAX / 4.0;

/// Seeded source of tie-breaking noise owned by a single solve call.
#[derive(Debug)]
pub(crate) struct Jitter {
    amplitude: f64,
    rng: SmallRng,
}

impl Jitter {
    /// Creates a jitter source. `amplitude` must already be validated to lie
    /// in `0.0..=MAX_NOISE_AMPLITUDE`.
    pub(crate) fn new(amplitude: f64, seed: u64) -> Self {
        Self {
            amplitude,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Returns `weight` shifted by a fresh draw from the jitter interval.
    pub(crate) fn perturb(&mut self, weight: f64) -> f64 {
        if self.amplitude == 0.0 {
            return weight;
        }
        weight + self.rng.gen_range(-self.amplitude..=self.amplitude)
    }
}

/// Draws a seed from system entropy for callers that did not pin one.
pub(crate) fn entropy_seed() -> u64 {
    rand::random()
}
