//! Deterministic 3D coherent-noise sampling.
//!
//! Wraps a gradient-noise source seeded per run. Callers apply their own
//! coordinate scales, so one field serves every sampling site.

use noise::{NoiseFn, Perlin};

/// A seeded 3D noise field. Stateless after construction.
pub struct NoiseField {
    perlin: Perlin,
}

impl NoiseField {
    pub fn new(seed: u64) -> Self {
        Self {
            perlin: Perlin::new(seed as u32),
        }
    }

    /// Sample the field at a 3D point. Returns a value in roughly [-1, 1],
    /// continuous in all three coordinates.
    pub fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        self.perlin.get([x, y, z])
    }
}
