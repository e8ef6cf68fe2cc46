use crate::core::constants::{FIELD_RADIUS, PARTICLE_SIZE_MAX, PARTICLE_SIZE_MIN};
use crate::core::fractal;
use crate::core::params::ControlParameters;
use glam::{Vec3, Vec4};
use rand::prelude::*;

/// One particle: an immutable seed position inside the field volume, a
/// sprite size and a random triplet consumed by the displacement pipeline.
/// Only the *rendered* position/color is recomputed each frame.
#[derive(Clone, Copy, Debug)]
pub struct Particle {
    pub seed: Vec3,
    pub size: f32,
    pub jitter: Vec3,
}

/// The particle field. The count is fixed at initialization and the buffer
/// is never reallocated afterwards; surface resizes only touch projection
/// parameters elsewhere.
pub struct ParticleField {
    particles: Vec<Particle>,
}

impl ParticleField {
    /// Sample `count` seeds uniformly in the field cube from a deterministic
    /// base seed.
    pub fn new(count: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let particles = (0..count)
            .map(|_| Particle {
                seed: Vec3::new(
                    rng.gen_range(-FIELD_RADIUS..FIELD_RADIUS),
                    rng.gen_range(-FIELD_RADIUS..FIELD_RADIUS),
                    rng.gen_range(-FIELD_RADIUS..FIELD_RADIUS),
                ),
                size: rng.gen_range(PARTICLE_SIZE_MIN..PARTICLE_SIZE_MAX),
                jitter: Vec3::new(rng.gen(), rng.gen(), rng.gen()),
            })
            .collect();
        Self { particles }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Run the kernel over every particle into caller-owned buffers.
    ///
    /// The buffers are cleared and refilled so per-frame allocation settles
    /// after the first call. Each particle is a pure function of (seed,
    /// parameters) with no inter-particle dependency, so the sweep order is
    /// irrelevant and the map can be chunked across any number of workers.
    pub fn evaluate_into(
        &self,
        p: &ControlParameters,
        positions: &mut Vec<Vec3>,
        colors: &mut Vec<Vec4>,
        scales: &mut Vec<f32>,
    ) {
        positions.clear();
        colors.clear();
        scales.clear();
        positions.reserve(self.particles.len());
        colors.reserve(self.particles.len());
        scales.reserve(self.particles.len());
        for particle in &self.particles {
            let (pos, color) = fractal::evaluate(particle.seed, particle.jitter, p);
            positions.push(pos);
            colors.push(color);
            scales.push(particle.size);
        }
    }
}
