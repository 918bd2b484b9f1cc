//! Cosmetic particle bursts
//!
//! Particles live in their own collection and are never consulted by
//! collision or scoring.

use glam::Vec2;
use rand::Rng;

use super::state::{GameState, Particle};
use crate::consts::*;

impl Particle {
    /// Fully opaque particle with a random size and heading
    pub fn spawn(pos: Vec2, color: u32, rng: &mut impl Rng) -> Self {
        let radius = rng.random::<f32>() * PARTICLE_RADIUS_SPREAD + PARTICLE_MIN_RADIUS;
        let vel = Vec2::new(
            rng.random_range(-PARTICLE_MAX_SPEED..PARTICLE_MAX_SPEED),
            rng.random_range(-PARTICLE_MAX_SPEED..PARTICLE_MAX_SPEED),
        );
        Self {
            pos,
            vel,
            radius,
            color,
            alpha: 1.0,
        }
    }

    /// Damp, integrate, fade. Radius never changes after spawn.
    pub fn update(&mut self) {
        self.vel *= PARTICLE_DAMPING;
        self.pos += self.vel;
        self.alpha -= PARTICLE_FADE;
    }

    pub fn is_faded(&self) -> bool {
        self.alpha <= PARTICLE_ALPHA_EPSILON
    }
}

impl GameState {
    /// Emit `count` particles at `pos`
    pub fn emit_particles(&mut self, pos: Vec2, color: u32, count: usize) {
        self.particles.reserve(count);
        for _ in 0..count {
            let particle = Particle::spawn(pos, color, &mut self.rng);
            self.particles.push(particle);
        }
    }

    /// Advance every particle and drop the faded ones
    pub fn update_particles(&mut self) {
        for particle in &mut self.particles {
            particle.update();
        }
        self.particles.retain(|p| !p.is_faded());
    }
}
