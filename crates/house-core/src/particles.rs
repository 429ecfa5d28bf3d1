//! Sparse drifting particle field with a click-triggered radial explosion.
//!
//! The field never grows or shrinks after [`ParticleField::spawn`] and never
//! clamps positions: particles drift for as long as the page stays open.

use glam::Vec3;
use rand::Rng;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
}

/// Axis-aligned spawn volume plus a velocity span centred on zero.
#[derive(Clone, Copy, Debug)]
pub struct SpawnBounds {
    pub min: Vec3,
    pub max: Vec3,
    pub velocity_span: Vec3,
}

#[derive(Clone, Copy, Debug)]
pub struct ExplosionConfig {
    pub strength: f32,
    /// Time after the impulse before damping starts.
    pub damping_delay: Duration,
    /// Velocity multiplier applied once per tick while damping.
    pub damping: f32,
}

#[derive(Clone, Debug)]
struct Decay {
    elapsed: Duration,
    // Speed each particle had before the first impulse of this burst.
    rest_speeds: Vec<f32>,
}

#[derive(Clone, Debug)]
pub struct ParticleField {
    particles: Vec<Particle>,
    explosion: ExplosionConfig,
    decay: Option<Decay>,
}

impl ParticleField {
    pub fn spawn<R: Rng>(
        count: usize,
        bounds: &SpawnBounds,
        explosion: ExplosionConfig,
        rng: &mut R,
    ) -> Self {
        let span = bounds.max - bounds.min;
        let particles = (0..count)
            .map(|_| {
                let unit = Vec3::new(rng.gen(), rng.gen(), rng.gen());
                let jitter = Vec3::new(rng.gen(), rng.gen(), rng.gen()) - Vec3::splat(0.5);
                Particle {
                    position: bounds.min + unit * span,
                    velocity: jitter * bounds.velocity_span,
                }
            })
            .collect();
        Self::from_particles(particles, explosion)
    }

    pub fn from_particles(particles: Vec<Particle>, explosion: ExplosionConfig) -> Self {
        Self {
            particles,
            explosion,
            decay: None,
        }
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

    pub fn is_damping(&self) -> bool {
        self.decay.is_some()
    }

    /// Move every particle by its velocity.
    pub fn advance(&mut self) {
        for p in &mut self.particles {
            p.position += p.velocity;
        }
    }

    /// One frame: run any pending damping, then advance positions.
    pub fn tick(&mut self, dt: Duration) {
        self.step_decay(dt);
        self.advance();
    }

    /// Push every particle radially away from the origin with a force of
    /// `strength / (distance + 1)`. Particles sitting exactly on the origin have
    /// no direction and are left alone. Returns how many particles were pushed.
    pub fn explode(&mut self) -> usize {
        let rest_speeds = match self.decay.take() {
            // A click during an ongoing burst keeps the pre-burst resting speeds
            Some(d) => d.rest_speeds,
            None => self.particles.iter().map(|p| p.velocity.length()).collect(),
        };
        let strength = self.explosion.strength;
        let mut pushed = 0;
        for p in &mut self.particles {
            let distance = p.position.length();
            if distance <= f32::EPSILON {
                continue;
            }
            let force = strength / (distance + 1.0);
            p.velocity += p.position / distance * force;
            pushed += 1;
        }
        self.decay = Some(Decay {
            elapsed: Duration::ZERO,
            rest_speeds,
        });
        pushed
    }

    fn step_decay(&mut self, dt: Duration) {
        let Some(decay) = self.decay.as_mut() else {
            return;
        };
        decay.elapsed += dt;
        if decay.elapsed < self.explosion.damping_delay {
            return;
        }
        let factor = self.explosion.damping;
        let mut still_fast = false;
        for (p, rest) in self.particles.iter_mut().zip(&decay.rest_speeds) {
            if p.velocity.length() > *rest {
                p.velocity *= factor;
                still_fast |= p.velocity.length() > *rest;
            }
        }
        if !still_fast {
            self.decay = None;
        }
    }
}
