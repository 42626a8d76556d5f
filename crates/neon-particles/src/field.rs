//! The particle field and its per-frame update.

use std::f32::consts::TAU;

use glam::{Vec2, Vec3};
use neon_core::{Tint, Viewport};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::bounds::{Bounds, uniform};
use crate::connections::{Connection, nearest_connections};
use crate::particle::{Lifetime, Particle};
use crate::projection::Projection;
use crate::settings::FieldSettings;

/// Size of an orb; persistent particles at least this large render as one.
pub(crate) const ORB_SIZE: f32 = 4.0;

/// Owns the particle buffer and everything needed to advance it.
#[derive(Debug)]
pub struct ParticleField {
    particles: Vec<Particle>,
    connections: Vec<Connection>,
    settings: FieldSettings,
    bounds: Option<Bounds>,
    /// Eased camera offset and where it is heading.
    camera: Vec2,
    camera_target: Vec2,
    /// Seconds passed to the last step.
    elapsed: f32,
    rng: StdRng,
}

impl ParticleField {
    /// Create an empty field seeded from system entropy.
    pub fn new(settings: FieldSettings) -> Self {
        Self::with_rng(settings, StdRng::from_entropy())
    }

    /// Create an empty field with a reproducible random sequence.
    pub fn with_seed(settings: FieldSettings, seed: u64) -> Self {
        Self::with_rng(settings, StdRng::seed_from_u64(seed))
    }

    fn with_rng(settings: FieldSettings, rng: StdRng) -> Self {
        Self {
            particles: Vec::new(),
            connections: Vec::new(),
            settings,
            bounds: None,
            camera: Vec2::ZERO,
            camera_target: Vec2::ZERO,
            elapsed: 0.0,
            rng,
        }
    }

    pub fn settings(&self) -> &FieldSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut FieldSettings {
        &mut self.settings
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[cfg(test)]
    pub(crate) fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    /// Connections from the last [`compute_connections`](Self::compute_connections).
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Bounds of the last [`initialize`](Self::initialize), if any.
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// Seconds passed to the last [`step`](Self::step).
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn camera(&self) -> Vec2 {
        self.camera
    }

    /// Point the camera at the pointer, given in normalized viewport
    /// coordinates (-1.0..=1.0 on both axes). The camera eases there over the
    /// following steps.
    pub fn aim_camera(&mut self, ndc: Vec2) {
        let ndc = ndc.clamp(Vec2::NEG_ONE, Vec2::ONE);
        self.camera_target = ndc * self.settings.camera.parallax;
    }

    /// Projection for drawing this field at `elapsed` seconds, camera included.
    pub fn projection(&self, viewport: &Viewport, elapsed: f32) -> Projection {
        Projection::for_field(&self.settings, viewport, elapsed).with_camera(self.camera)
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Number of burst and trail particles currently alive.
    pub fn transient_count(&self) -> usize {
        self.particles.iter().filter(|p| p.is_transient()).count()
    }

    /// Replace the buffer with `count` ambient particles spread uniformly over
    /// `bounds`, followed by the configured orbs.
    pub fn initialize(&mut self, count: usize, bounds: Bounds) {
        let orbs = self.settings.orbs;
        self.particles = Vec::with_capacity(count + orbs);
        self.connections.clear();
        self.bounds = Some(bounds);

        for _ in 0..count {
            let particle = self.ambient_particle(bounds);
            self.particles.push(particle);
        }
        for i in 0..orbs {
            let particle = self.orb(bounds, i);
            self.particles.push(particle);
        }
    }

    fn ambient_particle(&mut self, bounds: Bounds) -> Particle {
        let speed = self.settings.max_speed;
        let drift = self.settings.drift;
        let rng = &mut self.rng;
        let z_speed = if bounds.is_volumetric() { speed } else { 0.0 };
        Particle {
            pos: bounds.sample(rng),
            vel: Vec3::new(
                uniform(rng, -speed, speed),
                uniform(rng, -speed, speed),
                uniform(rng, -z_speed, z_speed),
            ),
            size: uniform(rng, 0.0, 2.0),
            // Ambient dust is split between the two base colors.
            tint: if rng.gen_bool(0.5) {
                Tint::Primary
            } else {
                Tint::Accent
            },
            alpha: uniform(rng, 0.5, 1.0),
            rotation: uniform(rng, 0.0, 360.0),
            rotation_speed: 0.0,
            drift_speed: uniform(rng, drift.min_speed, drift.max_speed),
            drift_phase: uniform(rng, 0.0, TAU),
            life: Lifetime::Persistent,
        }
    }

    fn orb(&mut self, bounds: Bounds, index: usize) -> Particle {
        let drift = self.settings.drift;
        let rng = &mut self.rng;
        Particle {
            pos: bounds.sample(rng),
            vel: Vec3::ZERO,
            size: ORB_SIZE + uniform(rng, 0.0, 2.0),
            tint: if index % 2 == 0 {
                Tint::Primary
            } else {
                Tint::Accent
            },
            alpha: 0.7,
            rotation: 0.0,
            rotation_speed: 0.0,
            drift_speed: uniform(rng, drift.min_speed, drift.max_speed),
            drift_phase: uniform(rng, 0.0, TAU),
            life: Lifetime::Persistent,
        }
    }

    /// Advance every particle by one frame.
    ///
    /// `elapsed` is seconds since the field started, `pointer` the pointer in
    /// field coordinates when it is inside the viewport. Spent transient
    /// particles are dropped in the same pass.
    pub fn step(&mut self, elapsed: f32, pointer: Option<Vec3>) {
        let drift = self.settings.drift;
        let force = self.settings.force;
        let easing = self.settings.camera.easing.clamp(0.0, 1.0);

        self.elapsed = elapsed;
        self.camera += (self.camera_target - self.camera) * easing;

        for p in &mut self.particles {
            p.pos += p.vel;
            if drift.amplitude > 0.0 && !p.is_transient() {
                p.pos.y += (elapsed * p.drift_speed + p.drift_phase).sin() * drift.amplitude;
            }
            if let Some(target) = pointer {
                force.apply(p, target);
            }
            p.rotation = (p.rotation + p.rotation_speed).rem_euclid(360.0);
            p.age();
        }

        self.particles.retain(|p| !p.is_spent());
    }

    /// Recompute connections from scratch and return them.
    pub fn compute_connections(&mut self, max_distance: f32, k_nearest: usize) -> &[Connection] {
        let positions: Vec<Vec3> = self.particles.iter().map(|p| p.pos).collect();
        self.connections = nearest_connections(&positions, max_distance, k_nearest);
        &self.connections
    }

    /// Recompute connections with the configured distance and neighbour count,
    /// or clear them when connections are disabled.
    pub fn refresh_connections(&mut self) {
        let settings = self.settings.connections;
        if settings.enabled {
            self.compute_connections(settings.max_distance, settings.k_nearest);
        } else {
            self.connections.clear();
        }
    }

    fn transient_room(&self) -> usize {
        self.settings
            .max_transient
            .saturating_sub(self.transient_count())
    }

    /// Append `count` particles flying outward from `origin`.
    pub fn spawn_burst(&mut self, origin: Vec3, count: usize) {
        let burst = self.settings.burst;
        let lifetime = burst.lifetime_frames.max(1);
        let decay = 1.0 / lifetime as f32;
        let count = count.min(self.transient_room());

        for _ in 0..count {
            let rng = &mut self.rng;
            let angle = uniform(rng, 0.0, TAU);
            let speed = uniform(rng, burst.min_speed, burst.max_speed);
            let particle = Particle {
                pos: origin,
                vel: Vec3::new(angle.cos() * speed, angle.sin() * speed, 0.0),
                size: uniform(rng, 0.5, 3.0),
                tint: Tint::ALL[rng.gen_range(0..Tint::ALL.len())],
                alpha: 1.0,
                rotation: uniform(rng, 0.0, 360.0),
                rotation_speed: uniform(rng, -12.0, 12.0),
                drift_speed: 0.0,
                drift_phase: 0.0,
                life: Lifetime::Transient {
                    frames_left: lifetime,
                    decay,
                },
            };
            self.particles.push(particle);
        }
    }

    /// Shed one fading particle at `origin`, typically on pointer movement.
    ///
    /// Does nothing while trails are disabled.
    pub fn emit_trail(&mut self, origin: Vec3) {
        let trail = self.settings.trail;
        if !trail.enabled || self.transient_room() == 0 {
            return;
        }
        let rng = &mut self.rng;
        let particle = Particle {
            pos: origin,
            vel: Vec3::new(
                uniform(rng, -trail.speed, trail.speed),
                uniform(rng, -trail.speed, trail.speed),
                0.0,
            ),
            size: uniform(rng, 1.0, 6.0),
            tint: if rng.gen_bool(0.5) {
                Tint::Primary
            } else {
                Tint::Accent
            },
            alpha: 1.0,
            rotation: uniform(rng, 0.0, 360.0),
            rotation_speed: uniform(rng, -1.0, 1.0),
            drift_speed: 0.0,
            drift_phase: 0.0,
            life: Lifetime::Transient {
                frames_left: trail.lifetime_frames.max(1),
                decay: trail.decay,
            },
        };
        self.particles.push(particle);
    }
}
