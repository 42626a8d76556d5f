use glam::Vec3;
use neon_core::Tint;

use crate::field::ORB_SIZE;

/// How long a particle stays in the field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lifetime {
    /// Part of the ambient pool, never removed by the update loop.
    Persistent,
    /// Spawned by a burst or trail; fades by `decay` alpha per step.
    Transient { frames_left: u32, decay: f32 },
}

/// A single point-like particle.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec3,
    /// Displacement per step.
    pub vel: Vec3,
    /// Visual size, picks the glyph.
    pub size: f32,
    pub tint: Tint,
    /// Opacity in 0.0..=1.0.
    pub alpha: f32,
    /// Rotation in degrees.
    pub rotation: f32,
    /// Degrees added per step.
    pub rotation_speed: f32,
    /// Angular speed of the vertical bob, radians per second.
    pub drift_speed: f32,
    pub drift_phase: f32,
    pub life: Lifetime,
}

impl Particle {
    /// A motionless, fully opaque persistent particle.
    pub fn at(pos: Vec3) -> Self {
        Self {
            pos,
            vel: Vec3::ZERO,
            size: 1.0,
            tint: Tint::Primary,
            alpha: 1.0,
            rotation: 0.0,
            rotation_speed: 0.0,
            drift_speed: 0.0,
            drift_phase: 0.0,
            life: Lifetime::Persistent,
        }
    }

    pub fn is_transient(&self) -> bool {
        matches!(self.life, Lifetime::Transient { .. })
    }

    /// A large persistent particle. Large sparks are not orbs.
    pub fn is_orb(&self) -> bool {
        !self.is_transient() && self.size >= ORB_SIZE
    }

    /// Spend one frame of lifetime. Alpha is clamped at zero.
    pub(crate) fn age(&mut self) {
        if let Lifetime::Transient { frames_left, decay } = &mut self.life {
            self.alpha = (self.alpha - *decay).max(0.0);
            *frames_left = frames_left.saturating_sub(1);
        }
    }

    /// Whether the particle should leave the active set.
    pub fn is_spent(&self) -> bool {
        match self.life {
            Lifetime::Persistent => false,
            Lifetime::Transient { frames_left, .. } => self.alpha <= 0.0 || frames_left == 0,
        }
    }
}
