//! Tunables for the particle field.
//!
//! Every field has a default so partial config files deserialize cleanly.
//! Distances are world units (see [`neon_core::Viewport`]); per-step values
//! apply once per frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::bounds::Bounds;
use crate::particle::Particle;

/// Shape of the ambient particle pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldShape {
    /// Particles spread over the whole screen, no depth.
    #[default]
    Flat,
    /// A spinning cube of particles seen in perspective.
    Cube,
    /// A spinning ball of particles seen in perspective.
    Sphere,
}

impl FieldShape {
    /// Whether the shape has depth and needs a perspective projection.
    pub fn is_volumetric(self) -> bool {
        !matches!(self, FieldShape::Flat)
    }
}

/// How the pointer pushes particles around.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForceMode {
    Off,
    Attract,
    #[default]
    Repel,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForceSettings {
    pub mode: ForceMode,
    /// Particles farther than this from the pointer are unaffected.
    pub radius: f32,
    /// Displacement per step is `strength / max(distance, 1)`.
    pub strength: f32,
}

impl Default for ForceSettings {
    fn default() -> Self {
        Self {
            mode: ForceMode::Repel,
            radius: 12.0,
            strength: 1.5,
        }
    }
}

impl ForceSettings {
    /// Push a particle toward or away from `target`.
    pub fn apply(&self, particle: &mut Particle, target: glam::Vec3) {
        if self.mode == ForceMode::Off {
            return;
        }
        let offset = target - particle.pos;
        let distance = offset.length();
        if distance >= self.radius || distance <= f32::EPSILON {
            return;
        }
        let direction = offset / distance;
        let push = self.strength / distance.max(1.0);
        match self.mode {
            // Never pull a particle past the pointer.
            ForceMode::Attract => particle.pos += direction * push.min(distance),
            ForceMode::Repel => particle.pos -= direction * push,
            ForceMode::Off => {}
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionSettings {
    pub enabled: bool,
    pub max_distance: f32,
    /// Nearest neighbours kept per particle.
    pub k_nearest: usize,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            max_distance: 10.0,
            k_nearest: 3,
        }
    }
}

/// Vertical sine bobbing of ambient particles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriftSettings {
    pub amplitude: f32,
    pub min_speed: f32,
    pub max_speed: f32,
}

impl Default for DriftSettings {
    fn default() -> Self {
        Self {
            amplitude: 0.05,
            min_speed: 0.2,
            max_speed: 0.7,
        }
    }
}

/// Click feedback bursts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BurstSettings {
    pub count: usize,
    pub min_speed: f32,
    pub max_speed: f32,
    /// Frames a burst particle lives; alpha reaches zero on the last one.
    pub lifetime_frames: u32,
}

impl Default for BurstSettings {
    fn default() -> Self {
        Self {
            count: 14,
            min_speed: 0.4,
            max_speed: 1.2,
            lifetime_frames: 30,
        }
    }
}

/// Particles shed by pointer movement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailSettings {
    pub enabled: bool,
    /// Alpha lost per frame.
    pub decay: f32,
    /// Upper bound of the random per-axis speed.
    pub speed: f32,
    pub lifetime_frames: u32,
}

impl Default for TrailSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            decay: 0.05,
            speed: 0.3,
            lifetime_frames: 40,
        }
    }
}

/// Perspective floor grid under volumetric fields. It does not spin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    pub enabled: bool,
    /// Distance of the floor below the field center.
    pub floor: f32,
    /// Half edge of the square grid.
    pub half_size: f32,
    /// Lines per direction, minus one.
    pub divisions: usize,
    pub alpha: f32,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            floor: 18.0,
            half_size: 80.0,
            divisions: 20,
            alpha: 0.2,
        }
    }
}

/// Camera drift toward the pointer, volumetric fields only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Camera offset with the pointer at a viewport edge.
    pub parallax: f32,
    /// Fraction of the remaining offset covered per step.
    pub easing: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            parallax: 5.0,
            easing: 0.03,
        }
    }
}

/// Pulsing halo drawn around orbs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlowSettings {
    pub enabled: bool,
    /// Halo radius as a multiple of the orb radius.
    pub scale: f32,
    /// Pulse angular speed, radians per second.
    pub pulse_speed: f32,
    /// Halo opacity at the top of a pulse.
    pub alpha: f32,
}

impl Default for GlowSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            scale: 1.5,
            pulse_speed: 2.0,
            alpha: 0.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldSettings {
    /// Ambient particles created on initialize.
    pub count: usize,
    /// Large, slow, bobbing particles added on top of `count`.
    pub orbs: usize,
    pub shape: FieldShape,
    /// Half edge of the cube or radius of the sphere.
    pub extent: f32,
    /// Distance from the camera to the field center, volumetric shapes only.
    pub camera_distance: f32,
    /// Spin around the vertical axis in radians per second.
    pub spin: f32,
    /// Upper bound of the random per-axis ambient speed.
    pub max_speed: f32,
    /// Transient particles beyond this count are not spawned.
    pub max_transient: usize,
    pub connections: ConnectionSettings,
    pub force: ForceSettings,
    pub drift: DriftSettings,
    pub burst: BurstSettings,
    pub trail: TrailSettings,
    pub grid: GridSettings,
    pub camera: CameraSettings,
    pub glow: GlowSettings,
}

impl Default for FieldSettings {
    fn default() -> Self {
        Self {
            count: 90,
            orbs: 6,
            shape: FieldShape::Flat,
            extent: 40.0,
            camera_distance: 100.0,
            spin: 0.05,
            max_speed: 0.15,
            max_transient: 400,
            connections: ConnectionSettings::default(),
            force: ForceSettings::default(),
            drift: DriftSettings::default(),
            burst: BurstSettings::default(),
            trail: TrailSettings::default(),
            grid: GridSettings::default(),
            camera: CameraSettings::default(),
            glow: GlowSettings::default(),
        }
    }
}

impl FieldSettings {
    /// Bounds to populate for a viewport of the given world size.
    pub fn bounds_for(&self, viewport: Vec2) -> Bounds {
        match self.shape {
            FieldShape::Flat => Bounds::Rect {
                min: Vec2::ZERO,
                max: viewport,
            },
            FieldShape::Cube => Bounds::Cube {
                half_extent: self.valid_extent(),
            },
            FieldShape::Sphere => Bounds::Sphere {
                radius: self.valid_extent(),
            },
        }
    }

    /// `extent`, or the default when it is negative, NaN or infinite.
    pub fn valid_extent(&self) -> f32 {
        if self.extent.is_finite() && self.extent >= 0.0 {
            self.extent
        } else {
            Self::default().extent
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_repel_pushes_away() {
        let force = ForceSettings {
            mode: ForceMode::Repel,
            radius: 10.0,
            strength: 2.0,
        };
        let mut p = Particle::at(Vec3::new(4.0, 0.0, 0.0));
        force.apply(&mut p, Vec3::ZERO);
        assert!((p.pos.x - 4.5).abs() < 1e-5);
    }

    #[test]
    fn test_attract_never_overshoots() {
        let force = ForceSettings {
            mode: ForceMode::Attract,
            radius: 10.0,
            strength: 50.0,
        };
        let mut p = Particle::at(Vec3::new(0.5, 0.0, 0.0));
        force.apply(&mut p, Vec3::ZERO);
        assert!(p.pos.x.abs() < 1e-5);
    }

    #[test]
    fn test_force_outside_radius_is_ignored() {
        let force = ForceSettings::default();
        let start = Vec3::new(force.radius + 1.0, 0.0, 0.0);
        let mut p = Particle::at(start);
        force.apply(&mut p, Vec3::ZERO);
        assert_eq!(p.pos, start);
    }

    #[test]
    fn test_bounds_follow_shape() {
        let mut settings = FieldSettings::default();
        assert!(matches!(
            settings.bounds_for(Vec2::new(80.0, 48.0)),
            Bounds::Rect { .. }
        ));
        settings.shape = FieldShape::Sphere;
        assert_eq!(
            settings.bounds_for(Vec2::ONE),
            Bounds::Sphere { radius: 40.0 }
        );
    }

    #[test]
    fn test_bad_extent_falls_back() {
        let default = FieldSettings::default().extent;
        for extent in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY, -3.0] {
            let settings = FieldSettings {
                shape: FieldShape::Sphere,
                extent,
                ..Default::default()
            };
            assert_eq!(
                settings.bounds_for(Vec2::ONE),
                Bounds::Sphere { radius: default },
                "extent {extent}"
            );
        }
        let cube = FieldSettings {
            shape: FieldShape::Cube,
            extent: f32::NAN,
            ..Default::default()
        };
        assert_eq!(
            cube.bounds_for(Vec2::ONE),
            Bounds::Cube {
                half_extent: default
            }
        );
    }
}
