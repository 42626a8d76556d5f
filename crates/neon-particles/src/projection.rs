//! Field-to-screen projection.

use glam::{Vec2, Vec3};
use neon_core::Viewport;

use crate::settings::FieldSettings;

/// Points closer to the camera than this are culled.
const NEAR_PLANE: f32 = 1.0;

/// Maps field coordinates to screen world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// Field coordinates are screen coordinates; z is ignored.
    Flat,
    /// Spin about the vertical axis, then perspective divide around `center`.
    /// `camera` shifts the eye sideways in field units.
    Perspective {
        angle: f32,
        camera_distance: f32,
        center: Vec2,
        camera: Vec2,
    },
}

impl Projection {
    /// Projection for a field at `elapsed` seconds.
    pub fn for_field(settings: &FieldSettings, viewport: &Viewport, elapsed: f32) -> Self {
        if settings.shape.is_volumetric() {
            Projection::Perspective {
                angle: elapsed * settings.spin,
                camera_distance: settings.camera_distance.max(NEAR_PLANE * 2.0),
                center: viewport.center(),
                camera: Vec2::ZERO,
            }
        } else {
            Projection::Flat
        }
    }

    /// The same projection with the eye moved to `camera`. Flat ignores it.
    pub fn with_camera(self, camera: Vec2) -> Self {
        match self {
            Projection::Flat => Projection::Flat,
            Projection::Perspective {
                angle,
                camera_distance,
                center,
                ..
            } => Projection::Perspective {
                angle,
                camera_distance,
                center,
                camera,
            },
        }
    }

    /// The same projection without spin, for scenery fixed to the camera rig.
    pub fn unspun(self) -> Self {
        match self {
            Projection::Flat => Projection::Flat,
            Projection::Perspective {
                camera_distance,
                center,
                camera,
                ..
            } => Projection::Perspective {
                angle: 0.0,
                camera_distance,
                center,
                camera,
            },
        }
    }

    /// Screen position and depth scale (1.0 at the field center plane), or
    /// `None` when the point is behind the near plane.
    pub fn project(&self, p: Vec3) -> Option<(Vec2, f32)> {
        match *self {
            Projection::Flat => Some((p.truncate(), 1.0)),
            Projection::Perspective {
                angle,
                camera_distance,
                center,
                camera,
            } => {
                let r = rotate_y(p, angle);
                let depth = camera_distance + r.z;
                if depth <= NEAR_PLANE {
                    return None;
                }
                let scale = camera_distance / depth;
                Some((center + (r.truncate() - camera) * scale, scale))
            }
        }
    }

    /// Field point on the depth-zero plane that projects onto `screen`.
    pub fn unproject(&self, screen: Vec2) -> Vec3 {
        match *self {
            Projection::Flat => screen.extend(0.0),
            Projection::Perspective {
                angle,
                center,
                camera,
                ..
            } => rotate_y((screen - center + camera).extend(0.0), -angle),
        }
    }
}

fn rotate_y(p: Vec3, angle: f32) -> Vec3 {
    let (sin, cos) = angle.sin_cos();
    Vec3::new(p.x * cos + p.z * sin, p.y, -p.x * sin + p.z * cos)
}
