//! Particle field simulation for neon.
//!
//! A [`ParticleField`] owns a buffer of particles that is stepped once per
//! frame. The field supports a fixed pool of ambient particles (flat, cube or
//! sphere shaped), transient click bursts and pointer trails, brute-force
//! nearest-neighbour connections, and pointer attraction or repulsion.
//! Rendering draws connections as braille line segments and particles as
//! glyphs, optionally through a spinning perspective projection with a floor
//! grid, a pointer-following camera and pulsing orb halos.

mod bounds;
mod chars;
mod connections;
mod field;
mod particle;
mod projection;
mod render;
mod settings;

pub use bounds::Bounds;
pub use connections::{Connection, nearest_connections};
pub use field::ParticleField;
pub use particle::{Lifetime, Particle};
pub use projection::Projection;
pub use settings::{
    BurstSettings, CameraSettings, ConnectionSettings, DriftSettings, FieldSettings, FieldShape,
    ForceMode, ForceSettings, GlowSettings, GridSettings, TrailSettings,
};
