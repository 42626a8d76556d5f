//! Pointer follower markers for neon.
//!
//! A [`PointerFollower`] records the raw pointer position from mouse events
//! and eases a set of markers (dot, ring, trail, glow) toward it once per
//! frame, each with its own easing constant. It also tracks the pointer's
//! visual state and the ripples left by clicks.

mod follower;
mod render;
mod ripple;
mod settings;

pub use follower::{FollowerState, Marker, PointerFollower};
pub use ripple::Ripple;
pub use settings::{FollowerSettings, MarkerKind, MarkerSettings};
