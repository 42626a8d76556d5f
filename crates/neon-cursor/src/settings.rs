use neon_core::Tint;
use serde::{Deserialize, Serialize};

/// Visual role of a follower marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerKind {
    Dot,
    Ring,
    Trail,
    Glow,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerSettings {
    pub kind: MarkerKind,
    /// Fraction of the remaining distance covered per tick, in (0, 1].
    pub easing: f32,
    /// Easing used while hovering an interactive region.
    #[serde(default)]
    pub hover_easing: Option<f32>,
    /// How far ahead of the pointer the marker aims, in units of pointer velocity.
    #[serde(default)]
    pub lead: f32,
    #[serde(default)]
    pub tint: Tint,
}

impl MarkerSettings {
    pub fn new(kind: MarkerKind, easing: f32, tint: Tint) -> Self {
        Self {
            kind,
            easing,
            hover_easing: None,
            lead: 0.0,
            tint,
        }
    }

    /// Easing to apply this tick, clamped to (0, 1].
    pub fn easing_for(&self, hovering: bool) -> f32 {
        let e = if hovering {
            self.hover_easing.unwrap_or(self.easing)
        } else {
            self.easing
        };
        e.clamp(f32::EPSILON, 1.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FollowerSettings {
    pub enabled: bool,
    /// Markers in drawing order, front first.
    pub markers: Vec<MarkerSettings>,
    /// Pressed state reverts on its own after this long.
    pub press_revert_ms: u64,
    pub ripple_ms: u64,
    /// Ripple radius when fully grown, world units.
    pub ripple_radius: f32,
    /// Pointer velocity is `distance / elapsed_ms * velocity_scale`.
    pub velocity_scale: f32,
    /// Velocity multiplier applied every tick.
    pub velocity_damping: f32,
}

impl Default for FollowerSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            markers: vec![
                MarkerSettings::new(MarkerKind::Dot, 1.0, Tint::Accent),
                MarkerSettings {
                    hover_easing: Some(0.1),
                    lead: 0.3,
                    ..MarkerSettings::new(MarkerKind::Ring, 0.15, Tint::Primary)
                },
                MarkerSettings::new(MarkerKind::Trail, 0.06, Tint::Highlight),
            ],
            press_revert_ms: 250,
            ripple_ms: 800,
            ripple_radius: 6.0,
            velocity_scale: 10.0,
            velocity_damping: 0.95,
        }
    }
}
