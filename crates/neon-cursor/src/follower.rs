//! Pointer tracking and per-marker exponential smoothing.

use std::time::{Duration, Instant};

use glam::Vec2;

use crate::ripple::Ripple;
use crate::settings::{FollowerSettings, MarkerKind, MarkerSettings};

/// Visual state of the follower as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowerState {
    /// Pointer is outside the terminal; markers are hidden.
    Idle,
    Active,
    /// Pointer is over an interactive region; markers inflate.
    HoverExpanded,
    /// Pointer button held, or released less than the revert delay ago.
    Pressed,
}

/// A marker and where it is currently drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub settings: MarkerSettings,
    pub pos: Vec2,
    pub visible: bool,
}

/// Tracks the pointer and eases every marker toward it.
#[derive(Debug)]
pub struct PointerFollower {
    settings: FollowerSettings,
    markers: Vec<Marker>,
    raw: Vec2,
    velocity: Vec2,
    last_move: Option<Instant>,
    inside: bool,
    hovering: bool,
    pressed_since: Option<Instant>,
    enabled: bool,
    ripples: Vec<Ripple>,
}

impl PointerFollower {
    pub fn new(settings: FollowerSettings) -> Self {
        let markers = settings
            .markers
            .iter()
            .map(|m| Marker {
                settings: m.clone(),
                pos: Vec2::ZERO,
                visible: true,
            })
            .collect();
        Self {
            enabled: settings.enabled,
            settings,
            markers,
            raw: Vec2::ZERO,
            velocity: Vec2::ZERO,
            last_move: None,
            inside: false,
            hovering: false,
            pressed_since: None,
            ripples: Vec::new(),
        }
    }

    pub fn settings(&self) -> &FollowerSettings {
        &self.settings
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn ripples(&self) -> &[Ripple] {
        &self.ripples
    }

    pub fn raw_position(&self) -> Vec2 {
        self.raw
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Whether the pointer is inside the terminal at a known position.
    pub fn is_inside(&self) -> bool {
        self.inside && self.last_move.is_some()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn disable(&mut self) {
        self.enabled = false;
        self.ripples.clear();
    }

    pub fn state(&self) -> FollowerState {
        if !self.is_inside() {
            FollowerState::Idle
        } else if self.pressed_since.is_some() {
            FollowerState::Pressed
        } else if self.hovering {
            FollowerState::HoverExpanded
        } else {
            FollowerState::Active
        }
    }

    /// Record the latest pointer position. Nothing moves until [`tick`](Self::tick).
    ///
    /// The first position ever seen snaps every marker onto the pointer so
    /// they do not sweep in from the corner.
    pub fn update_raw_position(&mut self, pos: Vec2, now: Instant) {
        match self.last_move {
            Some(last) => {
                let elapsed_ms = now.saturating_duration_since(last).as_secs_f32() * 1000.0;
                if elapsed_ms > 0.0 {
                    self.velocity = (pos - self.raw) / elapsed_ms * self.settings.velocity_scale;
                }
            }
            None => {
                for marker in &mut self.markers {
                    marker.pos = pos;
                }
            }
        }
        self.raw = pos;
        self.last_move = Some(now);
        self.inside = true;
    }

    /// Advance every marker one frame toward the pointer.
    ///
    /// Runs every frame whether or not the pointer moved, so markers keep
    /// settling onto the last known position.
    pub fn tick(&mut self, now: Instant) {
        let revert = Duration::from_millis(self.settings.press_revert_ms);
        if let Some(since) = self.pressed_since
            && now.saturating_duration_since(since) >= revert
        {
            self.pressed_since = None;
        }

        for marker in &mut self.markers {
            let target = self.raw + self.velocity * marker.settings.lead;
            let easing = marker.settings.easing_for(self.hovering);
            marker.pos += (target - marker.pos) * easing;
        }
        self.velocity *= self.settings.velocity_damping;

        let ripple_duration = Duration::from_millis(self.settings.ripple_ms);
        self.ripples
            .retain(|ripple| !ripple.is_finished(now, ripple_duration));
    }

    pub fn set_hover_state(&mut self, hovering: bool) {
        self.hovering = hovering;
    }

    /// Press or release. A press also leaves a ripple at the pointer.
    pub fn set_pressed_state(&mut self, pressed: bool, now: Instant) {
        if pressed {
            self.pressed_since = Some(now);
            if self.enabled {
                self.ripples.push(Ripple::new(self.raw, now));
            }
        } else {
            self.pressed_since = None;
        }
    }

    /// Focus came back. Markers stay hidden until the next position arrives.
    pub fn pointer_entered(&mut self) {
        self.inside = true;
    }

    pub fn pointer_left(&mut self) {
        self.inside = false;
        self.hovering = false;
        self.pressed_since = None;
    }

    /// Show or hide every marker of `kind`.
    pub fn set_kind_visible(&mut self, kind: MarkerKind, visible: bool) {
        for marker in self.markers.iter_mut().filter(|m| m.settings.kind == kind) {
            marker.visible = visible;
        }
    }

    /// Flip visibility of every marker of `kind`; returns the new visibility.
    pub fn toggle_kind(&mut self, kind: MarkerKind) -> bool {
        let visible = !self
            .markers
            .iter()
            .any(|m| m.settings.kind == kind && m.visible);
        self.set_kind_visible(kind, visible);
        visible
    }
}
