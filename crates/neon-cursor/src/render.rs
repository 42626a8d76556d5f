//! Drawing follower markers and ripples.

use std::f32::consts::TAU;
use std::time::{Duration, Instant};

use glam::Vec2;
use neon_core::{Viewport, fade, palette};
use ratatui::{Frame, buffer::Buffer, style::Color};

use crate::follower::{FollowerState, Marker, PointerFollower};
use crate::settings::MarkerKind;

/// Points sampled around a ripple ring.
const RIPPLE_POINTS: usize = 16;

impl PointerFollower {
    /// Draw ripples, then markers back to front so the first marker sits on top.
    pub fn render(&self, frame: &mut Frame, viewport: Viewport, now: Instant) {
        let state = self.state();
        if !self.is_enabled() || state == FollowerState::Idle || viewport.is_empty() {
            return;
        }

        let buf = frame.buffer_mut();
        let ripple_duration = Duration::from_millis(self.settings().ripple_ms);
        for ripple in self.ripples() {
            let progress = ripple.progress(now, ripple_duration);
            let radius = self.settings().ripple_radius * progress;
            let color = fade(palette::HIGHLIGHT, 1.0 - progress);
            for i in 0..RIPPLE_POINTS {
                let angle = i as f32 / RIPPLE_POINTS as f32 * TAU;
                let point = ripple.origin + Vec2::new(angle.cos(), angle.sin()) * radius;
                put(buf, viewport, point, '·', color);
            }
        }

        for marker in self.markers().iter().rev().filter(|m| m.visible) {
            draw_marker(buf, viewport, marker, state);
        }
    }
}

fn draw_marker(buf: &mut Buffer, viewport: Viewport, marker: &Marker, state: FollowerState) {
    let color = match state {
        FollowerState::Pressed => palette::HIGHLIGHT,
        FollowerState::HoverExpanded => palette::HOVER,
        _ => marker.settings.tint.color(),
    };
    let pos = marker.pos;
    match marker.settings.kind {
        MarkerKind::Dot => {
            let glyph = match state {
                FollowerState::Pressed => '◆',
                FollowerState::HoverExpanded => '●',
                _ => '•',
            };
            put(buf, viewport, pos, glyph, color);
        }
        MarkerKind::Ring => match state {
            FollowerState::HoverExpanded => {
                put(buf, viewport, pos, '◎', color);
                put(buf, viewport, pos - Vec2::X, '(', color);
                put(buf, viewport, pos + Vec2::X, ')', color);
            }
            FollowerState::Pressed => put(buf, viewport, pos, '◉', color),
            _ => put(buf, viewport, pos, '○', color),
        },
        MarkerKind::Trail => put(buf, viewport, pos, '·', fade(color, 0.6)),
        MarkerKind::Glow => {
            let glow = fade(color, 0.3);
            for offset in [Vec2::X, -Vec2::X, Vec2::Y * 2.0, -Vec2::Y * 2.0] {
                put(buf, viewport, pos + offset, '░', glow);
            }
        }
    }
}

fn put(buf: &mut Buffer, viewport: Viewport, point: Vec2, glyph: char, color: Color) {
    if let Some(position) = viewport.to_cell(point)
        && let Some(cell) = buf.cell_mut(position)
    {
        cell.set_char(glyph).set_fg(color);
    }
}
