//! Drawing the particle field onto a ratatui frame.

use std::f32::consts::TAU;

use glam::{Vec2, Vec3};
use neon_core::{Tint, Viewport, fade, mix};
use ratatui::{
    Frame,
    style::Color,
    symbols::Marker,
    widgets::canvas::{Canvas, Context, Line as CanvasLine},
};

use crate::chars::{DUST_CHARS, HALO_CHAR, ORB_CHARS, SPARK_CHARS};
use crate::field::ParticleField;
use crate::particle::Particle;
use crate::projection::Projection;

/// Particles fainter than this are not drawn.
const MIN_VISIBLE_ALPHA: f32 = 0.04;

/// Connection lines never get brighter than this fraction of their tint.
const CONNECTION_ALPHA: f32 = 0.6;

/// Pieces per grid line; a piece with an end behind the near plane is dropped.
const GRID_SEGMENTS: usize = 16;

/// Samples around each orb halo.
const HALO_SAMPLES: usize = 12;

impl ParticleField {
    /// Draw the floor grid and connections, then orb halos, then particles,
    /// into the viewport area.
    ///
    /// `opacity` scales everything; the effects toggle uses it to dim the
    /// field instead of hiding it.
    pub fn render(
        &self,
        frame: &mut Frame,
        viewport: Viewport,
        projection: Projection,
        opacity: f32,
    ) {
        if viewport.is_empty() || opacity <= 0.0 {
            return;
        }

        let projected: Vec<Option<(Vec2, f32)>> = self
            .particles()
            .iter()
            .map(|p| projection.project(p.pos))
            .collect();

        let grid = self.settings().grid;
        let draw_grid = grid.enabled && matches!(projection, Projection::Perspective { .. });
        if draw_grid || !self.connections().is_empty() {
            self.render_lines(frame, viewport, projection, &projected, opacity);
        }
        if self.settings().glow.enabled {
            self.render_halos(frame, viewport, &projected, opacity);
        }

        // Far particles first so nearer ones overwrite them.
        let mut visible: Vec<(&Particle, Vec2, f32)> = self
            .particles()
            .iter()
            .zip(&projected)
            .filter_map(|(p, proj)| proj.map(|(screen, scale)| (p, screen, scale)))
            .collect();
        visible.sort_by(|a, b| a.2.total_cmp(&b.2));

        let buf = frame.buffer_mut();
        for (particle, screen, scale) in visible {
            let alpha = particle.alpha * opacity * depth_alpha(scale);
            if alpha < MIN_VISIBLE_ALPHA {
                continue;
            }
            let Some(position) = viewport.to_cell(screen) else {
                continue;
            };
            if let Some(cell) = buf.cell_mut(position) {
                cell.set_char(glyph(particle, scale))
                    .set_fg(fade(particle.tint.color(), alpha));
            }
        }
    }

    /// Grid and connection lines share one braille canvas.
    fn render_lines(
        &self,
        frame: &mut Frame,
        viewport: Viewport,
        projection: Projection,
        projected: &[Option<(Vec2, f32)>],
        opacity: f32,
    ) {
        let size = viewport.size();
        let particles = self.particles();
        let grid = self.settings().grid;

        let canvas = Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([0.0, size.x as f64])
            .y_bounds([0.0, size.y as f64])
            .paint(|ctx| {
                if grid.enabled && matches!(projection, Projection::Perspective { .. }) {
                    self.paint_grid(ctx, size, projection.unspun(), opacity);
                }
                for connection in self.connections() {
                    let (Some(Some((a, scale_a))), Some(Some((b, scale_b)))) =
                        (projected.get(connection.a), projected.get(connection.b))
                    else {
                        continue;
                    };
                    let depth = depth_alpha((scale_a + scale_b) / 2.0);
                    let alpha = connection.strength * CONNECTION_ALPHA * opacity * depth;
                    if alpha < MIN_VISIBLE_ALPHA {
                        continue;
                    }
                    let tint = mix(
                        particles[connection.a].tint.color(),
                        particles[connection.b].tint.color(),
                        0.5,
                    );
                    paint_segment(ctx, size, *a, *b, fade(tint, alpha));
                }
            });

        frame.render_widget(canvas, viewport.area);
    }

    /// Square grid on the floor plane below the field, every fourth line in
    /// the primary tint.
    fn paint_grid(&self, ctx: &mut Context, size: Vec2, projection: Projection, opacity: f32) {
        let grid = self.settings().grid;
        let divisions = grid.divisions.max(1);
        let half = grid.half_size.abs();
        let step = 2.0 * half / divisions as f32;

        for i in 0..=divisions {
            let offset = -half + i as f32 * step;
            let tint = if i % 4 == 0 { Tint::Primary } else { Tint::Accent };
            let lines = [
                (
                    Vec3::new(-half, grid.floor, offset),
                    Vec3::new(half, grid.floor, offset),
                ),
                (
                    Vec3::new(offset, grid.floor, -half),
                    Vec3::new(offset, grid.floor, half),
                ),
            ];
            for (from, to) in lines {
                for k in 0..GRID_SEGMENTS {
                    let a = from.lerp(to, k as f32 / GRID_SEGMENTS as f32);
                    let b = from.lerp(to, (k + 1) as f32 / GRID_SEGMENTS as f32);
                    let (Some((a, scale_a)), Some((b, scale_b))) =
                        (projection.project(a), projection.project(b))
                    else {
                        continue;
                    };
                    let alpha = grid.alpha * opacity * depth_alpha((scale_a + scale_b) / 2.0);
                    if alpha < MIN_VISIBLE_ALPHA {
                        continue;
                    }
                    paint_segment(ctx, size, a, b, fade(tint.color(), alpha));
                }
            }
        }
    }

    /// Faint ring around each orb whose brightness pulses over time.
    fn render_halos(
        &self,
        frame: &mut Frame,
        viewport: Viewport,
        projected: &[Option<(Vec2, f32)>],
        opacity: f32,
    ) {
        let glow = self.settings().glow;
        let elapsed = self.elapsed();
        let buf = frame.buffer_mut();

        let orbs = self
            .particles()
            .iter()
            .zip(projected)
            .filter(|(p, _)| p.is_orb());
        for (index, (orb, proj)) in orbs.enumerate() {
            let Some((center, scale)) = *proj else {
                continue;
            };
            let pulse = (elapsed * glow.pulse_speed + index as f32).sin() * 0.5 + 0.5;
            let alpha = glow.alpha * pulse * opacity * orb.alpha * depth_alpha(scale);
            if alpha < MIN_VISIBLE_ALPHA {
                continue;
            }
            let radius = orb.size / 2.0 * glow.scale * scale;
            let color = fade(orb.tint.color(), alpha);
            for k in 0..HALO_SAMPLES {
                let (sin, cos) = (k as f32 / HALO_SAMPLES as f32 * TAU).sin_cos();
                let Some(position) = viewport.to_cell(center + Vec2::new(cos, sin) * radius)
                else {
                    continue;
                };
                if let Some(cell) = buf.cell_mut(position) {
                    cell.set_char(HALO_CHAR).set_fg(color);
                }
            }
        }
    }
}

/// Canvas y grows upward.
fn paint_segment(ctx: &mut Context, size: Vec2, a: Vec2, b: Vec2, color: Color) {
    ctx.draw(&CanvasLine {
        x1: a.x as f64,
        y1: (size.y - a.y) as f64,
        x2: b.x as f64,
        y2: (size.y - b.y) as f64,
        color,
    });
}

/// Dim particles that sit behind the field center.
fn depth_alpha(scale: f32) -> f32 {
    scale.clamp(0.35, 1.0)
}

/// Pick a glyph from the particle's kind, apparent size and rotation.
fn glyph(particle: &Particle, scale: f32) -> char {
    if particle.is_orb() {
        return if scale >= 1.0 { ORB_CHARS[1] } else { ORB_CHARS[0] };
    }
    if particle.is_transient() {
        if particle.size < 2.0 {
            return DUST_CHARS[0];
        }
        let quadrant = (particle.rotation.rem_euclid(360.0) / 90.0) as usize;
        return SPARK_CHARS[quadrant % SPARK_CHARS.len()];
    }
    let apparent = particle.size * scale;
    if apparent < 0.7 {
        DUST_CHARS[0]
    } else if apparent < 1.4 {
        DUST_CHARS[1]
    } else {
        DUST_CHARS[2]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::Bounds;
    use crate::settings::{DriftSettings, FieldSettings};
    use glam::Vec3;
    use ratatui::{Terminal, backend::TestBackend, layout::Rect};

    fn field_with(points: &[Vec3]) -> ParticleField {
        let settings = FieldSettings {
            orbs: 0,
            drift: DriftSettings {
                amplitude: 0.0,
                ..Default::default()
            },
            ..Default::default()
        };
        let mut field = ParticleField::with_seed(settings, 11);
        field.initialize(
            points.len(),
            Bounds::Rect {
                min: Vec2::ZERO,
                max: Vec2::new(20.0, 20.0),
            },
        );
        for (particle, pos) in field.particles_mut().iter_mut().zip(points) {
            particle.pos = *pos;
            particle.alpha = 1.0;
            particle.size = 1.0;
        }
        field
    }

    fn draw(field: &ParticleField, opacity: f32) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(20, 10)).unwrap();
        let viewport = Viewport::new(Rect::new(0, 0, 20, 10));
        terminal
            .draw(|frame| field.render(frame, viewport, Projection::Flat, opacity))
            .unwrap();
        terminal
    }

    fn is_braille(symbol: &str) -> bool {
        symbol
            .chars()
            .next()
            .is_some_and(|c| ('\u{2801}'..='\u{28FF}').contains(&c))
    }

    #[test]
    fn test_particle_lands_in_its_cell() {
        let field = field_with(&[Vec3::new(5.5, 7.0, 0.0)]);
        let terminal = draw(&field, 1.0);
        assert_eq!(terminal.backend().buffer()[(5, 3)].symbol(), "•");
    }

    #[test]
    fn test_zero_opacity_draws_nothing() {
        let field = field_with(&[Vec3::new(5.5, 7.0, 0.0)]);
        let terminal = draw(&field, 0.0);
        assert_eq!(terminal.backend().buffer()[(5, 3)].symbol(), " ");
    }

    #[test]
    fn test_connection_draws_braille_between_particles() {
        let mut field = field_with(&[Vec3::new(2.5, 5.0, 0.0), Vec3::new(12.5, 5.0, 0.0)]);
        field.compute_connections(30.0, 3);
        let terminal = draw(&field, 1.0);
        let buffer = terminal.backend().buffer();
        let braille = (3..12)
            .filter(|&x| is_braille(buffer[(x, 2)].symbol()))
            .count();
        assert!(braille > 0, "no line cells between the particles");
    }

    fn perspective() -> Projection {
        Projection::Perspective {
            angle: 0.0,
            camera_distance: 100.0,
            center: Vec2::new(10.0, 10.0),
            camera: Vec2::ZERO,
        }
    }

    fn braille_cells(terminal: &Terminal<TestBackend>) -> usize {
        let buffer = terminal.backend().buffer();
        buffer.content().iter().filter(|c| is_braille(c.symbol())).count()
    }

    #[test]
    fn test_floor_grid_under_volumetric_field() {
        let mut settings = FieldSettings {
            orbs: 0,
            ..Default::default()
        };
        settings.grid.floor = 5.0;
        let mut field = ParticleField::with_seed(settings, 12);
        field.initialize(0, Bounds::Cube { half_extent: 10.0 });

        let viewport = Viewport::new(Rect::new(0, 0, 20, 10));
        let mut terminal = Terminal::new(TestBackend::new(20, 10)).unwrap();
        terminal
            .draw(|frame| field.render(frame, viewport, perspective(), 1.0))
            .unwrap();
        let buffer = terminal.backend().buffer();
        let lower = (0..20)
            .flat_map(|x| (5..10).map(move |y| (x, y)))
            .filter(|&pos| is_braille(buffer[pos].symbol()))
            .count();
        assert!(lower > 0, "no grid below the field center");
        // The floor sits below the center, so the top rows stay empty.
        assert!((0..20).all(|x| !is_braille(buffer[(x, 0)].symbol())));

        // Flat fields and a disabled grid draw no floor.
        let flat = draw(&field, 1.0);
        assert_eq!(braille_cells(&flat), 0);
        field.settings_mut().grid.enabled = false;
        let mut terminal = Terminal::new(TestBackend::new(20, 10)).unwrap();
        terminal
            .draw(|frame| field.render(frame, viewport, perspective(), 1.0))
            .unwrap();
        assert_eq!(braille_cells(&terminal), 0);
    }

    fn orb_field(glow: bool) -> ParticleField {
        let mut field = field_with(&[Vec3::new(10.0, 10.0, 0.0)]);
        field.particles_mut()[0].size = 5.0;
        field.particles_mut()[0].vel = Vec3::ZERO;
        field.settings_mut().glow.enabled = glow;
        // sin(pi/4 * 2 + 0) peaks the first orb's pulse.
        field.step(std::f32::consts::FRAC_PI_4, None);
        field
    }

    fn halo_cells(terminal: &Terminal<TestBackend>) -> usize {
        let buffer = terminal.backend().buffer();
        buffer.content().iter().filter(|c| c.symbol() == "░").count()
    }

    #[test]
    fn test_orb_halo_surrounds_orb() {
        let terminal = draw(&orb_field(true), 1.0);
        assert!(halo_cells(&terminal) >= 4, "halo too sparse");
        // The orb itself stays on top of its halo.
        assert_eq!(terminal.backend().buffer()[(10, 5)].symbol(), "●");

        let terminal = draw(&orb_field(false), 1.0);
        assert_eq!(halo_cells(&terminal), 0);
    }

    #[test]
    fn test_orb_halo_fades_at_pulse_trough() {
        let mut field = orb_field(true);
        // sin(3pi/4 * 2) = -1: the pulse bottoms out.
        field.step(3.0 * std::f32::consts::FRAC_PI_4, None);
        let terminal = draw(&field, 1.0);
        assert_eq!(halo_cells(&terminal), 0);
    }

    #[test]
    fn test_glyph_choice() {
        let mut p = Particle::at(Vec3::ZERO);
        p.size = 5.0;
        assert_eq!(glyph(&p, 1.2), '●');
        assert_eq!(glyph(&p, 0.8), '○');
        p.size = 0.3;
        assert_eq!(glyph(&p, 1.0), '·');
        p.size = 1.6;
        assert_eq!(glyph(&p, 1.0), '✦');

        // Large sparks are still sparks.
        p.size = 5.0;
        p.life = crate::particle::Lifetime::Transient {
            frames_left: 10,
            decay: 0.05,
        };
        assert!(SPARK_CHARS.contains(&glyph(&p, 1.0)));
    }
}
