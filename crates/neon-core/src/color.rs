//! Color utility functions for neon effects.

use ratatui::style::Color;

use crate::tint::palette::BACKDROP;

/// Fade a color toward the backdrop by `alpha` (1.0 = full color, 0.0 = backdrop).
///
/// Named colors have no RGB components to blend, so they are kept as-is while
/// visible and dropped to dark gray once mostly transparent.
pub fn fade(color: Color, alpha: f32) -> Color {
    match color {
        Color::Rgb(..) => mix(BACKDROP, color, alpha),
        _ if alpha < 0.4 => Color::DarkGray,
        other => other,
    }
}

/// Linear blend between two RGB colors, `t` = 0.0 yields `from`.
pub fn mix(from: Color, to: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    match (from, to) {
        (Color::Rgb(r1, g1, b1), Color::Rgb(r2, g2, b2)) => {
            let lerp = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
            Color::Rgb(lerp(r1, r2), lerp(g1, g2), lerp(b1, b2))
        }
        _ if t < 0.5 => from,
        _ => to,
    }
}

/// Convert HSL to RGB color.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Color {
    if s == 0.0 {
        let v = (l * 255.0) as u8;
        return Color::Rgb(v, v, v);
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    let h = h.rem_euclid(360.0) / 360.0;

    let r = hue_to_rgb(p, q, h + 1.0 / 3.0);
    let g = hue_to_rgb(p, q, h);
    let b = hue_to_rgb(p, q, h - 1.0 / 3.0);

    Color::Rgb((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8)
}

fn hue_to_rgb(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fade_endpoints() {
        let accent = Color::Rgb(0, 255, 204);
        assert_eq!(fade(accent, 1.0), accent);
        assert_eq!(fade(accent, 0.0), BACKDROP);
    }

    #[test]
    fn test_mix_clamps() {
        let a = Color::Rgb(0, 0, 0);
        let b = Color::Rgb(200, 100, 50);
        assert_eq!(mix(a, b, 2.0), b);
        assert_eq!(mix(a, b, -1.0), a);
        assert_eq!(mix(a, b, 0.5), Color::Rgb(100, 50, 25));
    }

    #[test]
    fn test_fade_named_color() {
        assert_eq!(fade(Color::Cyan, 0.9), Color::Cyan);
        assert_eq!(fade(Color::Cyan, 0.1), Color::DarkGray);
    }

    #[test]
    fn test_hsl_primary_hues() {
        assert_eq!(hsl_to_rgb(0.0, 1.0, 0.5), Color::Rgb(255, 0, 0));
        assert_eq!(hsl_to_rgb(0.0, 0.0, 1.0), Color::Rgb(255, 255, 255));
    }
}
