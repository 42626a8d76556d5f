use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// The neon palette.
pub mod palette {
    use ratatui::style::Color;

    /// Electric purple.
    pub const PRIMARY: Color = Color::Rgb(153, 0, 255);
    /// Aqua.
    pub const ACCENT: Color = Color::Rgb(0, 255, 204);
    /// Hot pink, used for pressed and highlighted states.
    pub const HIGHLIGHT: Color = Color::Rgb(255, 0, 128);
    /// Cyan, used while hovering interactive regions.
    pub const HOVER: Color = Color::Rgb(0, 255, 255);
    /// Near-black backdrop that faded effects blend into.
    pub const BACKDROP: Color = Color::Rgb(10, 10, 18);
    /// Muted text.
    pub const MUTED: Color = Color::Rgb(110, 110, 140);
}

/// Color category of an effect element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tint {
    #[default]
    Primary,
    Accent,
    Highlight,
}

impl Tint {
    /// All tints, in palette order.
    pub const ALL: [Tint; 3] = [Tint::Primary, Tint::Accent, Tint::Highlight];

    /// Convert the tint to a Ratatui color.
    pub fn color(self) -> Color {
        match self {
            Tint::Primary => palette::PRIMARY,
            Tint::Accent => palette::ACCENT,
            Tint::Highlight => palette::HIGHLIGHT,
        }
    }
}
