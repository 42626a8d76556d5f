use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuSettings {
    /// Gap kept between a clamped menu and the terminal edge, in cells.
    pub margin: u16,
}

impl Default for MenuSettings {
    fn default() -> Self {
        Self { margin: 1 }
    }
}
