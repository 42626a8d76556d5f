//! Right-click context menu for neon.
//!
//! A [`ContextMenu`] holds an ordered list of [`MenuEntry`] values, places
//! itself at the pointer while staying inside the terminal, and opens at
//! most one nested submenu at a time. Selecting a leaf hands its command
//! back to the caller as [`MenuOutcome::Selected`].

mod entry;
mod layout;
mod menu;
mod render;
mod settings;

pub use entry::{MenuAction, MenuEntry};
pub use layout::{clamp_axis, place_popup, place_submenu};
pub use menu::{ContextMenu, MenuOutcome, MenuState};
pub use settings::MenuSettings;
