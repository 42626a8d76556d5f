//! Core types shared by the neon effect crates.
//!
//! Holds the neon palette, the color helpers used to fade effects into the
//! backdrop, and the [`Viewport`] that maps terminal cells to the
//! aspect-corrected world space every effect simulates in.

mod color;
mod tint;
mod viewport;

pub use color::{fade, hsl_to_rgb, mix};
pub use tint::{Tint, palette};
pub use viewport::{CELL_ASPECT, Viewport};
