//! Mapping between terminal cells and effect world space.

use glam::Vec2;
use ratatui::layout::{Position, Rect};

/// Terminal cells are roughly twice as tall as they are wide; world space
/// stretches rows by this factor so distances look round on screen.
pub const CELL_ASPECT: f32 = 2.0;

/// A terminal area expressed in world units.
///
/// World x runs over columns, world y over rows scaled by [`CELL_ASPECT`].
/// Cell `(col, row)` maps to the world point at its center.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    pub area: Rect,
}

impl Viewport {
    pub fn new(area: Rect) -> Self {
        Self { area }
    }

    /// World-space extent of the viewport.
    pub fn size(&self) -> Vec2 {
        Vec2::new(
            self.area.width as f32,
            self.area.height as f32 * CELL_ASPECT,
        )
    }

    pub fn center(&self) -> Vec2 {
        self.size() / 2.0
    }

    pub fn is_empty(&self) -> bool {
        self.area.is_empty()
    }

    /// World point at the center of a terminal cell.
    pub fn to_world(&self, position: Position) -> Vec2 {
        let col = position.x.saturating_sub(self.area.x) as f32;
        let row = position.y.saturating_sub(self.area.y) as f32;
        Vec2::new(col + 0.5, (row + 0.5) * CELL_ASPECT)
    }

    /// Terminal cell containing a world point, if it is inside the viewport.
    pub fn to_cell(&self, point: Vec2) -> Option<Position> {
        if !point.is_finite() || point.x < 0.0 || point.y < 0.0 {
            return None;
        }
        let col = point.x.floor() as u32;
        let row = (point.y / CELL_ASPECT).floor() as u32;
        if col >= self.area.width as u32 || row >= self.area.height as u32 {
            return None;
        }
        Some(Position::new(
            self.area.x + col as u16,
            self.area.y + row as u16,
        ))
    }
}
