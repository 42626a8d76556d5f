//! Placement of the popup and its submenu inside the terminal.

use ratatui::layout::{Position, Rect, Size};

/// Clamp one axis of a popup.
///
/// Keeps `anchor` when the popup fits; otherwise moves it back so it ends
/// `margin` short of `limit`, never below zero.
pub fn clamp_axis(anchor: u16, len: u16, limit: u16, margin: u16) -> u16 {
    if anchor.saturating_add(len) > limit {
        limit.saturating_sub(len.saturating_add(margin))
    } else {
        anchor
    }
}

/// Top-left corner of a popup of `size` opened at `anchor`.
pub fn place_popup(anchor: Position, size: Size, viewport: Size, margin: u16) -> Position {
    Position::new(
        clamp_axis(anchor.x, size.width, viewport.width, margin),
        clamp_axis(anchor.y, size.height, viewport.height, margin),
    )
}

/// Top-left corner of a submenu opened from row `row` of `parent`.
///
/// The submenu sits against the parent's right edge with its first item
/// level with the parent row, and flips to the left side when it would
/// overflow. When neither side has room it drops below the parent, then
/// above it, and only overlaps the parent when the viewport is too small
/// for anything else.
pub fn place_submenu(parent: Rect, row: u16, size: Size, viewport: Size, margin: u16) -> Position {
    // Row sits below the parent's top border; the submenu has its own border.
    let row_y = parent.y.saturating_add(1).saturating_add(row);
    let level_y = clamp_axis(row_y.saturating_sub(1), size.height, viewport.height, margin);

    let right = parent.right();
    if right.saturating_add(size.width) <= viewport.width {
        return Position::new(right, level_y);
    }
    if parent.x >= size.width {
        return Position::new(parent.x - size.width, level_y);
    }

    let x = clamp_axis(parent.x, size.width, viewport.width, margin);
    let below = parent.bottom();
    let room_below = viewport.height.saturating_sub(below);
    if room_below >= size.height {
        Position::new(x, below)
    } else if parent.y >= size.height {
        Position::new(x, parent.y - size.height)
    } else if room_below >= parent.y {
        Position::new(x, clamp_axis(below, size.height, viewport.height, margin))
    } else {
        Position::new(x, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: Size = Size::new(1024, 768);
    const MENU: Size = Size::new(200, 400);

    #[test]
    fn test_fits_unchanged() {
        assert_eq!(
            place_popup(Position::new(50, 50), MENU, SCREEN, 10),
            Position::new(50, 50)
        );
    }

    #[test]
    fn test_overflow_both_axes() {
        assert_eq!(
            place_popup(Position::new(900, 700), MENU, SCREEN, 10),
            Position::new(814, 358)
        );
    }

    #[test]
    fn test_never_exceeds_viewport() {
        let viewport = Size::new(80, 24);
        let size = Size::new(22, 12);
        for x in 0..viewport.width {
            for y in 0..viewport.height {
                let placed = place_popup(Position::new(x, y), size, viewport, 1);
                assert!(placed.x + size.width <= viewport.width, "x overflow at {x},{y}");
                assert!(placed.y + size.height <= viewport.height, "y overflow at {x},{y}");
            }
        }
    }

    #[test]
    fn test_oversized_floors_at_zero() {
        let placed = place_popup(Position::new(5, 5), Size::new(100, 50), Size::new(80, 24), 1);
        assert_eq!(placed, Position::ORIGIN);
    }

    #[test]
    fn test_submenu_prefers_right() {
        let parent = Rect::new(10, 5, 20, 10);
        let placed = place_submenu(parent, 3, Size::new(15, 5), Size::new(80, 24), 1);
        assert_eq!(placed, Position::new(30, 8));
    }

    #[test]
    fn test_submenu_flips_left() {
        let parent = Rect::new(50, 5, 20, 10);
        let placed = place_submenu(parent, 0, Size::new(15, 5), Size::new(80, 24), 1);
        assert_eq!(placed, Position::new(35, 5));
    }

    #[test]
    fn test_submenu_clamped_vertically() {
        let parent = Rect::new(10, 12, 20, 12);
        let placed = place_submenu(parent, 9, Size::new(15, 6), Size::new(80, 24), 1);
        assert_eq!(placed, Position::new(30, 17));
    }

    fn overlaps(parent: Rect, placed: Position, size: Size) -> bool {
        parent.intersects(Rect::new(placed.x, placed.y, size.width, size.height))
    }

    #[test]
    fn test_submenu_never_covers_parent_on_wide_screen() {
        let viewport = Size::new(80, 24);
        let size = Size::new(15, 5);
        for x in 0..=60 {
            let parent = Rect::new(x, 5, 20, 10);
            let placed = place_submenu(parent, 2, size, viewport, 1);
            assert!(!overlaps(parent, placed, size), "overlap with parent at x={x}");
            assert!(placed.x + size.width <= viewport.width);
        }
    }

    #[test]
    fn test_submenu_drops_below_when_sides_are_full() {
        let viewport = Size::new(40, 12);
        let parent = Rect::new(0, 0, 26, 5);
        let size = Size::new(24, 3);
        let placed = place_submenu(parent, 1, size, viewport, 1);
        assert_eq!(placed, Position::new(0, 5));
        assert!(!overlaps(parent, placed, size));
    }

    #[test]
    fn test_submenu_rises_above_near_bottom() {
        let viewport = Size::new(40, 12);
        let size = Size::new(24, 3);
        for x in 0..=14 {
            for y in 0..=7 {
                let parent = Rect::new(x, y, 26, 5);
                let placed = place_submenu(parent, 0, size, viewport, 1);
                assert!(!overlaps(parent, placed, size), "overlap at {x},{y}");
                assert!(placed.x + size.width <= viewport.width);
                assert!(placed.y + size.height <= viewport.height);
            }
        }
        let parent = Rect::new(4, 7, 26, 5);
        assert_eq!(
            place_submenu(parent, 0, size, viewport, 1),
            Position::new(4, 4)
        );
    }
}
