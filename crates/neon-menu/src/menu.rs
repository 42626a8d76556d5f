//! Context menu state machine.

use std::time::Duration;

use crossterm::event::KeyCode;
use ratatui::layout::{Position, Rect, Size};

use crate::entry::{MenuAction, MenuEntry};
use crate::layout::{place_popup, place_submenu};
use crate::settings::MenuSettings;

/// Flash intensity right after the menu opens.
const FLASH_START: f32 = 0.3;
const FLASH_STEP: f32 = 0.05;
const FLASH_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Hidden,
    Visible,
    /// The submenu of entry `parent` is showing.
    SubmenuOpen { parent: usize },
}

/// What the menu did with an input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuOutcome<A> {
    /// The menu was hidden or the input was not for it.
    Ignored,
    /// Handled inside the menu; nothing for the caller to do.
    Consumed,
    /// The menu closed without a selection.
    Dismissed,
    /// A leaf was chosen. The menu has already hidden itself.
    Selected(A),
}

#[derive(Debug)]
pub struct ContextMenu<A> {
    entries: Vec<MenuEntry<A>>,
    settings: MenuSettings,
    state: MenuState,
    viewport: Rect,
    rect: Rect,
    submenu_rect: Rect,
    hovered: Option<usize>,
    sub_hovered: Option<usize>,
    flash: f32,
    flash_elapsed: Duration,
}

impl<A: Clone> ContextMenu<A> {
    pub fn new(entries: Vec<MenuEntry<A>>, settings: MenuSettings) -> Self {
        Self {
            entries,
            settings,
            state: MenuState::Hidden,
            viewport: Rect::default(),
            rect: Rect::default(),
            submenu_rect: Rect::default(),
            hovered: None,
            sub_hovered: None,
            flash: 0.0,
            flash_elapsed: Duration::ZERO,
        }
    }

    pub fn entries(&self) -> &[MenuEntry<A>] {
        &self.entries
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn is_visible(&self) -> bool {
        self.state != MenuState::Hidden
    }

    /// Main popup area. Empty while hidden.
    pub fn rect(&self) -> Rect {
        if self.is_visible() {
            self.rect
        } else {
            Rect::default()
        }
    }

    pub fn submenu_rect(&self) -> Option<Rect> {
        matches!(self.state, MenuState::SubmenuOpen { .. }).then_some(self.submenu_rect)
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn sub_hovered(&self) -> Option<usize> {
        self.sub_hovered
    }

    /// Current appearance flash, from 0.3 after opening down to 0.
    pub fn flash(&self) -> f32 {
        self.flash
    }

    /// Actions of the currently open submenu.
    pub fn open_items(&self) -> Option<&[MenuAction<A>]> {
        match self.state {
            MenuState::SubmenuOpen { parent } => self.submenu_items(parent),
            _ => None,
        }
    }

    /// Whether a terminal cell is covered by the menu or its submenu.
    pub fn contains(&self, position: Position) -> bool {
        self.rect().contains(position)
            || self.submenu_rect().is_some_and(|r| r.contains(position))
    }

    /// Open the menu at `anchor`, clamped into `viewport`.
    pub fn show(&mut self, anchor: Position, viewport: Rect) {
        let size = self.popup_size();
        let relative = Position::new(
            anchor.x.saturating_sub(viewport.x),
            anchor.y.saturating_sub(viewport.y),
        );
        let placed = place_popup(relative, size, viewport.as_size(), self.settings.margin);
        self.viewport = viewport;
        self.rect = Rect::new(
            viewport.x + placed.x,
            viewport.y + placed.y,
            size.width,
            size.height,
        )
        .intersection(viewport);
        self.state = MenuState::Visible;
        self.hovered = None;
        self.sub_hovered = None;
        self.flash = FLASH_START;
        self.flash_elapsed = Duration::ZERO;
    }

    pub fn hide(&mut self) {
        self.state = MenuState::Hidden;
        self.hovered = None;
        self.sub_hovered = None;
    }

    /// Open the submenu of entry `index`, closing any other first.
    ///
    /// Returns false when the entry is not a submenu or the menu is hidden.
    pub fn open_submenu(&mut self, index: usize) -> bool {
        if !self.is_visible() {
            return false;
        }
        let Some(items) = self.submenu_items(index) else {
            return false;
        };
        let size = list_size(items.iter().map(MenuAction::width), items.len());
        self.close_submenu();

        let viewport = self.viewport;
        let parent = Rect::new(
            self.rect.x - viewport.x,
            self.rect.y - viewport.y,
            self.rect.width,
            self.rect.height,
        );
        let row = u16::try_from(index).unwrap_or(u16::MAX);
        let placed = place_submenu(parent, row, size, viewport.as_size(), self.settings.margin);
        self.submenu_rect = Rect::new(
            viewport.x + placed.x,
            viewport.y + placed.y,
            size.width,
            size.height,
        )
        .intersection(viewport);
        self.state = MenuState::SubmenuOpen { parent: index };
        self.sub_hovered = None;
        true
    }

    pub fn close_submenu(&mut self) {
        if let MenuState::SubmenuOpen { .. } = self.state {
            self.state = MenuState::Visible;
        }
        self.sub_hovered = None;
    }

    /// Track hover. Hovering a submenu entry opens it; hovering another
    /// selectable row closes it.
    pub fn on_pointer_move(&mut self, position: Position) {
        if !self.is_visible() {
            return;
        }
        if let Some(row) = self.submenu_row_at(position) {
            self.sub_hovered = Some(row);
            return;
        }
        self.sub_hovered = None;
        let Some(row) = self.row_at(position) else {
            self.hovered = None;
            return;
        };
        self.hovered = Some(row);
        match self.entries.get(row) {
            Some(MenuEntry::Submenu { .. }) => {
                if self.state != (MenuState::SubmenuOpen { parent: row }) {
                    self.open_submenu(row);
                }
            }
            Some(MenuEntry::Action(_)) => self.close_submenu(),
            _ => {}
        }
    }

    /// Left click. Outside both popups dismisses the menu.
    pub fn on_click(&mut self, position: Position) -> MenuOutcome<A> {
        if !self.is_visible() {
            return MenuOutcome::Ignored;
        }
        if let Some(row) = self.submenu_row_at(position) {
            return self.select_submenu_item(row);
        }
        if self.submenu_rect().is_some_and(|r| r.contains(position)) {
            return MenuOutcome::Consumed;
        }
        if let Some(row) = self.row_at(position) {
            return self.activate(row);
        }
        if self.rect.contains(position) {
            return MenuOutcome::Consumed;
        }
        self.hide();
        MenuOutcome::Dismissed
    }

    /// Keyboard navigation. Unused keys are consumed while the menu is open.
    pub fn on_key(&mut self, code: KeyCode) -> MenuOutcome<A> {
        if !self.is_visible() {
            return MenuOutcome::Ignored;
        }
        let in_submenu = self.sub_hovered.is_some();
        match code {
            KeyCode::Esc => {
                self.hide();
                MenuOutcome::Dismissed
            }
            KeyCode::Up | KeyCode::Down => {
                let forward = code == KeyCode::Down;
                if in_submenu {
                    let len = self.open_items().map_or(0, <[_]>::len);
                    self.sub_hovered = step_index(self.sub_hovered, len, forward, |_| true);
                } else {
                    let entries = &self.entries;
                    self.hovered = step_index(self.hovered, entries.len(), forward, |i| {
                        entries[i].is_selectable()
                    });
                }
                MenuOutcome::Consumed
            }
            KeyCode::Right => {
                if !in_submenu && let Some(row) = self.hovered {
                    self.enter_submenu(row);
                }
                MenuOutcome::Consumed
            }
            KeyCode::Left => {
                if in_submenu {
                    self.close_submenu();
                }
                MenuOutcome::Consumed
            }
            KeyCode::Enter => match (self.sub_hovered, self.hovered) {
                (Some(row), _) => self.select_submenu_item(row),
                (None, Some(row)) => {
                    if self.enter_submenu(row) {
                        MenuOutcome::Consumed
                    } else {
                        self.activate(row)
                    }
                }
                (None, None) => MenuOutcome::Consumed,
            },
            _ => MenuOutcome::Consumed,
        }
    }

    /// The terminal changed size; an open menu would be misplaced.
    pub fn on_resize(&mut self, viewport: Rect) {
        self.viewport = viewport;
        self.hide();
    }

    /// Decay the appearance flash.
    pub fn tick(&mut self, delta: Duration) {
        if self.flash <= 0.0 {
            return;
        }
        self.flash_elapsed += delta;
        while self.flash_elapsed >= FLASH_INTERVAL && self.flash > 0.0 {
            self.flash_elapsed -= FLASH_INTERVAL;
            self.flash = (self.flash - FLASH_STEP).max(0.0);
        }
    }

    /// Replace the label of every action carrying `command`.
    pub fn relabel(&mut self, command: &A, label: impl Into<String>)
    where
        A: PartialEq,
    {
        let label = label.into();
        for entry in &mut self.entries {
            match entry {
                MenuEntry::Action(action) if action.command == *command => {
                    action.label.clone_from(&label);
                }
                MenuEntry::Submenu { items, .. } => {
                    for action in items.iter_mut().filter(|a| a.command == *command) {
                        action.label.clone_from(&label);
                    }
                }
                _ => {}
            }
        }
    }

    fn popup_size(&self) -> Size {
        list_size(self.entries.iter().map(MenuEntry::width), self.entries.len())
    }

    fn submenu_items(&self, index: usize) -> Option<&[MenuAction<A>]> {
        match self.entries.get(index) {
            Some(MenuEntry::Submenu { items, .. }) => Some(items),
            _ => None,
        }
    }

    fn enter_submenu(&mut self, row: usize) -> bool {
        if !self.open_submenu(row) {
            return false;
        }
        self.sub_hovered = self.open_items().filter(|items| !items.is_empty()).map(|_| 0);
        true
    }

    fn activate(&mut self, row: usize) -> MenuOutcome<A> {
        match self.entries.get(row) {
            Some(MenuEntry::Action(action)) => {
                let command = action.command.clone();
                self.hide();
                MenuOutcome::Selected(command)
            }
            Some(MenuEntry::Submenu { .. }) => {
                self.open_submenu(row);
                MenuOutcome::Consumed
            }
            _ => MenuOutcome::Consumed,
        }
    }

    fn select_submenu_item(&mut self, row: usize) -> MenuOutcome<A> {
        let Some(command) = self
            .open_items()
            .and_then(|items| items.get(row))
            .map(|action| action.command.clone())
        else {
            return MenuOutcome::Consumed;
        };
        self.hide();
        MenuOutcome::Selected(command)
    }

    fn row_at(&self, position: Position) -> Option<usize> {
        inner_row(self.rect(), position).filter(|&row| row < self.entries.len())
    }

    fn submenu_row_at(&self, position: Position) -> Option<usize> {
        let row = inner_row(self.submenu_rect()?, position)?;
        let len = self.open_items().map_or(0, <[_]>::len);
        (row < len).then_some(row)
    }
}

/// Bordered popup size for rows of the given widths.
fn list_size(widths: impl Iterator<Item = u16>, rows: usize) -> Size {
    let width = widths.max().unwrap_or(0).saturating_add(2);
    let height = u16::try_from(rows).unwrap_or(u16::MAX).saturating_add(2);
    Size::new(width, height)
}

/// Row index under `position` inside the borders of `rect`.
fn inner_row(rect: Rect, position: Position) -> Option<usize> {
    let inner = Rect::new(
        rect.x.saturating_add(1),
        rect.y.saturating_add(1),
        rect.width.saturating_sub(2),
        rect.height.saturating_sub(2),
    );
    inner
        .contains(position)
        .then(|| usize::from(position.y - inner.y))
}

/// Next index in `0..len` that passes `selectable`, wrapping around.
fn step_index(
    current: Option<usize>,
    len: usize,
    forward: bool,
    selectable: impl Fn(usize) -> bool,
) -> Option<usize> {
    if len == 0 {
        return current;
    }
    let mut index = match current {
        Some(i) => i,
        None if forward => len - 1,
        None => 0,
    };
    for _ in 0..len {
        index = if forward {
            (index + 1) % len
        } else {
            (index + len - 1) % len
        };
        if selectable(index) {
            return Some(index);
        }
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Cmd {
        Refresh,
        Quit,
        Trail,
        Rings,
    }

    fn entries() -> Vec<MenuEntry<Cmd>> {
        vec![
            MenuEntry::Header("Navigate".into()),
            MenuEntry::Action(MenuAction::new("↻", "Refresh", Cmd::Refresh).with_shortcut("F5")),
            MenuEntry::Separator,
            MenuEntry::submenu(
                "✦",
                "Effects",
                vec![
                    MenuAction::new("", "Trail", Cmd::Trail),
                    MenuAction::new("", "Rings", Cmd::Rings),
                ],
            ),
            MenuEntry::submenu("", "Empty", vec![]),
            MenuEntry::action("✕", "Quit", Cmd::Quit),
        ]
    }

    const SCREEN: Rect = Rect::new(0, 0, 80, 24);

    fn shown_at(anchor: Position) -> ContextMenu<Cmd> {
        let mut menu = ContextMenu::new(entries(), MenuSettings::default());
        menu.show(anchor, SCREEN);
        menu
    }

    /// Screen cell of row `row` of the main popup.
    fn row_cell(menu: &ContextMenu<Cmd>, row: u16) -> Position {
        Position::new(menu.rect().x + 2, menu.rect().y + 1 + row)
    }

    #[test]
    fn test_show_at_anchor() {
        let menu = shown_at(Position::new(5, 3));
        assert_eq!(menu.state(), MenuState::Visible);
        assert_eq!(menu.rect().as_position(), Position::new(5, 3));
        assert_eq!(menu.rect().height, 8);
        assert!((menu.flash() - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_show_clamps_into_viewport() {
        for x in (0..SCREEN.width).step_by(3) {
            for y in 0..SCREEN.height {
                let menu = shown_at(Position::new(x, y));
                let rect = menu.rect();
                assert!(rect.right() <= SCREEN.right(), "{x},{y}");
                assert!(rect.bottom() <= SCREEN.bottom(), "{x},{y}");
            }
        }
    }

    #[test]
    fn test_select_leaf_hides() {
        let mut menu = shown_at(Position::new(2, 2));
        let cell = row_cell(&menu, 1);
        assert_eq!(menu.on_click(cell), MenuOutcome::Selected(Cmd::Refresh));
        assert!(!menu.is_visible());
    }

    #[test]
    fn test_non_selectable_rows_consume() {
        let mut menu = shown_at(Position::new(2, 2));
        assert_eq!(menu.on_click(row_cell(&menu, 0)), MenuOutcome::Consumed);
        assert_eq!(menu.on_click(row_cell(&menu, 2)), MenuOutcome::Consumed);
        // Border.
        assert_eq!(menu.on_click(menu.rect().as_position()), MenuOutcome::Consumed);
        assert!(menu.is_visible());
    }

    #[test]
    fn test_outside_click_dismisses() {
        let mut menu = shown_at(Position::new(2, 2));
        assert_eq!(menu.on_click(Position::new(70, 20)), MenuOutcome::Dismissed);
        assert!(!menu.is_visible());
        assert_eq!(menu.on_click(Position::new(70, 20)), MenuOutcome::Ignored);
    }

    #[test]
    fn test_escape_and_resize_hide() {
        let mut menu = shown_at(Position::new(2, 2));
        assert_eq!(menu.on_key(KeyCode::Esc), MenuOutcome::Dismissed);
        assert!(!menu.is_visible());

        menu.show(Position::new(2, 2), SCREEN);
        menu.on_resize(Rect::new(0, 0, 40, 12));
        assert_eq!(menu.state(), MenuState::Hidden);
    }

    #[test]
    fn test_hover_opens_submenu() {
        let mut menu = shown_at(Position::new(2, 2));
        menu.on_pointer_move(row_cell(&menu, 3));
        assert_eq!(menu.state(), MenuState::SubmenuOpen { parent: 3 });
        let sub = menu.submenu_rect().unwrap();
        assert_eq!(sub.x, menu.rect().right());
        // First item level with the parent row.
        assert_eq!(sub.y + 1, row_cell(&menu, 3).y);

        let item = Position::new(sub.x + 2, sub.y + 2);
        menu.on_pointer_move(item);
        assert_eq!(menu.sub_hovered(), Some(1));
        assert_eq!(menu.on_click(item), MenuOutcome::Selected(Cmd::Rings));
        assert!(!menu.is_visible());
    }

    #[test]
    fn test_single_submenu_open() {
        let mut menu = shown_at(Position::new(2, 2));
        assert!(menu.open_submenu(3));
        assert!(menu.open_submenu(4));
        assert_eq!(menu.state(), MenuState::SubmenuOpen { parent: 4 });
        assert!(menu.open_items().unwrap().is_empty());
        assert!(!menu.open_submenu(1));
        assert!(!menu.open_submenu(99));
        assert_eq!(menu.state(), MenuState::SubmenuOpen { parent: 4 });
    }

    #[test]
    fn test_hovering_action_closes_submenu() {
        let mut menu = shown_at(Position::new(2, 2));
        menu.on_pointer_move(row_cell(&menu, 3));
        menu.on_pointer_move(row_cell(&menu, 5));
        assert_eq!(menu.state(), MenuState::Visible);
        assert_eq!(menu.hovered(), Some(5));
    }

    #[test]
    fn test_submenu_falls_back_left() {
        let mut menu = shown_at(Position::new(75, 2));
        menu.open_submenu(3);
        let sub = menu.submenu_rect().unwrap();
        assert_eq!(sub.right(), menu.rect().x);
    }

    #[test]
    fn test_cramped_submenu_leaves_parent_clickable() {
        let mut menu = shown_at(Position::new(2, 2));
        menu.open_submenu(3);
        let main = menu.rect();
        let sub = menu.submenu_rect().unwrap();

        // Too narrow for either side, tall enough to go below.
        let viewport = Rect::new(0, 0, main.width + sub.width - 1, main.height + sub.height);
        menu.show(Position::ORIGIN, viewport);
        assert!(menu.open_submenu(3));
        let sub = menu.submenu_rect().unwrap();
        assert!(!sub.intersects(menu.rect()), "{sub:?} covers {:?}", menu.rect());
        assert_eq!(sub.y, menu.rect().bottom());

        assert_eq!(
            menu.on_click(row_cell(&menu, 1)),
            MenuOutcome::Selected(Cmd::Refresh)
        );
    }

    #[test]
    fn test_keyboard_navigation() {
        let mut menu = shown_at(Position::new(2, 2));
        assert_eq!(menu.on_key(KeyCode::Down), MenuOutcome::Consumed);
        assert_eq!(menu.hovered(), Some(1));
        menu.on_key(KeyCode::Down);
        assert_eq!(menu.hovered(), Some(3));

        menu.on_key(KeyCode::Right);
        assert_eq!(menu.state(), MenuState::SubmenuOpen { parent: 3 });
        assert_eq!(menu.sub_hovered(), Some(0));
        menu.on_key(KeyCode::Down);
        assert_eq!(menu.sub_hovered(), Some(1));
        menu.on_key(KeyCode::Left);
        assert_eq!(menu.state(), MenuState::Visible);

        menu.on_key(KeyCode::Up);
        assert_eq!(menu.hovered(), Some(1));
        menu.on_key(KeyCode::Up);
        assert_eq!(menu.hovered(), Some(5));
        assert_eq!(menu.on_key(KeyCode::Enter), MenuOutcome::Selected(Cmd::Quit));
    }

    #[test]
    fn test_enter_in_submenu_selects() {
        let mut menu = shown_at(Position::new(2, 2));
        menu.on_key(KeyCode::Down);
        menu.on_key(KeyCode::Down);
        assert_eq!(menu.on_key(KeyCode::Enter), MenuOutcome::Consumed);
        assert_eq!(menu.on_key(KeyCode::Enter), MenuOutcome::Selected(Cmd::Trail));
    }

    #[test]
    fn test_flash_decays() {
        let mut menu = shown_at(Position::new(2, 2));
        menu.tick(Duration::from_millis(49));
        assert!((menu.flash() - 0.3).abs() < 1e-6);
        menu.tick(Duration::from_millis(1));
        assert!((menu.flash() - 0.25).abs() < 1e-6);
        menu.tick(Duration::from_millis(500));
        assert_eq!(menu.flash(), 0.0);
    }

    #[test]
    fn test_relabel() {
        let mut menu = shown_at(Position::new(2, 2));
        menu.relabel(&Cmd::Quit, "Leave");
        menu.relabel(&Cmd::Rings, "Halos");
        let MenuEntry::Action(quit) = &menu.entries()[5] else {
            panic!("expected action");
        };
        assert_eq!(quit.label, "Leave");
        let MenuEntry::Submenu { items, .. } = &menu.entries()[3] else {
            panic!("expected submenu");
        };
        assert_eq!(items[1].label, "Halos");
    }

    #[test]
    fn test_contains() {
        let mut menu = shown_at(Position::new(2, 2));
        assert!(menu.contains(Position::new(2, 2)));
        assert!(!menu.contains(Position::new(70, 20)));
        menu.hide();
        assert!(!menu.contains(Position::new(2, 2)));
    }
}
