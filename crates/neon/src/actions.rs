//! Commands reachable from the context menu and the keyboard.

use neon_menu::{MenuAction, MenuEntry};

pub const TOGGLE_EFFECTS_LABEL: &str = "Toggle Effects";
pub const ENABLE_EFFECTS_LABEL: &str = "Enable Effects";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Rebuild the particle field.
    Refresh,
    Forward,
    Back,
    /// Jump to the projects section.
    ViewContent,
    Contact,
    ToggleEffects,
    ToggleTrail,
    ToggleConnections,
    ToggleRing,
    Quit,
}

pub fn default_menu() -> Vec<MenuEntry<Command>> {
    vec![
        MenuEntry::Action(MenuAction::new("⟳", "Refresh", Command::Refresh).with_shortcut("F5")),
        MenuEntry::Action(
            MenuAction::new("⇢", "Go Forward", Command::Forward).with_shortcut("Alt+→"),
        ),
        MenuEntry::Action(MenuAction::new("⇠", "Go Back", Command::Back).with_shortcut("Alt+←")),
        MenuEntry::Separator,
        MenuEntry::action("✎", "View Content", Command::ViewContent),
        MenuEntry::action("✉", "Contact", Command::Contact),
        MenuEntry::Separator,
        MenuEntry::Action(
            MenuAction::new("⚙", TOGGLE_EFFECTS_LABEL, Command::ToggleEffects).with_shortcut("e"),
        ),
        MenuEntry::submenu(
            "✦",
            "Effects",
            vec![
                MenuAction::new("·", "Pointer Trail", Command::ToggleTrail),
                MenuAction::new("╱", "Connections", Command::ToggleConnections),
                MenuAction::new("○", "Cursor Ring", Command::ToggleRing),
            ],
        ),
        MenuEntry::Separator,
        MenuEntry::Action(MenuAction::new("✕", "Quit", Command::Quit).with_shortcut("q")),
    ]
}
