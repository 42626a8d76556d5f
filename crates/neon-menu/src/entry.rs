use ratatui::text::Span;

/// A selectable leaf that carries a command for the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuAction<A> {
    pub icon: String,
    pub label: String,
    /// Shortcut hint shown right-aligned, e.g. `F5`.
    pub shortcut: Option<String>,
    pub command: A,
}

impl<A> MenuAction<A> {
    pub fn new(icon: impl Into<String>, label: impl Into<String>, command: A) -> Self {
        Self {
            icon: icon.into(),
            label: label.into(),
            shortcut: None,
            command,
        }
    }

    pub fn with_shortcut(mut self, shortcut: impl Into<String>) -> Self {
        self.shortcut = Some(shortcut.into());
        self
    }

    /// Display width of the row: icon, label and shortcut with padding.
    pub(crate) fn width(&self) -> u16 {
        let right = self.shortcut.as_deref().map_or(0, |s| width_of(s) + 2);
        row_width(&self.icon, &self.label, right)
    }
}

/// One row of a context menu.
#[derive(Debug, Clone, PartialEq)]
pub enum MenuEntry<A> {
    Action(MenuAction<A>),
    Separator,
    /// Non-selectable section label.
    Header(String),
    /// Opens a nested list of actions. Nesting stops at one level.
    Submenu {
        icon: String,
        label: String,
        items: Vec<MenuAction<A>>,
    },
}

impl<A> MenuEntry<A> {
    pub fn action(icon: impl Into<String>, label: impl Into<String>, command: A) -> Self {
        Self::Action(MenuAction::new(icon, label, command))
    }

    pub fn submenu(
        icon: impl Into<String>,
        label: impl Into<String>,
        items: Vec<MenuAction<A>>,
    ) -> Self {
        Self::Submenu {
            icon: icon.into(),
            label: label.into(),
            items,
        }
    }

    /// Whether keyboard navigation and clicks can land on this row.
    pub fn is_selectable(&self) -> bool {
        matches!(self, Self::Action(_) | Self::Submenu { .. })
    }

    pub(crate) fn width(&self) -> u16 {
        match self {
            Self::Action(action) => action.width(),
            Self::Separator => 0,
            Self::Header(label) => width_of(label) + 2,
            // Room for the ▸ marker.
            Self::Submenu { icon, label, .. } => row_width(icon, label, 3),
        }
    }
}

fn width_of(text: &str) -> u16 {
    u16::try_from(Span::raw(text).width()).unwrap_or(u16::MAX)
}

fn row_width(icon: &str, label: &str, right: u16) -> u16 {
    let left = if icon.is_empty() {
        width_of(label)
    } else {
        width_of(icon) + 1 + width_of(label)
    };
    left.saturating_add(right).saturating_add(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selectable() {
        assert!(MenuEntry::action("↻", "Refresh", ()).is_selectable());
        assert!(MenuEntry::<()>::submenu("✦", "Effects", vec![]).is_selectable());
        assert!(!MenuEntry::<()>::Separator.is_selectable());
        assert!(!MenuEntry::<()>::Header("Navigate".into()).is_selectable());
    }

    #[test]
    fn test_row_widths() {
        let plain = MenuAction::new("", "Quit", ());
        assert_eq!(plain.width(), 6);
        let with_icon = MenuAction::new("↻", "Refresh", ()).with_shortcut("F5");
        // " ↻ Refresh  F5 "
        assert_eq!(with_icon.width(), 15);
        assert_eq!(MenuEntry::<()>::Separator.width(), 0);
    }
}
